//! reqwest implementation of the restaurant directory gateway
//!
//! Non-2xx responses, transport failures, and malformed bodies each map to a
//! distinct [`GourmetError`] variant and are logged here; the body of an
//! error response is never interpreted.

use crate::api::types::{
    AvailabilityRequest, AvailabilityResults, ListQuery, NewWatchConfig, Page, Restaurant,
    RestaurantId, RestaurantUpdate, Stats, WatchConfig,
};
use crate::api::RestaurantApi;
use crate::config::ApiConfig;
use crate::error::{GourmetError, Result};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the restaurant directory service
///
/// # Examples
///
/// ```
/// use gourmet::api::ApiClient;
/// use gourmet::config::ApiConfig;
///
/// let client = ApiClient::new(&ApiConfig::default()).unwrap();
/// assert_eq!(client.api_root(), "http://localhost:8000/api");
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    api_root: String,
}

impl ApiClient {
    /// Create a client for the service at `config.base_url`
    ///
    /// All endpoints live under `<base_url>/api`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("gourmet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GourmetError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let api_root = format!("{}/api", config.base_url.trim_end_matches('/'));
        tracing::debug!("Initialized API client: root={}", api_root);

        Ok(Self { client, api_root })
    }

    /// Root URL every endpoint path is appended to
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_root, path))
    }

    /// Send and check the status, returning the raw response
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", path, e);
            GourmetError::Transport {
                endpoint: path.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("{} returned error {}", path, status);
            return Err(GourmetError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        Ok(response)
    }

    /// Send, check the status, and decode the JSON body
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> Result<T> {
        let response = self.send(builder, path).await?;

        let body = response.text().await.map_err(|e| {
            tracing::warn!("Failed to read body from {}: {}", path, e);
            GourmetError::Transport {
                endpoint: path.to_string(),
                message: e.to_string(),
            }
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse response from {}: {}", path, e);
            GourmetError::Decode {
                endpoint: path.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl RestaurantApi for ApiClient {
    async fn list_restaurants(&self, query: &ListQuery) -> Result<Page> {
        let path = "/restaurants";
        let pairs = query.to_pairs();
        tracing::debug!("Listing restaurants: {:?}", pairs);
        self.send_json(self.request(Method::GET, path).query(&pairs), path)
            .await
    }

    async fn get_restaurant(&self, id: RestaurantId) -> Result<Restaurant> {
        let path = format!("/restaurants/{}", id);
        self.send_json(self.request(Method::GET, &path), &path).await
    }

    async fn get_stats(&self) -> Result<Stats> {
        let path = "/stats";
        self.send_json(self.request(Method::GET, path), path).await
    }

    async fn toggle_visited(&self, id: RestaurantId) -> Result<Restaurant> {
        let path = format!("/restaurants/{}/toggle-visited", id);
        tracing::info!("Toggling visited for restaurant {}", id);
        self.send_json(self.request(Method::PATCH, &path), &path).await
    }

    async fn update_restaurant(
        &self,
        id: RestaurantId,
        update: &RestaurantUpdate,
    ) -> Result<Restaurant> {
        let path = format!("/restaurants/{}", id);
        tracing::info!("Updating restaurant {}", id);
        self.send_json(self.request(Method::PATCH, &path).json(update), &path)
            .await
    }

    async fn create_watch_config(&self, watch: &NewWatchConfig) -> Result<WatchConfig> {
        let path = "/watch-configs";
        tracing::info!("Creating watch for restaurant {}", watch.restaurant_id);
        self.send_json(self.request(Method::POST, path).json(watch), path)
            .await
    }

    async fn list_watch_configs(&self) -> Result<Vec<WatchConfig>> {
        let path = "/watch-configs";
        self.send_json(self.request(Method::GET, path), path).await
    }

    async fn delete_watch_config(&self, id: i64) -> Result<()> {
        let path = format!("/watch-configs/{}", id);
        tracing::info!("Deleting watch {}", id);
        self.send(self.request(Method::DELETE, &path), &path).await?;
        Ok(())
    }

    async fn search_availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityResults> {
        let path = "/availability/search";
        tracing::debug!(
            "Searching availability for {} restaurant(s) on {} at {}",
            request.restaurant_ids.len(),
            request.date,
            request.time
        );
        self.send_json(self.request(Method::POST, path).json(request), path)
            .await
    }

    async fn health(&self) -> Result<()> {
        let path = "/health";
        self.send(self.request(Method::GET, path), path).await?;
        Ok(())
    }
}
