//! Remote data gateway for the restaurant directory service
//!
//! [`RestaurantApi`] is the seam between the browsing model and the network.
//! [`ApiClient`] is the reqwest-backed implementation; tests substitute
//! in-memory fakes or point the client at a mock server.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{
    AvailabilityRequest, AvailabilityResults, AvailabilitySlot, BookingUrls, ListQuery,
    NewWatchConfig, Page, Priority, Restaurant, RestaurantId, RestaurantUpdate, Stats,
    WatchConfig,
};

use crate::error::Result;
use async_trait::async_trait;

/// Largest `per_page` the listing endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Operations offered by the restaurant directory service
///
/// Every method maps to exactly one HTTP call except
/// [`list_all_matching`](RestaurantApi::list_all_matching) and
/// [`list_all_restaurants`](RestaurantApi::list_all_restaurants), which walk
/// the listing pages. No method retries or caches.
#[async_trait]
pub trait RestaurantApi: Send + Sync {
    /// `GET /restaurants` with the given filters and page
    async fn list_restaurants(&self, query: &ListQuery) -> Result<Page>;

    /// `GET /restaurants/{id}`
    async fn get_restaurant(&self, id: RestaurantId) -> Result<Restaurant>;

    /// `GET /stats`
    async fn get_stats(&self) -> Result<Stats>;

    /// `PATCH /restaurants/{id}/toggle-visited`
    async fn toggle_visited(&self, id: RestaurantId) -> Result<Restaurant>;

    /// `PATCH /restaurants/{id}` with only the populated fields
    async fn update_restaurant(
        &self,
        id: RestaurantId,
        update: &RestaurantUpdate,
    ) -> Result<Restaurant>;

    /// `POST /watch-configs`
    async fn create_watch_config(&self, watch: &NewWatchConfig) -> Result<WatchConfig>;

    /// `GET /watch-configs`
    async fn list_watch_configs(&self) -> Result<Vec<WatchConfig>>;

    /// `DELETE /watch-configs/{id}`
    async fn delete_watch_config(&self, id: i64) -> Result<()>;

    /// `POST /availability/search`
    async fn search_availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityResults>;

    /// `GET /health`
    async fn health(&self) -> Result<()>;

    /// Fetch every restaurant matching a free-text search
    async fn list_all_restaurants(&self, search: &str) -> Result<Vec<Restaurant>> {
        self.list_all_matching(&ListQuery::search(search)).await
    }

    /// Fetch every page of a listing query
    ///
    /// Requests page 1 at [`MAX_PAGE_SIZE`], then the remaining pages the
    /// first response announces, and concatenates the items in server order.
    /// `page` and `per_page` on `base` are ignored. A failure on any page
    /// fails the whole call.
    async fn list_all_matching(&self, base: &ListQuery) -> Result<Vec<Restaurant>> {
        let mut query = base.clone();
        query.per_page = Some(MAX_PAGE_SIZE);
        query.page = Some(1);

        let first = self.list_restaurants(&query).await?;
        let total_pages = first.total_pages;
        let mut items = first.items;

        for page in 2..=total_pages {
            query.page = Some(page);
            let next = self.list_restaurants(&query).await?;
            items.extend(next.items);
        }

        tracing::debug!(
            "Fetched {} restaurants across {} page(s)",
            items.len(),
            total_pages.max(1)
        );
        Ok(items)
    }
}
