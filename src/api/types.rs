//! Wire types for the restaurant directory API
//!
//! Field names match the JSON emitted by the service exactly. Timestamps are
//! kept as the strings the server sends; the client only displays them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Restaurant identifier assigned by the service
pub type RestaurantId = i64;

/// Optional per-platform booking links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opentable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
}

impl BookingUrls {
    /// True when no platform link is present
    pub fn is_empty(&self) -> bool {
        self.resy.is_none() && self.opentable.is_none() && self.google.is_none()
    }
}

/// Urgency label attached to a restaurant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
    Urgent,
    /// Any label this client does not know about
    #[serde(other)]
    Other,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
            Self::Other => "other",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(format!(
                "Invalid priority: {}. Must be one of: normal, high, urgent",
                other
            )),
        }
    }
}

/// A restaurant as returned by the listing service
///
/// `id` is unique and never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub visited: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub booking_urls: BookingUrls,
    #[serde(default)]
    pub monitor_enabled: bool,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial restaurant update sent with `PATCH /restaurants/{id}`
///
/// Only fields that are `Some` are serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_urls: Option<BookingUrls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl RestaurantUpdate {
    /// True when no field would be sent
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A saved availability watch for one restaurant
///
/// `restaurant_id` references the restaurant; the watch does not own it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    pub id: i64,
    pub restaurant_id: RestaurantId,
    pub party_size: u32,
    #[serde(default)]
    pub date_range_start: Option<NaiveDate>,
    #[serde(default)]
    pub date_range_end: Option<NaiveDate>,
    #[serde(default)]
    pub preferred_times: Vec<String>,
    #[serde(default)]
    pub notify_email: Option<String>,
    #[serde(default)]
    pub notify_sms: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub last_checked: Option<String>,
    pub created_at: String,
}

fn default_active() -> bool {
    true
}

/// Body for `POST /watch-configs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWatchConfig {
    pub restaurant_id: RestaurantId,
    pub party_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range_start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range_end: Option<NaiveDate>,
    pub preferred_times: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_sms: Option<String>,
}

impl NewWatchConfig {
    /// Watch with the service defaults: party of 2, evening times
    pub fn new(restaurant_id: RestaurantId) -> Self {
        Self {
            restaurant_id,
            party_size: 2,
            date_range_start: None,
            date_range_end: None,
            preferred_times: default_preferred_times(),
            notify_email: None,
            notify_sms: None,
        }
    }
}

/// Evening seatings used when no preferred time is given
pub fn default_preferred_times() -> Vec<String> {
    vec!["18:00".to_string(), "19:00".to_string(), "20:00".to_string()]
}

/// Aggregate counts and the label sets used to populate filter options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_restaurants: u64,
    pub visited: u64,
    pub not_visited: u64,
    pub monitored: u64,
    #[serde(default)]
    pub neighborhoods: Vec<String>,
    #[serde(default)]
    pub cuisine_types: Vec<String>,
}

/// One page of restaurants with pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Restaurant>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Query parameters for `GET /restaurants`
///
/// Absent fields are left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub query: Option<String>,
    pub neighborhood: Option<String>,
    pub cuisine_type: Option<String>,
    pub visited: Option<bool>,
    pub monitor_enabled: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    /// Query for a free-text search; an empty string means no search
    pub fn search(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            query: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            ..Self::default()
        }
    }

    /// Key/value pairs in the order the service documents them
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = self.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("query", q.to_string()));
        }
        if let Some(n) = self.neighborhood.as_deref().filter(|n| !n.is_empty()) {
            pairs.push(("neighborhood", n.to_string()));
        }
        if let Some(c) = self.cuisine_type.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("cuisine_type", c.to_string()));
        }
        if let Some(v) = self.visited {
            pairs.push(("visited", v.to_string()));
        }
        if let Some(m) = self.monitor_enabled {
            pairs.push(("monitor_enabled", m.to_string()));
        }
        if let Some(p) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", p.to_string()));
        }
        if let Some(pp) = self.per_page.filter(|pp| *pp > 0) {
            pairs.push(("per_page", pp.to_string()));
        }
        pairs
    }
}

/// Body for `POST /availability/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub restaurant_ids: Vec<RestaurantId>,
    pub date: NaiveDate,
    pub time: String,
    pub party_size: u32,
}

/// A bookable time slot on one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub time: String,
    pub booking_url: String,
    pub platform: String,
}

/// Availability keyed by restaurant id; slots keep the service's order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResults {
    pub results: BTreeMap<RestaurantId, Vec<AvailabilitySlot>>,
    pub date: NaiveDate,
    pub party_size: u32,
}
