//! Browse session state and its reducer
//!
//! All mutable browsing state lives in [`SessionState`] and changes only
//! through [`SessionState::update`]. Work that needs the network is returned
//! as [`Effect`]s for the caller to run; results come back as actions.
//!
//! Every restaurant fetch carries a sequence number. Only the response to the
//! most recently issued fetch is applied, so a slow stale response can never
//! overwrite a fresher one.

use crate::api::{Restaurant, RestaurantId, Stats};
use crate::browse::booking::BookingPrefs;
use crate::browse::filter::FilterSelection;
use crate::browse::pager::{self, PageLabel};
use crate::config::{BrowseConfig, MAX_PARTY_SIZE};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Message shown whenever the listing cannot be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load restaurants. Make sure the backend is running.";

/// Message shown when a restaurant update is rejected
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update restaurant.";

/// "N results", with " (filtered)" when something narrows the list
pub fn result_summary(count: usize, filtered: bool) -> String {
    if filtered {
        format!("{} results (filtered)", count)
    } else {
        format!("{} results", count)
    }
}

/// Lifecycle of the fetched restaurant list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Listing {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Restaurant>),
    Failed(String),
}

/// Inputs to the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The debounced search text settled on a value
    SearchCommitted(String),
    ToggleNeighborhood(String),
    ToggleCuisine(String),
    ClearFilters,
    /// Clear the search text and both filter sets
    Reset,
    SetPage(u32),
    NextPage,
    PrevPage,
    SetDate(NaiveDate),
    SetPartySize(u32),
    /// Re-issue the listing fetch for the current search
    Retry,
    ToggleVisited(RestaurantId),
    RestaurantsLoaded {
        seq: u64,
        result: Result<Vec<Restaurant>, String>,
    },
    StatsLoaded(Result<Stats, String>),
    RestaurantUpdated(Result<Restaurant, String>),
}

/// Work the reducer asks the caller to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchRestaurants { seq: u64, search: String },
    FetchStats,
    ToggleVisited(RestaurantId),
}

/// Everything the browse view is derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Committed search text
    pub search: String,
    pub filters: FilterSelection,
    /// Current page, 1-indexed
    pub page: u32,
    pub page_size: usize,
    pub booking: BookingPrefs,
    pub listing: Listing,
    /// `None` until stats load; stays `None` if they fail
    pub stats: Option<Stats>,
    /// Sequence number of the most recently issued listing fetch
    pub latest_request: u64,
    /// One-line status message from the last action, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl SessionState {
    /// Fresh session with empty search and filters
    pub fn new(config: &BrowseConfig, today: NaiveDate) -> Self {
        Self {
            search: String::new(),
            filters: FilterSelection::new(),
            page: 1,
            page_size: config.page_size.max(1),
            booking: BookingPrefs {
                date: today,
                party_size: config.default_party_size,
            },
            listing: Listing::Idle,
            stats: None,
            latest_request: 0,
            notice: None,
        }
    }

    /// Effects that load the initial listing and the filter options
    pub fn begin(&mut self) -> Vec<Effect> {
        vec![self.issue_fetch(), Effect::FetchStats]
    }

    /// Apply one action, returning the effects it requires
    ///
    /// # Examples
    ///
    /// ```
    /// use gourmet::browse::{Action, Effect, SessionState};
    /// use gourmet::config::BrowseConfig;
    ///
    /// let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let mut state = SessionState::new(&BrowseConfig::default(), today);
    /// let effects = state.update(Action::SearchCommitted("pizza".into()));
    /// assert_eq!(
    ///     effects,
    ///     vec![Effect::FetchRestaurants { seq: 1, search: "pizza".into() }]
    /// );
    /// ```
    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        self.notice = None;

        match action {
            Action::SearchCommitted(search) => {
                self.search = search;
                self.page = 1;
                vec![self.issue_fetch()]
            }
            Action::ToggleNeighborhood(value) => {
                self.filters.toggle_neighborhood(&value);
                self.page = 1;
                vec![self.issue_fetch()]
            }
            Action::ToggleCuisine(value) => {
                self.filters.toggle_cuisine(&value);
                self.page = 1;
                vec![self.issue_fetch()]
            }
            Action::ClearFilters => {
                self.filters.clear();
                self.page = 1;
                vec![self.issue_fetch()]
            }
            Action::Reset => {
                self.search.clear();
                self.filters.clear();
                self.page = 1;
                vec![self.issue_fetch()]
            }
            Action::SetPage(page) => {
                self.page = page.clamp(1, self.total_pages());
                Vec::new()
            }
            Action::NextPage => {
                if pager::has_next(self.page, self.total_pages()) {
                    self.page += 1;
                }
                Vec::new()
            }
            Action::PrevPage => {
                if pager::has_prev(self.page) {
                    self.page -= 1;
                }
                Vec::new()
            }
            Action::SetDate(date) => {
                self.booking.date = date;
                Vec::new()
            }
            Action::SetPartySize(size) => {
                if (1..=MAX_PARTY_SIZE).contains(&size) {
                    self.booking.party_size = size;
                } else {
                    tracing::warn!("Ignoring party size {} outside 1..={}", size, MAX_PARTY_SIZE);
                    self.notice = Some(format!("Party size must be between 1 and {}", MAX_PARTY_SIZE));
                }
                Vec::new()
            }
            Action::Retry => vec![self.issue_fetch()],
            Action::ToggleVisited(id) => vec![Effect::ToggleVisited(id)],
            Action::RestaurantsLoaded { seq, result } => {
                if seq != self.latest_request {
                    tracing::debug!(
                        "Discarding stale listing response {} (latest is {})",
                        seq,
                        self.latest_request
                    );
                    return Vec::new();
                }
                match result {
                    Ok(items) => {
                        tracing::debug!("Loaded {} restaurants for request {}", items.len(), seq);
                        self.listing = Listing::Loaded(items);
                        self.page = self.page.clamp(1, self.total_pages());
                    }
                    Err(message) => {
                        tracing::error!("Failed to load restaurants: {}", message);
                        self.listing = Listing::Failed(LOAD_FAILED_MESSAGE.to_string());
                    }
                }
                Vec::new()
            }
            Action::StatsLoaded(result) => {
                match result {
                    Ok(stats) => self.stats = Some(stats),
                    Err(message) => tracing::warn!("Failed to load stats: {}", message),
                }
                Vec::new()
            }
            Action::RestaurantUpdated(result) => {
                match result {
                    Ok(updated) => {
                        if let Listing::Loaded(items) = &mut self.listing {
                            if let Some(slot) = items.iter_mut().find(|r| r.id == updated.id) {
                                *slot = updated;
                            }
                        }
                    }
                    Err(message) => {
                        tracing::error!("Failed to update restaurant: {}", message);
                        self.notice = Some(UPDATE_FAILED_MESSAGE.to_string());
                    }
                }
                Vec::new()
            }
        }
    }

    fn issue_fetch(&mut self) -> Effect {
        self.latest_request += 1;
        self.listing = Listing::Loading;
        Effect::FetchRestaurants {
            seq: self.latest_request,
            search: self.search.clone(),
        }
    }

    /// True while the latest fetch is outstanding
    pub fn is_loading(&self) -> bool {
        matches!(self.listing, Listing::Loading)
    }

    /// Error message of the last failed fetch
    pub fn error(&self) -> Option<&str> {
        match &self.listing {
            Listing::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the search text or either filter narrows the listing
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.filters.is_active()
    }

    /// The fetched restaurants after applying the filter selection
    pub fn visible(&self) -> Vec<Restaurant> {
        match &self.listing {
            Listing::Loaded(items) => self.filters.apply(items),
            _ => Vec::new(),
        }
    }

    /// Number of pages the visible restaurants span, at least 1
    pub fn total_pages(&self) -> u32 {
        pager::page_count(self.visible().len(), self.page_size)
    }

    /// Restaurants on the current page
    pub fn page_items(&self) -> Vec<Restaurant> {
        let size = self.page_size.max(1);
        self.visible()
            .into_iter()
            .skip(pager::page_offset(self.page, size))
            .take(size)
            .collect()
    }

    /// Pagination labels for the current page
    pub fn page_labels(&self) -> Vec<PageLabel> {
        pager::page_window(self.page, self.total_pages())
    }

    /// "N results", with " (filtered)" when a search or filter is active
    pub fn result_summary(&self) -> String {
        result_summary(self.visible().len(), self.is_filtered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BookingUrls, Priority};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn restaurant(id: i64, neighborhood: &str, cuisine: &str) -> Restaurant {
        Restaurant {
            id,
            name: format!("Place {}", id),
            visited: false,
            notes: String::new(),
            neighborhood: Some(neighborhood.to_string()),
            cuisine_type: Some(cuisine.to_string()),
            booking_urls: BookingUrls::default(),
            monitor_enabled: false,
            priority: Priority::Normal,
            created_at: "2025-01-01T00:00:00".to_string(),
            updated_at: "2025-01-01T00:00:00".to_string(),
        }
    }

    fn loaded_state(items: Vec<Restaurant>, page_size: usize) -> SessionState {
        let config = BrowseConfig {
            page_size,
            ..Default::default()
        };
        let mut state = SessionState::new(&config, today());
        let effects = state.begin();
        assert_eq!(effects.len(), 2);
        state.update(Action::RestaurantsLoaded {
            seq: state.latest_request,
            result: Ok(items),
        });
        state
    }

    #[test]
    fn test_begin_requests_listing_and_stats() {
        let mut state = SessionState::new(&BrowseConfig::default(), today());
        let effects = state.begin();
        assert_eq!(
            effects,
            vec![
                Effect::FetchRestaurants {
                    seq: 1,
                    search: String::new()
                },
                Effect::FetchStats
            ]
        );
        assert!(state.is_loading());
    }

    #[test]
    fn test_filter_changes_refetch_and_reset_page() {
        let items = (1..=30).map(|i| restaurant(i, "SoHo", "Thai")).collect();
        let mut state = loaded_state(items, 10);
        state.update(Action::SetPage(3));
        assert_eq!(state.page, 3);

        let effects = state.update(Action::ToggleNeighborhood("SoHo".to_string()));
        assert_eq!(state.page, 1);
        assert!(matches!(
            effects.as_slice(),
            [Effect::FetchRestaurants { seq: 2, .. }]
        ));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = SessionState::new(&BrowseConfig::default(), today());
        state.begin();
        state.update(Action::SearchCommitted("sushi".to_string()));
        assert_eq!(state.latest_request, 2);

        // Response to the newer request lands first.
        state.update(Action::RestaurantsLoaded {
            seq: 2,
            result: Ok(vec![restaurant(1, "SoHo", "Japanese")]),
        });
        // Then the stale one.
        state.update(Action::RestaurantsLoaded {
            seq: 1,
            result: Ok(vec![
                restaurant(2, "Tribeca", "French"),
                restaurant(3, "Harlem", "Soul"),
            ]),
        });

        let visible: Vec<i64> = state.visible().iter().map(|r| r.id).collect();
        assert_eq!(visible, vec![1]);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_result() {
        let mut state = SessionState::new(&BrowseConfig::default(), today());
        state.begin();
        state.update(Action::Retry);
        state.update(Action::RestaurantsLoaded {
            seq: 2,
            result: Ok(vec![restaurant(1, "SoHo", "Thai")]),
        });
        state.update(Action::RestaurantsLoaded {
            seq: 1,
            result: Err("connection refused".to_string()),
        });
        assert!(state.error().is_none());
        assert_eq!(state.visible().len(), 1);
    }

    #[test]
    fn test_failure_sets_flat_message_and_retry_refetches() {
        let mut state = SessionState::new(&BrowseConfig::default(), today());
        state.begin();
        state.update(Action::RestaurantsLoaded {
            seq: 1,
            result: Err("HTTP 500".to_string()),
        });
        assert_eq!(state.error(), Some(LOAD_FAILED_MESSAGE));

        let effects = state.update(Action::Retry);
        assert_eq!(
            effects,
            vec![Effect::FetchRestaurants {
                seq: 2,
                search: String::new()
            }]
        );
        assert!(state.error().is_none());
    }

    #[test]
    fn test_stats_failure_is_non_fatal() {
        let mut state = loaded_state(vec![restaurant(1, "SoHo", "Thai")], 10);
        state.update(Action::StatsLoaded(Err("boom".to_string())));
        assert!(state.stats.is_none());
        assert_eq!(state.visible().len(), 1);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_summary_marks_filtered() {
        let items = vec![
            restaurant(1, "SoHo", "Italian"),
            restaurant(2, "Tribeca", "French"),
            restaurant(3, "SoHo", "Thai"),
        ];
        let mut state = loaded_state(items.clone(), 10);
        assert_eq!(state.result_summary(), "3 results");

        let seq = match state.update(Action::ToggleNeighborhood("SoHo".to_string()))[0] {
            Effect::FetchRestaurants { seq, .. } => seq,
            _ => unreachable!(),
        };
        state.update(Action::RestaurantsLoaded {
            seq,
            result: Ok(items),
        });
        assert_eq!(state.result_summary(), "2 results (filtered)");
    }

    #[test]
    fn test_search_alone_marks_filtered() {
        let mut state = SessionState::new(&BrowseConfig::default(), today());
        state.update(Action::SearchCommitted("noodle".to_string()));
        assert!(state.is_filtered());
        state.update(Action::SearchCommitted(String::new()));
        assert!(!state.is_filtered());
    }

    #[test]
    fn test_paging_over_visible_results() {
        let items = (1..=25).map(|i| restaurant(i, "SoHo", "Thai")).collect();
        let mut state = loaded_state(items, 10);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.page_items().len(), 10);

        state.update(Action::NextPage);
        state.update(Action::NextPage);
        state.update(Action::NextPage);
        assert_eq!(state.page, 3);
        assert_eq!(state.page_items().len(), 5);
        assert_eq!(state.page_items()[0].id, 21);

        state.update(Action::SetPage(99));
        assert_eq!(state.page, 3);
        state.update(Action::SetPage(0));
        assert_eq!(state.page, 1);
        state.update(Action::PrevPage);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_empty_listing_has_one_page_and_no_labels() {
        let state = loaded_state(Vec::new(), 10);
        assert_eq!(state.total_pages(), 1);
        assert!(state.page_labels().is_empty());
        assert_eq!(state.result_summary(), "0 results");
    }

    #[test]
    fn test_zero_page_size_from_json_does_not_panic() {
        let state = loaded_state((1..=3).map(|i| restaurant(i, "SoHo", "Thai")).collect(), 10);
        let mut value = serde_json::to_value(&state).unwrap();
        value["page_size"] = serde_json::json!(0);
        let mut state: SessionState = serde_json::from_value(value).unwrap();
        assert_eq!(state.page_size, 0);

        assert_eq!(state.total_pages(), 3);
        state.update(Action::SetPage(2));
        assert_eq!(state.page, 2);
        assert_eq!(state.page_items().len(), 1);
        assert_eq!(state.page_items()[0].id, 2);
        state.update(Action::NextPage);
        assert_eq!(state.page, 3);
        assert_eq!(state.page_labels().len(), 3);
    }

    #[test]
    fn test_reset_clears_search_and_filters() {
        let mut state = SessionState::new(&BrowseConfig::default(), today());
        state.update(Action::SearchCommitted("ramen".to_string()));
        state.update(Action::ToggleCuisine("Japanese".to_string()));
        assert!(state.is_filtered());

        let effects = state.update(Action::Reset);
        assert!(!state.is_filtered());
        assert_eq!(
            effects,
            vec![Effect::FetchRestaurants {
                seq: 3,
                search: String::new()
            }]
        );
    }

    #[test]
    fn test_party_size_bounds() {
        let mut state = SessionState::new(&BrowseConfig::default(), today());
        state.update(Action::SetPartySize(6));
        assert_eq!(state.booking.party_size, 6);
        state.update(Action::SetPartySize(12));
        assert_eq!(state.booking.party_size, 6);
        assert!(state.notice.is_some());
    }

    #[test]
    fn test_restaurant_updated_replaces_item() {
        let mut state = loaded_state(vec![restaurant(1, "SoHo", "Thai")], 10);
        let mut updated = restaurant(1, "SoHo", "Thai");
        updated.visited = true;
        state.update(Action::RestaurantUpdated(Ok(updated)));
        assert!(state.visible()[0].visited);

        state.update(Action::RestaurantUpdated(Err("404".to_string())));
        assert_eq!(state.notice.as_deref(), Some(UPDATE_FAILED_MESSAGE));
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut state = loaded_state(vec![restaurant(1, "SoHo", "Thai")], 10);
        state.update(Action::ToggleCuisine("Thai".to_string()));
        let json = serde_json::to_string(&state).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
