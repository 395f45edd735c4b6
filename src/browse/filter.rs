//! Multi-select filters and the client-side result filter
//!
//! A restaurant passes when, for every field with a non-empty selection,
//! its value for that field is present and selected. Values within one
//! field are OR-ed; the two fields are AND-ed.

use crate::api::Restaurant;
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of selected labels
///
/// Order only affects how selected tags are displayed; membership is what
/// filtering looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    values: Vec<String>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `value` if selected, otherwise append it
    ///
    /// Returns true if the value is selected afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use gourmet::browse::SelectionSet;
    ///
    /// let mut set = SelectionSet::new();
    /// assert!(set.toggle("SoHo"));
    /// assert!(!set.toggle("SoHo"));
    /// assert!(set.is_empty());
    /// ```
    pub fn toggle(&mut self, value: &str) -> bool {
        if let Some(pos) = self.values.iter().position(|v| v == value) {
            self.values.remove(pos);
            false
        } else {
            self.values.push(value.to_string());
            true
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Selected values in the order they were first toggled on
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Whether an optional field value satisfies this selection
    ///
    /// An empty selection accepts everything, including `None`. A non-empty
    /// selection rejects `None`.
    pub fn admits(&self, value: Option<&str>) -> bool {
        if self.is_empty() {
            return true;
        }
        value.map_or(false, |v| self.contains(v))
    }
}

/// Neighborhood and cuisine selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub neighborhoods: SelectionSet,
    pub cuisines: SelectionSet,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_neighborhood(&mut self, neighborhood: &str) -> bool {
        self.neighborhoods.toggle(neighborhood)
    }

    pub fn toggle_cuisine(&mut self, cuisine: &str) -> bool {
        self.cuisines.toggle(cuisine)
    }

    /// Empty both selections at once
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when at least one value is selected in either field
    pub fn is_active(&self) -> bool {
        !self.neighborhoods.is_empty() || !self.cuisines.is_empty()
    }

    /// Whether a single restaurant passes both selections
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.neighborhoods.admits(restaurant.neighborhood.as_deref())
            && self.cuisines.admits(restaurant.cuisine_type.as_deref())
    }

    /// Restaurants that pass the selection, in their original order
    ///
    /// # Examples
    ///
    /// ```
    /// use gourmet::browse::FilterSelection;
    ///
    /// let filters = FilterSelection::new();
    /// assert!(filters.apply(&[]).is_empty());
    /// ```
    pub fn apply(&self, restaurants: &[Restaurant]) -> Vec<Restaurant> {
        restaurants
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}
