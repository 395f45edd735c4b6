//! Restaurant commands: list, show, stats, visit, update
//!
//! `list` fetches every matching page from the service and then applies the
//! multi-select neighborhood/cuisine filters and paging locally, the same
//! way the interactive browser does.

use crate::api::{
    ListQuery, Page, Priority, Restaurant, RestaurantApi, RestaurantId, RestaurantUpdate, Stats,
};
use crate::browse::booking::BookingPrefs;
use crate::browse::filter::FilterSelection;
use crate::browse::pager;
use crate::browse::render;
use crate::browse::session::{result_summary, LOAD_FAILED_MESSAGE};
use crate::commands::print_json;
use crate::config::{Config, MAX_PARTY_SIZE};
use crate::error::{GourmetError, Result};

use anyhow::Context;
use colored::Colorize;
use prettytable::{format, row, Table};

/// Arguments for [`list_restaurants`]
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub query: Option<String>,
    pub neighborhoods: Vec<String>,
    pub cuisines: Vec<String>,
    pub visited: Option<bool>,
    pub monitored: Option<bool>,
    pub page: u32,
    pub json: bool,
}

/// Fields accepted by [`update_restaurant`]; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateArgs {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub neighborhood: Option<String>,
    pub cuisine: Option<String>,
    pub priority: Option<String>,
    pub monitor: Option<bool>,
}

/// List restaurants as a table or JSON
///
/// # Arguments
///
/// * `api` - Directory service gateway
/// * `config` - Configuration (for the page size)
/// * `args` - Search text, filters, page, and output format
///
/// # Errors
///
/// Returns error if any listing page cannot be fetched
pub async fn list_restaurants(
    api: &dyn RestaurantApi,
    config: &Config,
    args: ListArgs,
) -> Result<()> {
    let query = ListQuery {
        visited: args.visited,
        monitor_enabled: args.monitored,
        ..ListQuery::search(args.query.as_deref().unwrap_or_default())
    };

    let mut filters = FilterSelection::new();
    for n in &args.neighborhoods {
        filters.toggle_neighborhood(n);
    }
    for c in &args.cuisines {
        filters.toggle_cuisine(c);
    }

    let all = api
        .list_all_matching(&query)
        .await
        .context(LOAD_FAILED_MESSAGE)?;
    let visible = filters.apply(&all);
    tracing::debug!(
        "{} of {} restaurants pass the filters",
        visible.len(),
        all.len()
    );

    let total = visible.len();
    let page = paginate(visible, args.page, config.browse.page_size);

    if args.json {
        return print_json(&page);
    }

    let filtered = is_filtered(&query, &filters);
    println!("{}", result_summary(total, filtered).dimmed());
    if page.items.is_empty() {
        println!("No restaurants found");
        println!("{}", "Try adjusting your filters".dimmed());
        return Ok(());
    }
    render::restaurant_table(&page.items).printstd();

    let pagination = render::render_pagination(page.page, page.total_pages);
    if !pagination.is_empty() {
        println!("{}", pagination);
    }
    Ok(())
}

/// Slice one page out of `items`, clamping `page` into range
///
/// There is always at least one page, even when `items` is empty.
pub fn paginate(items: Vec<Restaurant>, page: u32, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = pager::page_count(total, page_size);
    let page = page.clamp(1, total_pages);

    Page {
        items: items
            .into_iter()
            .skip(pager::page_offset(page, page_size))
            .take(page_size)
            .collect(),
        total: total as u64,
        page,
        per_page: u32::try_from(page_size).unwrap_or(u32::MAX),
        total_pages,
    }
}

/// Whether any server-side or local criterion narrows the listing
fn is_filtered(query: &ListQuery, filters: &FilterSelection) -> bool {
    query.query.is_some()
        || query.visited.is_some()
        || query.monitor_enabled.is_some()
        || filters.is_active()
}

/// Show one restaurant with booking links for the given date and party
///
/// # Errors
///
/// Returns error if the restaurant cannot be fetched or the party size is
/// out of range
pub async fn show_restaurant(
    api: &dyn RestaurantApi,
    id: RestaurantId,
    prefs: BookingPrefs,
) -> Result<()> {
    check_party_size(prefs.party_size)?;
    let restaurant = api.get_restaurant(id).await?;

    print!("{}", render::render_card(&restaurant, &prefs));
    println!("  Priority: {}", priority_label(restaurant.priority));
    if restaurant.monitor_enabled {
        println!("  {}", "Availability monitoring on".cyan());
    }
    if restaurant.booking_urls.is_empty() {
        println!("  {}", "No booking links".dimmed());
    } else {
        println!("  {}", render::render_preferences(&prefs).dimmed());
    }
    Ok(())
}

/// Reject party sizes outside `1..=MAX_PARTY_SIZE`
pub fn check_party_size(party_size: u32) -> Result<()> {
    if (1..=MAX_PARTY_SIZE).contains(&party_size) {
        Ok(())
    } else {
        Err(GourmetError::InvalidInput(format!(
            "Party size must be between 1 and {}, got {}",
            MAX_PARTY_SIZE, party_size
        ))
        .into())
    }
}

fn priority_label(priority: Priority) -> String {
    match priority {
        Priority::Urgent => priority.to_string().red().bold().to_string(),
        Priority::High => priority.to_string().yellow().to_string(),
        _ => priority.to_string(),
    }
}

/// Print collection statistics
///
/// # Errors
///
/// Returns error if the stats cannot be fetched
pub async fn show_stats(api: &dyn RestaurantApi, json: bool) -> Result<()> {
    let stats = api.get_stats().await?;
    if json {
        return print_json(&stats);
    }
    stats_table(&stats).printstd();
    Ok(())
}

fn stats_table(stats: &Stats) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["Restaurants".bold(), stats.total_restaurants]);
    table.add_row(row!["Visited".bold(), stats.visited]);
    table.add_row(row!["Not visited".bold(), stats.not_visited]);
    table.add_row(row!["Monitored".bold(), stats.monitored]);
    table.add_row(row!["Neighborhoods".bold(), join_or_dash(&stats.neighborhoods)]);
    table.add_row(row!["Cuisines".bold(), join_or_dash(&stats.cuisine_types)]);
    table
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

/// Flip the visited flag and print the new state
///
/// # Errors
///
/// Returns error if the service rejects the update
pub async fn toggle_visited(api: &dyn RestaurantApi, id: RestaurantId) -> Result<()> {
    let restaurant = api.toggle_visited(id).await?;
    let state = if restaurant.visited {
        "visited".green()
    } else {
        "not visited".yellow()
    };
    println!("{} is now {}", restaurant.name.bold(), state);
    Ok(())
}

/// Build the partial update body from CLI arguments
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown priority or when no field is set
pub fn build_update(args: UpdateArgs) -> Result<RestaurantUpdate> {
    let priority = args
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()
        .map_err(GourmetError::InvalidInput)?;

    let update = RestaurantUpdate {
        name: args.name,
        notes: args.notes,
        neighborhood: args.neighborhood,
        cuisine_type: args.cuisine,
        priority,
        monitor_enabled: args.monitor,
        ..Default::default()
    };

    if update.is_empty() {
        return Err(GourmetError::InvalidInput(
            "Nothing to update: pass at least one field".to_string(),
        )
        .into());
    }
    Ok(update)
}

/// Send a partial update and print the result
///
/// # Errors
///
/// Returns error if the arguments are invalid or the service rejects the
/// update
pub async fn update_restaurant(
    api: &dyn RestaurantApi,
    id: RestaurantId,
    args: UpdateArgs,
) -> Result<()> {
    let update = build_update(args)?;
    let restaurant = api.update_restaurant(id, &update).await?;
    println!("Updated {}", restaurant.name.bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BookingUrls;

    fn restaurant(id: i64) -> Restaurant {
        Restaurant {
            id,
            name: format!("Spot {}", id),
            visited: false,
            notes: String::new(),
            neighborhood: None,
            cuisine_type: None,
            booking_urls: BookingUrls::default(),
            monitor_enabled: false,
            priority: Priority::Normal,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_paginate_slices_and_clamps() {
        let items: Vec<Restaurant> = (1..=25).map(restaurant).collect();

        let page = paginate(items.clone(), 3, 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id, 21);

        let page = paginate(items, 9, 10);
        assert_eq!(page.page, 3);
    }

    #[test]
    fn test_paginate_empty_has_one_page() {
        let page = paginate(Vec::new(), 0, 24);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_paginate_matches_session_paging() {
        use crate::browse::session::{Action, SessionState};
        use crate::config::BrowseConfig;

        let items: Vec<Restaurant> = (1..=25).map(restaurant).collect();
        let config = BrowseConfig {
            page_size: 10,
            ..Default::default()
        };
        let mut state =
            SessionState::new(&config, chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        state.begin();
        state.update(Action::RestaurantsLoaded {
            seq: state.latest_request,
            result: Ok(items.clone()),
        });
        state.update(Action::SetPage(3));

        let page = paginate(items, 3, 10);
        assert_eq!(page.total_pages, state.total_pages());
        assert_eq!(page.items, state.page_items());
    }

    #[test]
    fn test_visited_and_monitored_flags_mark_filtered() {
        let filters = FilterSelection::new();
        assert!(!is_filtered(&ListQuery::search(""), &filters));

        let visited = ListQuery {
            visited: Some(false),
            ..ListQuery::search("")
        };
        assert!(is_filtered(&visited, &filters));

        let monitored = ListQuery {
            monitor_enabled: Some(true),
            ..ListQuery::search("")
        };
        assert!(is_filtered(&monitored, &filters));
        assert_eq!(
            result_summary(4, is_filtered(&monitored, &filters)),
            "4 results (filtered)"
        );
    }

    #[test]
    fn test_build_update_parses_priority() {
        let update = build_update(UpdateArgs {
            priority: Some("HIGH".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(update.priority, Some(Priority::High));
        assert!(update.name.is_none());
    }

    #[test]
    fn test_build_update_rejects_unknown_priority() {
        let err = build_update(UpdateArgs {
            priority: Some("someday".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("Invalid priority"));
    }

    #[test]
    fn test_build_update_requires_a_field() {
        assert!(build_update(UpdateArgs::default()).is_err());
    }

    #[test]
    fn test_check_party_size() {
        assert!(check_party_size(1).is_ok());
        assert!(check_party_size(8).is_ok());
        assert!(check_party_size(0).is_err());
        assert!(check_party_size(9).is_err());
    }

    #[test]
    fn test_stats_table_lists_labels() {
        let stats = Stats {
            total_restaurants: 3,
            neighborhoods: vec!["SoHo".to_string(), "Tribeca".to_string()],
            ..Default::default()
        };
        let rendered = stats_table(&stats).to_string();
        assert!(rendered.contains("SoHo, Tribeca"));
        assert!(rendered.contains('3'));
    }
}
