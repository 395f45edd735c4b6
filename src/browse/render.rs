//! Terminal rendering of the browse session
//!
//! Every function here is a pure `&state -> String` projection; printing is
//! left to the caller.

use crate::api::{Restaurant, Stats};
use crate::browse::booking::{booking_links, BookingPrefs};
use crate::browse::filter::FilterSelection;
use crate::browse::pager::{self, PageLabel};
use crate::browse::session::{Listing, SessionState};

use colored::Colorize;
use prettytable::{format, Table};
use std::fmt::Write;

/// One restaurant as a short card
///
/// ```text
/// Lilia ✓
///   Williamsburg · Italian
///   "the mafaldine"
///   Book: Resy <url>
/// ```
pub fn render_card(restaurant: &Restaurant, prefs: &BookingPrefs) -> String {
    let mut out = String::new();

    let mut title = format!("{}", restaurant.name.bold());
    if restaurant.visited {
        title.push_str(&format!(" {}", "✓".green()));
    }
    let _ = writeln!(out, "{}  {}", title, format!("#{}", restaurant.id).dimmed());

    let labels: Vec<&str> = [
        restaurant.neighborhood.as_deref(),
        restaurant.cuisine_type.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !labels.is_empty() {
        let _ = writeln!(out, "  {}", labels.join(" · ").dimmed());
    }

    if !restaurant.notes.is_empty() {
        let _ = writeln!(out, "  {}", format!("\"{}\"", restaurant.notes).italic());
    }

    for link in booking_links(&restaurant.booking_urls, prefs) {
        let _ = writeln!(out, "  Book: {} {}", link.platform, link.url.underline());
    }

    out
}

/// Filter options with selection marks, then the selected tags
pub fn render_filter_bar(stats: &Stats, filters: &FilterSelection) -> String {
    let mut out = String::new();

    let count = |n: usize| if n > 0 { format!(" ({})", n) } else { String::new() };
    let _ = writeln!(
        out,
        "{}",
        format!("Neighborhood{}", count(filters.neighborhoods.len())).bold()
    );
    for n in &stats.neighborhoods {
        let mark = if filters.neighborhoods.contains(n) { "[x]" } else { "[ ]" };
        let _ = writeln!(out, "  {} {}", mark, n);
    }

    let _ = writeln!(
        out,
        "{}",
        format!("Cuisine{}", count(filters.cuisines.len())).bold()
    );
    for c in &stats.cuisine_types {
        let mark = if filters.cuisines.contains(c) { "[x]" } else { "[ ]" };
        let _ = writeln!(out, "  {} {}", mark, c);
    }

    if let Some(tags) = render_selected_tags(filters) {
        let _ = writeln!(out, "{}", tags);
    }

    out
}

/// Selected values as tags, neighborhoods first; `None` when nothing is
/// selected
pub fn render_selected_tags(filters: &FilterSelection) -> Option<String> {
    if !filters.is_active() {
        return None;
    }
    let tags: Vec<String> = filters
        .neighborhoods
        .iter()
        .chain(filters.cuisines.iter())
        .map(|t| format!("[{} ×]", t))
        .collect();
    Some(format!("Filters: {}  (/clear to remove all)", tags.join(" ")))
}

/// "Prev 1 … 4 [5] 6 … 10 Next"; empty when there is a single page
pub fn render_pagination(current: u32, total: u32) -> String {
    let labels = pager::page_window(current, total);
    if labels.is_empty() {
        return String::new();
    }

    let mut parts = Vec::with_capacity(labels.len() + 2);
    parts.push(if pager::has_prev(current) {
        "Prev".to_string()
    } else {
        "Prev".dimmed().to_string()
    });
    for label in labels {
        parts.push(match label {
            PageLabel::Page(n) if n == current => format!("[{}]", n).bold().to_string(),
            PageLabel::Page(n) => n.to_string(),
            PageLabel::Ellipsis => label.to_string().dimmed().to_string(),
        });
    }
    parts.push(if pager::has_next(current, total) {
        "Next".to_string()
    } else {
        "Next".dimmed().to_string()
    });

    parts.join(" ")
}

/// Header line with the booking preferences
pub fn render_preferences(prefs: &BookingPrefs) -> String {
    let guests = if prefs.party_size == 1 { "guest" } else { "guests" };
    format!(
        "Reservation: {} · {} {}",
        prefs.date.format("%Y-%m-%d"),
        prefs.party_size,
        guests
    )
}

/// The whole browse view
pub fn render_session(state: &SessionState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", render_preferences(&state.booking).dimmed());
    if !state.search.is_empty() {
        let _ = writeln!(out, "Search: {}", state.search.cyan());
    }
    // Tags belong to the filter bar, which needs stats for its options.
    if state.stats.is_some() {
        if let Some(tags) = render_selected_tags(&state.filters) {
            let _ = writeln!(out, "{}", tags);
        }
    }

    match &state.listing {
        Listing::Idle => {}
        Listing::Loading => {
            let _ = writeln!(out, "{}", "Loading restaurants...".dimmed());
        }
        Listing::Failed(message) => {
            let _ = writeln!(out, "{}", message.red());
            let _ = writeln!(out, "Type {} to try again.", "/retry".cyan());
        }
        Listing::Loaded(_) => {
            let _ = writeln!(out, "{}\n", state.result_summary().dimmed());
            let items = state.page_items();
            if items.is_empty() {
                let _ = writeln!(out, "No restaurants found");
                let _ = writeln!(out, "{}", "Try adjusting your filters".dimmed());
            } else {
                for restaurant in &items {
                    let _ = writeln!(out, "{}", render_card(restaurant, &state.booking));
                }
            }
            let pagination = render_pagination(state.page, state.total_pages());
            if !pagination.is_empty() {
                let _ = writeln!(out, "{}", pagination);
            }
        }
    }

    if let Some(notice) = &state.notice {
        let _ = writeln!(out, "{}", notice.yellow());
    }

    out
}

/// Restaurants as a bordered table for the `list` command
pub fn restaurant_table(restaurants: &[Restaurant]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Name".bold(),
        "Neighborhood".bold(),
        "Cuisine".bold(),
        "Visited".bold(),
        "Priority".bold()
    ]);

    for r in restaurants {
        let visited = if r.visited { "yes" } else { "no" };
        table.add_row(prettytable::row![
            r.id.to_string().cyan(),
            r.name,
            r.neighborhood.as_deref().unwrap_or("-"),
            r.cuisine_type.as_deref().unwrap_or("-"),
            visited,
            r.priority
        ]);
    }

    table
}
