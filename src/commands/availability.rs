//! One-off reservation availability search

use crate::api::{AvailabilityRequest, AvailabilityResults, RestaurantApi, RestaurantId};
use crate::commands::print_json;
use crate::commands::restaurants::check_party_size;
use crate::error::{GourmetError, Result};

use chrono::{NaiveDate, NaiveTime};
use colored::Colorize;
use prettytable::{format, row, Table};

/// Search availability for the given restaurants
///
/// # Arguments
///
/// * `api` - Directory service gateway
/// * `ids` - Restaurants to search
/// * `date` - Reservation date
/// * `time` - Preferred time, `HH:MM`
/// * `party_size` - Number of guests
/// * `json` - Print the raw results as JSON
///
/// # Errors
///
/// Returns error if the arguments are invalid or the search fails
pub async fn search(
    api: &dyn RestaurantApi,
    ids: Vec<RestaurantId>,
    date: NaiveDate,
    time: String,
    party_size: u32,
    json: bool,
) -> Result<()> {
    let request = build_request(ids, date, time, party_size)?;
    let results = api.search_availability(&request).await?;

    if json {
        return print_json(&results);
    }

    let guests = if results.party_size == 1 { "guest" } else { "guests" };
    println!(
        "Availability on {} for {} {}",
        results.date.format("%Y-%m-%d"),
        results.party_size,
        guests
    );
    if results.results.values().all(Vec::is_empty) {
        println!("{}", "No open slots".dimmed());
        return Ok(());
    }
    slots_table(&results).printstd();
    Ok(())
}

/// Validate arguments into a search request
///
/// # Errors
///
/// Returns `InvalidInput` for an empty id list, a malformed time, or an
/// out-of-range party size
pub fn build_request(
    ids: Vec<RestaurantId>,
    date: NaiveDate,
    time: String,
    party_size: u32,
) -> Result<AvailabilityRequest> {
    if ids.is_empty() {
        return Err(GourmetError::InvalidInput("No restaurant ids given".to_string()).into());
    }
    check_party_size(party_size)?;
    NaiveTime::parse_from_str(&time, "%H:%M").map_err(|_| {
        GourmetError::InvalidInput(format!("Invalid time {}: expected HH:MM", time))
    })?;

    Ok(AvailabilityRequest {
        restaurant_ids: ids,
        date,
        time,
        party_size,
    })
}

fn slots_table(results: &AvailabilityResults) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "Restaurant".bold(),
        "Time".bold(),
        "Platform".bold(),
        "Link".bold()
    ]);

    for (id, slots) in &results.results {
        for slot in slots {
            table.add_row(row![id, slot.time, slot.platform, slot.booking_url]);
        }
    }

    table
}
