//! Availability watch commands

use crate::api::{NewWatchConfig, RestaurantApi, RestaurantId, WatchConfig};
use crate::cli::WatchCommand;
use crate::commands::restaurants::check_party_size;
use crate::commands::{parse_date, print_json};
use crate::error::{GourmetError, Result};

use chrono::NaiveTime;
use colored::Colorize;
use prettytable::{format, row, Table};

/// Dispatch a `watch` subcommand
///
/// # Errors
///
/// Returns error if the arguments are invalid or the service call fails
pub async fn handle_watch(api: &dyn RestaurantApi, command: WatchCommand) -> Result<()> {
    match command {
        WatchCommand::Add {
            restaurant_id,
            party_size,
            from,
            until,
            times,
            email,
            sms,
        } => {
            let watch = build_watch(
                restaurant_id,
                party_size,
                from.as_deref(),
                until.as_deref(),
                times,
                email,
                sms,
            )?;
            let created = api.create_watch_config(&watch).await?;
            println!(
                "Created watch {} for restaurant {}",
                created.id.to_string().cyan(),
                created.restaurant_id
            );
            Ok(())
        }
        WatchCommand::List { json } => {
            let watches = api.list_watch_configs().await?;
            if json {
                return print_json(&watches);
            }
            if watches.is_empty() {
                println!("No watches configured");
                return Ok(());
            }
            watch_table(&watches).printstd();
            Ok(())
        }
        WatchCommand::Remove { id } => {
            api.delete_watch_config(id).await?;
            println!("Deleted watch {}", id);
            Ok(())
        }
    }
}

/// Validate CLI arguments into a watch creation body
///
/// Empty `times` falls back to the evening defaults.
///
/// # Errors
///
/// Returns `InvalidInput` for bad dates, an inverted range, malformed
/// times, or an out-of-range party size
pub fn build_watch(
    restaurant_id: RestaurantId,
    party_size: u32,
    from: Option<&str>,
    until: Option<&str>,
    times: Vec<String>,
    email: Option<String>,
    sms: Option<String>,
) -> Result<NewWatchConfig> {
    check_party_size(party_size)?;

    let date_range_start = from.map(parse_date).transpose()?;
    let date_range_end = until.map(parse_date).transpose()?;
    if let (Some(start), Some(end)) = (date_range_start, date_range_end) {
        if end < start {
            return Err(GourmetError::InvalidInput(format!(
                "Watch range ends ({}) before it starts ({})",
                end, start
            ))
            .into());
        }
    }

    for time in &times {
        NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
            GourmetError::InvalidInput(format!("Invalid time {}: expected HH:MM", time))
        })?;
    }

    let mut watch = NewWatchConfig::new(restaurant_id);
    watch.party_size = party_size;
    watch.date_range_start = date_range_start;
    watch.date_range_end = date_range_end;
    if !times.is_empty() {
        watch.preferred_times = times;
    }
    watch.notify_email = email;
    watch.notify_sms = sms;
    Ok(watch)
}

fn watch_table(watches: &[WatchConfig]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "ID".bold(),
        "Restaurant".bold(),
        "Party".bold(),
        "Dates".bold(),
        "Times".bold(),
        "Active".bold(),
        "Last checked".bold()
    ]);

    for w in watches {
        let dates = match (w.date_range_start, w.date_range_end) {
            (Some(start), Some(end)) => format!("{} to {}", start, end),
            (Some(start), None) => format!("from {}", start),
            (None, Some(end)) => format!("until {}", end),
            (None, None) => "any".to_string(),
        };
        let active = if w.active { "yes" } else { "no" };
        table.add_row(row![
            w.id,
            w.restaurant_id,
            w.party_size,
            dates,
            w.preferred_times.join(", "),
            active,
            w.last_checked.as_deref().unwrap_or("never")
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::default_preferred_times;
    use chrono::NaiveDate;

    #[test]
    fn test_build_watch_defaults() {
        let watch = build_watch(4, 2, None, None, Vec::new(), None, None).unwrap();
        assert_eq!(watch.restaurant_id, 4);
        assert_eq!(watch.preferred_times, default_preferred_times());
        assert!(watch.date_range_start.is_none());
    }

    #[test]
    fn test_build_watch_with_range_and_times() {
        let watch = build_watch(
            4,
            6,
            Some("2025-07-01"),
            Some("2025-07-31"),
            vec!["21:15".to_string()],
            Some("me@example.com".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(watch.party_size, 6);
        assert_eq!(
            watch.date_range_end,
            Some(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap())
        );
        assert_eq!(watch.preferred_times, vec!["21:15".to_string()]);
        assert_eq!(watch.notify_email.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn test_build_watch_rejects_inverted_range() {
        let result = build_watch(
            1,
            2,
            Some("2025-08-02"),
            Some("2025-08-01"),
            Vec::new(),
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_watch_rejects_bad_time() {
        let result = build_watch(1, 2, None, None, vec!["7pm".to_string()], None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_watch_rejects_party_size() {
        assert!(build_watch(1, 0, None, None, Vec::new(), None, None).is_err());
    }

    #[test]
    fn test_watch_table_formats_ranges() {
        let watch = WatchConfig {
            id: 9,
            restaurant_id: 4,
            party_size: 2,
            date_range_start: NaiveDate::from_ymd_opt(2025, 7, 1),
            date_range_end: None,
            preferred_times: default_preferred_times(),
            notify_email: None,
            notify_sms: None,
            active: true,
            last_checked: None,
            created_at: String::new(),
        };
        let rendered = watch_table(&[watch]).to_string();
        assert!(rendered.contains("from 2025-07-01"));
        assert!(rendered.contains("18:00, 19:00, 20:00"));
        assert!(rendered.contains("never"));
    }
}
