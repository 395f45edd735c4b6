/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `restaurants`: list, show, stats, visit, and update
- `watch`: availability watch management
- `availability`: one-off availability search
- `browse`: the interactive browser
- `health`: service reachability check

Handlers take the gateway as `&dyn RestaurantApi` so they can be exercised
against a mock server.
*/

use crate::error::{GourmetError, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

pub mod availability;
pub mod browse;
pub mod restaurants;
pub mod watch;

// Service health check
pub mod health {
    //! Reachability check for the directory service.

    use crate::api::RestaurantApi;
    use crate::error::Result;
    use colored::Colorize;

    /// Ping `GET /health` and report the outcome
    ///
    /// # Errors
    ///
    /// Returns the gateway error if the service is unreachable or unhealthy
    pub async fn check(api: &dyn RestaurantApi, base_url: &str) -> Result<()> {
        tracing::info!("Checking service health at {}", base_url);
        api.health().await?;
        println!("{} {}", "OK".green().bold(), base_url);
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` argument, defaulting to today
///
/// # Errors
///
/// Returns `InvalidInput` if the value is not a calendar date
pub fn resolve_date(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        None => Ok(Local::now().date_naive()),
        Some(raw) => parse_date(raw),
    }
}

/// Parse a `YYYY-MM-DD` argument
///
/// # Errors
///
/// Returns `InvalidInput` if the value is not a calendar date
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        GourmetError::InvalidInput(format!("Invalid date {}: expected YYYY-MM-DD", raw)).into()
    })
}

/// Serialize a value as pretty JSON on stdout
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(GourmetError::Serialization)?;
    println!("{}", json);
    Ok(())
}
