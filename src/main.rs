//! Gourmet - personal restaurant guide CLI
//!
#![doc = "Gourmet - personal restaurant guide CLI"]
#![doc = "Main entry point for the Gourmet client application."]

use anyhow::Result;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gourmet::api::{ApiClient, RestaurantApi};
use gourmet::browse::BookingPrefs;
use gourmet::cli::{Cli, Commands};
use gourmet::commands;
use gourmet::commands::restaurants::{ListArgs, UpdateArgs};
use gourmet::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let client = Arc::new(ApiClient::new(&config.api)?);
    tracing::debug!("Using directory service at {}", client.api_root());

    // Execute command
    match cli.command {
        Commands::List {
            query,
            neighborhood,
            cuisine,
            visited,
            monitored,
            page,
            json,
        } => {
            tracing::info!("Listing restaurants");
            let args = ListArgs {
                query,
                neighborhoods: neighborhood,
                cuisines: cuisine,
                visited,
                monitored,
                page,
                json,
            };
            commands::restaurants::list_restaurants(client.as_ref(), &config, args).await?;
            Ok(())
        }
        Commands::Show {
            id,
            date,
            party_size,
        } => {
            let prefs = BookingPrefs {
                date: commands::resolve_date(date.as_deref())?,
                party_size: party_size.unwrap_or(config.browse.default_party_size),
            };
            commands::restaurants::show_restaurant(client.as_ref(), id, prefs).await?;
            Ok(())
        }
        Commands::Stats { json } => {
            commands::restaurants::show_stats(client.as_ref(), json).await?;
            Ok(())
        }
        Commands::Visit { id } => {
            commands::restaurants::toggle_visited(client.as_ref(), id).await?;
            Ok(())
        }
        Commands::Update {
            id,
            name,
            notes,
            neighborhood,
            cuisine,
            priority,
            monitor,
        } => {
            let args = UpdateArgs {
                name,
                notes,
                neighborhood,
                cuisine,
                priority,
                monitor,
            };
            commands::restaurants::update_restaurant(client.as_ref(), id, args).await?;
            Ok(())
        }
        Commands::Watch { command } => {
            tracing::info!("Starting watch command");
            commands::watch::handle_watch(client.as_ref(), command).await?;
            Ok(())
        }
        Commands::Availability {
            ids,
            date,
            time,
            party_size,
            json,
        } => {
            let date = commands::resolve_date(date.as_deref())?;
            commands::availability::search(client.as_ref(), ids, date, time, party_size, json)
                .await?;
            Ok(())
        }
        Commands::Health => {
            commands::health::check(client.as_ref(), &config.api.base_url).await?;
            Ok(())
        }
        Commands::Browse { date, party_size } => {
            tracing::info!("Starting interactive browser");
            let date = commands::resolve_date(date.as_deref())?;
            let api: Arc<dyn RestaurantApi> = client;
            commands::browse::run_browse(api, &config, date, party_size).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "gourmet=debug" } else { "gourmet=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
