//! Command-line interface definition for Gourmet
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for listing and updating restaurants, managing
//! availability watches, and the interactive browser.

use clap::{Parser, Subcommand};

/// Gourmet - Browse and book from a personal restaurant guide
///
/// Talks to the restaurant directory service to list, filter, and update
/// saved restaurants, and opens booking pages for a chosen date and party.
#[derive(Parser, Debug, Clone)]
#[command(name = "gourmet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the directory service origin (e.g. http://localhost:8000)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Gourmet
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List restaurants
    List {
        /// Free-text search over name, notes, neighborhood, and cuisine
        query: Option<String>,

        /// Only show these neighborhoods (repeatable)
        #[arg(short, long)]
        neighborhood: Vec<String>,

        /// Only show these cuisines (repeatable)
        #[arg(short, long)]
        cuisine: Vec<String>,

        /// Only show visited (true) or unvisited (false) restaurants
        #[arg(long)]
        visited: Option<bool>,

        /// Only show restaurants with availability monitoring on or off
        #[arg(long)]
        monitored: Option<bool>,

        /// Page to show, using the configured page size
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one restaurant with its booking links
    Show {
        /// Restaurant ID
        id: i64,

        /// Reservation date for booking links (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Party size for booking links
        #[arg(short = 's', long)]
        party_size: Option<u32>,
    },

    /// Show collection statistics
    Stats {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Toggle the visited flag of a restaurant
    Visit {
        /// Restaurant ID
        id: i64,
    },

    /// Update fields of a restaurant
    Update {
        /// Restaurant ID
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New notes
        #[arg(long)]
        notes: Option<String>,

        /// New neighborhood
        #[arg(long)]
        neighborhood: Option<String>,

        /// New cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// Priority (normal, high, urgent)
        #[arg(long)]
        priority: Option<String>,

        /// Turn availability monitoring on or off
        #[arg(long)]
        monitor: Option<bool>,
    },

    /// Manage availability watches
    Watch {
        /// Watch subcommand
        #[command(subcommand)]
        command: WatchCommand,
    },

    /// Search reservation availability
    Availability {
        /// Restaurant IDs to search
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Date to search (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Preferred time (HH:MM)
        #[arg(short, long, default_value = "19:00")]
        time: String,

        /// Party size
        #[arg(short = 's', long, default_value_t = 2)]
        party_size: u32,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Check that the directory service is reachable
    Health,

    /// Browse interactively with live search, filters, and pages
    Browse {
        /// Reservation date for booking links (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Party size for booking links
        #[arg(short = 's', long)]
        party_size: Option<u32>,
    },
}

/// Availability watch subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum WatchCommand {
    /// Create a watch for a restaurant
    Add {
        /// Restaurant ID
        restaurant_id: i64,

        /// Party size
        #[arg(short = 's', long, default_value_t = 2)]
        party_size: u32,

        /// First date to watch (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last date to watch (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,

        /// Preferred time (HH:MM, repeatable; default 18:00, 19:00, 20:00)
        #[arg(short, long = "time")]
        times: Vec<String>,

        /// Email address to notify
        #[arg(long)]
        email: Option<String>,

        /// Phone number to notify by SMS
        #[arg(long)]
        sms: Option<String>,
    },

    /// List watches
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Delete a watch
    Remove {
        /// Watch ID
        id: i64,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            api_base: None,
            command: Commands::Health,
        }
    }
}
