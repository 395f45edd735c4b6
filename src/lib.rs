//! Gourmet - client library for a personal restaurant guide
//!
//! This library provides the client side of a restaurant directory service:
//! a typed HTTP gateway, a browse session with live search, multi-select
//! filters and pages, and the CLI command handlers built on them.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: wire types and the `RestaurantApi` gateway (reqwest)
//! - `browse`: debounced input, filters, page window, session reducer, and
//!   rendering
//! - `commands`: CLI command handlers, including the interactive browser
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use gourmet::api::{ApiClient, RestaurantApi};
//! use gourmet::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let client = ApiClient::new(&config.api)?;
//!     let everything = client.list_all_restaurants("").await?;
//!     println!("{} restaurants", everything.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod browse;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use api::{ApiClient, RestaurantApi};
pub use browse::{FilterSelection, SessionState};
pub use config::Config;
pub use error::{GourmetError, Result};
