//! Client-side browsing model
//!
//! This module contains everything between the gateway and the terminal:
//!
//! - `debounce`: quiet-period text input and the cancellable timer behind it
//! - `filter`: multi-select neighborhood/cuisine filters
//! - `pager`: compact page window labels
//! - `booking`: booking links carrying date and party size
//! - `session`: session state and its reducer
//! - `runner`: runs reducer effects against the gateway
//! - `render`: terminal rendering
//! - `commands`: the interactive browser's command parser

pub mod booking;
pub mod commands;
pub mod debounce;
pub mod filter;
pub mod pager;
pub mod render;
pub mod runner;
pub mod session;

pub use booking::{booking_links, BookingLink, BookingPrefs, Platform};
pub use commands::{parse_browse_command, BrowseCommand, CommandError};
pub use debounce::{CancellableTimer, DebouncedInput};
pub use filter::{FilterSelection, SelectionSet};
pub use pager::{page_window, PageLabel};
pub use runner::EffectRunner;
pub use session::{Action, Effect, Listing, SessionState};
