//! Command parser for the interactive browser
//!
//! Lines starting with `/` are commands; anything else is search text that
//! goes through the debounced input. Command words are case-insensitive,
//! arguments (neighborhood and cuisine labels) are kept as typed.

use crate::api::RestaurantId;
use crate::config::MAX_PARTY_SIZE;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when parsing browse commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Commands available in the interactive browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Raw search text; committed after the debounce window
    Search(String),
    /// Empty the search box and commit immediately
    ClearSearch,
    ToggleNeighborhood(String),
    ToggleCuisine(String),
    ClearFilters,
    /// Clear the search and all filters
    Reset,
    /// Show the neighborhood/cuisine options
    ShowFilters,
    Page(u32),
    NextPage,
    PrevPage,
    Date(NaiveDate),
    PartySize(u32),
    ToggleVisited(RestaurantId),
    Retry,
    /// Redraw the current view
    Show,
    Help,
    Exit,
    /// Blank line
    None,
}

/// Parse one line of input
///
/// # Examples
///
/// ```
/// use gourmet::browse::{parse_browse_command, BrowseCommand};
///
/// assert_eq!(
///     parse_browse_command("/n West Village").unwrap(),
///     BrowseCommand::ToggleNeighborhood("West Village".to_string())
/// );
/// assert_eq!(
///     parse_browse_command("dumplings").unwrap(),
///     BrowseCommand::Search("dumplings".to_string())
/// );
/// assert!(parse_browse_command("/bogus").is_err());
/// ```
pub fn parse_browse_command(input: &str) -> Result<BrowseCommand, CommandError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Ok(BrowseCommand::None);
    }

    let lower = trimmed.to_lowercase();
    if lower == "exit" || lower == "quit" {
        return Ok(BrowseCommand::Exit);
    }

    if !trimmed.starts_with('/') {
        return Ok(BrowseCommand::Search(trimmed.to_string()));
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match word.as_str() {
        "/search" | "/s" => {
            if rest.is_empty() {
                Ok(BrowseCommand::ClearSearch)
            } else {
                Ok(BrowseCommand::Search(rest.to_string()))
            }
        }
        "/neighborhood" | "/n" => {
            required(&word, rest, "/n <neighborhood>").map(BrowseCommand::ToggleNeighborhood)
        }
        "/cuisine" | "/c" => {
            required(&word, rest, "/c <cuisine>").map(BrowseCommand::ToggleCuisine)
        }
        "/clear" => Ok(BrowseCommand::ClearFilters),
        "/reset" => Ok(BrowseCommand::Reset),
        "/filters" | "/f" => Ok(BrowseCommand::ShowFilters),
        "/page" | "/p" => {
            let arg = required(&word, rest, "/page <number>")?;
            arg.parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .map(BrowseCommand::Page)
                .ok_or(CommandError::UnsupportedArgument {
                    command: word.clone(),
                    arg,
                })
        }
        "/next" => Ok(BrowseCommand::NextPage),
        "/prev" => Ok(BrowseCommand::PrevPage),
        "/date" => {
            let arg = required(&word, rest, "/date <YYYY-MM-DD>")?;
            NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
                .map(BrowseCommand::Date)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: word.clone(),
                    arg,
                })
        }
        "/party" => {
            let arg = required(&word, rest, "/party <1-8>")?;
            arg.parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_PARTY_SIZE).contains(n))
                .map(BrowseCommand::PartySize)
                .ok_or(CommandError::UnsupportedArgument {
                    command: word.clone(),
                    arg,
                })
        }
        "/visit" | "/v" => {
            let arg = required(&word, rest, "/visit <restaurant id>")?;
            arg.parse::<RestaurantId>()
                .map(BrowseCommand::ToggleVisited)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: word.clone(),
                    arg,
                })
        }
        "/retry" | "/r" => Ok(BrowseCommand::Retry),
        "/show" | "/ls" => Ok(BrowseCommand::Show),
        "/help" | "/?" => Ok(BrowseCommand::Help),
        "/exit" | "/quit" | "/q" => Ok(BrowseCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn required(command: &str, rest: &str, usage: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        })
    } else {
        Ok(rest.to_string())
    }
}

/// Print help for the interactive browser
pub fn print_help() {
    println!(
        r#"
Interactive Browser Commands
============================

SEARCH:
  <text>              - Search names, notes, neighborhoods, and cuisines
  /search <text>      - Same as typing the text
  /search             - Clear the search

FILTERS:
  /filters            - Show neighborhood and cuisine options
  /n <neighborhood>   - Toggle a neighborhood filter
  /c <cuisine>        - Toggle a cuisine filter
  /clear              - Remove all filters
  /reset              - Clear the search and all filters

PAGES:
  /next, /prev        - Move one page
  /page <number>      - Jump to a page

RESERVATION:
  /date <YYYY-MM-DD>  - Date used in booking links
  /party <1-8>        - Party size used in booking links

RESTAURANTS:
  /visit <id>         - Toggle visited
  /retry              - Reload after a failure
  /show               - Redraw the current page

  /help               - Show this help
  /exit, exit, quit   - Leave the browser
"#
    );
}
