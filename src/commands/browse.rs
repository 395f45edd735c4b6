//! Interactive browser
//!
//! A readline thread feeds lines into a Tokio loop that owns the session.
//! The loop `select!`s over three sources: typed lines, debounced search
//! commits, and gateway completions reported by the [`EffectRunner`]. The
//! view is redrawn whenever the session state changes.
//!
//! The readline thread waits for a go-ahead before showing each prompt, so
//! the prompt never appears while a command is still being handled.

use crate::api::RestaurantApi;
use crate::browse::commands::{parse_browse_command, print_help, BrowseCommand};
use crate::browse::debounce::DebouncedInput;
use crate::browse::filter::SelectionSet;
use crate::browse::render;
use crate::browse::runner::EffectRunner;
use crate::browse::session::{Action, SessionState};
use crate::commands::restaurants::check_party_size;
use crate::config::Config;
use crate::error::Result;

use chrono::NaiveDate;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Whether the loop should keep going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Owns the session and connects it to input and the gateway
pub struct BrowseDriver {
    state: SessionState,
    search: DebouncedInput,
    runner: EffectRunner,
    echo: bool,
}

impl BrowseDriver {
    /// Create a driver; `echo` controls whether views are printed
    pub fn new(
        state: SessionState,
        search: DebouncedInput,
        runner: EffectRunner,
        echo: bool,
    ) -> Self {
        Self {
            state,
            search,
            runner,
            echo,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Issue the initial listing and stats fetches
    pub fn start(&mut self) {
        let effects = self.state.begin();
        self.runner.run_all(effects);
        self.show(&render::render_session(&self.state));
    }

    /// Feed one action through the reducer and run its effects
    ///
    /// Returns true when the state changed (and the view was redrawn).
    pub fn dispatch(&mut self, action: Action) -> bool {
        let before = self.state.clone();
        let effects = self.state.update(action);
        self.runner.run_all(effects);

        let changed = self.state != before;
        if changed {
            self.show(&render::render_session(&self.state));
        }
        changed
    }

    /// Act on one parsed command
    pub fn handle(&mut self, command: BrowseCommand) -> Flow {
        match command {
            BrowseCommand::Search(text) => self.search.input(text),
            BrowseCommand::ClearSearch => self.search.clear(),
            BrowseCommand::ToggleNeighborhood(value) => {
                let options = self.state.stats.as_ref().map(|s| s.neighborhoods.as_slice());
                match resolve_label(options, &self.state.filters.neighborhoods, &value) {
                    Some(label) => {
                        self.dispatch(Action::ToggleNeighborhood(label));
                    }
                    None => self.unknown_label("neighborhood", &value),
                }
            }
            BrowseCommand::ToggleCuisine(value) => {
                let options = self.state.stats.as_ref().map(|s| s.cuisine_types.as_slice());
                match resolve_label(options, &self.state.filters.cuisines, &value) {
                    Some(label) => {
                        self.dispatch(Action::ToggleCuisine(label));
                    }
                    None => self.unknown_label("cuisine", &value),
                }
            }
            BrowseCommand::ClearFilters => {
                self.dispatch(Action::ClearFilters);
            }
            BrowseCommand::Reset => {
                self.dispatch(Action::Reset);
                // A commit still in flight would undo the reset.
                self.search.sync(self.state.search.clone());
            }
            BrowseCommand::ShowFilters => match &self.state.stats {
                Some(stats) => self.show(&render::render_filter_bar(stats, &self.state.filters)),
                None => self.show(&"Filter options are unavailable".dimmed().to_string()),
            },
            BrowseCommand::Page(page) => {
                self.dispatch(Action::SetPage(page));
            }
            BrowseCommand::NextPage => {
                self.dispatch(Action::NextPage);
            }
            BrowseCommand::PrevPage => {
                self.dispatch(Action::PrevPage);
            }
            BrowseCommand::Date(date) => {
                self.dispatch(Action::SetDate(date));
            }
            BrowseCommand::PartySize(size) => {
                self.dispatch(Action::SetPartySize(size));
            }
            BrowseCommand::ToggleVisited(id) => {
                self.dispatch(Action::ToggleVisited(id));
            }
            BrowseCommand::Retry => {
                self.dispatch(Action::Retry);
            }
            BrowseCommand::Show => self.show(&render::render_session(&self.state)),
            BrowseCommand::Help => {
                if self.echo {
                    print_help();
                }
            }
            BrowseCommand::Exit => return Flow::Exit,
            BrowseCommand::None => {}
        }
        Flow::Continue
    }

    fn unknown_label(&self, kind: &str, typed: &str) {
        tracing::debug!("Unknown {} label: {}", kind, typed);
        self.show(
            &format!("Unknown {}: {} (see /filters)", kind, typed)
                .yellow()
                .to_string(),
        );
    }

    fn show(&self, text: &str) {
        if self.echo {
            println!("{}", text);
        }
    }
}

/// Match a typed label against the known options, ignoring ASCII case
///
/// Without options (stats not loaded) the label is used as typed. A
/// currently selected value always resolves so it can be removed.
fn resolve_label(
    options: Option<&[String]>,
    selected: &SelectionSet,
    typed: &str,
) -> Option<String> {
    let Some(options) = options else {
        return Some(typed.to_string());
    };
    options
        .iter()
        .map(String::as_str)
        .chain(selected.iter())
        .find(|label| label.eq_ignore_ascii_case(typed))
        .map(str::to_string)
}

/// Run the interactive browser until the user exits
///
/// # Arguments
///
/// * `api` - Directory service gateway
/// * `config` - Configuration (debounce window, page size, default party)
/// * `date` - Initial reservation date
/// * `party_size` - Initial party size; the configured default if `None`
///
/// # Errors
///
/// Returns error if the party size is out of range
pub async fn run_browse(
    api: Arc<dyn RestaurantApi>,
    config: &Config,
    date: NaiveDate,
    party_size: Option<u32>,
) -> Result<()> {
    let mut state = SessionState::new(&config.browse, date);
    if let Some(size) = party_size {
        check_party_size(size)?;
        state.booking.party_size = size;
    }

    let (actions_tx, mut actions_rx) = mpsc::unbounded_channel();
    let (search, mut commits) = DebouncedInput::new(config.browse.debounce());
    let runner = EffectRunner::new(api, actions_tx);
    let mut driver = BrowseDriver::new(state, search, runner, true);

    let (lines_tx, mut lines_rx) = mpsc::unbounded_channel();
    let (ready_tx, ready_rx) = std_mpsc::channel();
    spawn_reader(lines_tx, ready_rx);

    println!(
        "{} Type to search, {} for commands.\n",
        "Gourmet".bold(),
        "/help".cyan()
    );
    driver.start();
    if ready_tx.send(()).is_err() {
        return Ok(());
    }

    loop {
        tokio::select! {
            line = lines_rx.recv() => {
                let Some(line) = line else { break };
                match parse_browse_command(&line) {
                    Ok(command) => {
                        if driver.handle(command) == Flow::Exit {
                            break;
                        }
                    }
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
                if ready_tx.send(()).is_err() {
                    break;
                }
            }
            Some(search) = commits.recv() => {
                driver.dispatch(Action::SearchCommitted(search));
            }
            Some(action) = actions_rx.recv() => {
                driver.dispatch(action);
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Read lines on a dedicated thread, one prompt per go-ahead
fn spawn_reader(lines: mpsc::UnboundedSender<String>, ready: std_mpsc::Receiver<()>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to start line editor: {}", e);
                return;
            }
        };

        while ready.recv().is_ok() {
            match rl.readline(&format!("{} ", "gourmet>".green())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        if let Err(e) = rl.add_history_entry(trimmed) {
                            tracing::debug!("Could not record history: {}", e);
                        }
                    }
                    if lines.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        AvailabilityRequest, AvailabilityResults, BookingUrls, ListQuery, NewWatchConfig, Page,
        Priority, Restaurant, RestaurantId, RestaurantUpdate, Stats, WatchConfig,
    };
    use crate::config::BrowseConfig;
    use crate::error::GourmetError;
    use async_trait::async_trait;
    use std::time::Duration;

    struct StaticApi {
        items: Vec<Restaurant>,
    }

    #[async_trait]
    impl RestaurantApi for StaticApi {
        async fn list_restaurants(&self, _query: &ListQuery) -> Result<Page> {
            Ok(Page {
                items: self.items.clone(),
                total: self.items.len() as u64,
                page: 1,
                per_page: 100,
                total_pages: 1,
            })
        }

        async fn get_restaurant(&self, id: RestaurantId) -> Result<Restaurant> {
            self.items
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(unavailable)
        }

        async fn get_stats(&self) -> Result<Stats> {
            Ok(Stats {
                neighborhoods: vec!["SoHo".to_string(), "Tribeca".to_string()],
                cuisine_types: vec!["Thai".to_string()],
                ..Default::default()
            })
        }

        async fn toggle_visited(&self, id: RestaurantId) -> Result<Restaurant> {
            let mut r = self.get_restaurant(id).await?;
            r.visited = !r.visited;
            Ok(r)
        }

        async fn update_restaurant(
            &self,
            _id: RestaurantId,
            _update: &RestaurantUpdate,
        ) -> Result<Restaurant> {
            Err(unavailable())
        }

        async fn create_watch_config(&self, _watch: &NewWatchConfig) -> Result<WatchConfig> {
            Err(unavailable())
        }

        async fn list_watch_configs(&self) -> Result<Vec<WatchConfig>> {
            Ok(Vec::new())
        }

        async fn delete_watch_config(&self, _id: i64) -> Result<()> {
            Ok(())
        }

        async fn search_availability(
            &self,
            _request: &AvailabilityRequest,
        ) -> Result<AvailabilityResults> {
            Err(unavailable())
        }

        async fn health(&self) -> Result<()> {
            Ok(())
        }
    }

    fn unavailable() -> anyhow::Error {
        GourmetError::Status {
            endpoint: "/test".to_string(),
            status: 404,
        }
        .into()
    }

    fn restaurant(id: i64, neighborhood: &str) -> Restaurant {
        Restaurant {
            id,
            name: format!("Place {}", id),
            visited: false,
            notes: String::new(),
            neighborhood: Some(neighborhood.to_string()),
            cuisine_type: Some("Thai".to_string()),
            booking_urls: BookingUrls::default(),
            monitor_enabled: false,
            priority: Priority::Normal,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn driver(
        items: Vec<Restaurant>,
    ) -> (
        BrowseDriver,
        mpsc::UnboundedReceiver<Action>,
        mpsc::UnboundedReceiver<String>,
    ) {
        let config = BrowseConfig::default();
        let state = SessionState::new(&config, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let (tx, rx) = mpsc::unbounded_channel();
        let (search, commits) = DebouncedInput::new(Duration::from_millis(300));
        let runner = EffectRunner::new(Arc::new(StaticApi { items }), tx);
        (BrowseDriver::new(state, search, runner, false), rx, commits)
    }

    async fn pump(driver: &mut BrowseDriver, rx: &mut mpsc::UnboundedReceiver<Action>, n: usize) {
        for _ in 0..n {
            let action = rx.recv().await.unwrap();
            driver.dispatch(action);
        }
    }

    #[tokio::test]
    async fn test_start_loads_listing_and_stats() {
        let (mut driver, mut rx, _commits) = driver(vec![restaurant(1, "SoHo")]);
        driver.start();
        pump(&mut driver, &mut rx, 2).await;
        assert_eq!(driver.state().visible().len(), 1);
        assert!(driver.state().stats.is_some());
    }

    #[tokio::test]
    async fn test_filter_label_matches_case_insensitively() {
        let items = vec![restaurant(1, "SoHo"), restaurant(2, "Tribeca")];
        let (mut driver, mut rx, _commits) = driver(items);
        driver.start();
        pump(&mut driver, &mut rx, 2).await;

        driver.handle(BrowseCommand::ToggleNeighborhood("soho".to_string()));
        assert!(driver.state().filters.neighborhoods.contains("SoHo"));
        pump(&mut driver, &mut rx, 1).await;
        assert_eq!(driver.state().result_summary(), "1 results (filtered)");
    }

    #[tokio::test]
    async fn test_unknown_label_is_not_toggled() {
        let (mut driver, mut rx, _commits) = driver(vec![restaurant(1, "SoHo")]);
        driver.start();
        pump(&mut driver, &mut rx, 2).await;

        let seq = driver.state().latest_request;
        driver.handle(BrowseCommand::ToggleCuisine("Martian".to_string()));
        assert!(!driver.state().filters.is_active());
        assert_eq!(driver.state().latest_request, seq);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typed_search_commits_after_debounce() {
        let (mut driver, _rx, mut commits) = driver(Vec::new());
        driver.handle(BrowseCommand::Search("pho".to_string()));
        driver.handle(BrowseCommand::Search("pho ga".to_string()));
        assert_eq!(commits.recv().await.as_deref(), Some("pho ga"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_drops_pending_search() {
        let (mut driver, _rx, mut commits) = driver(Vec::new());
        driver.handle(BrowseCommand::Search("tacos".to_string()));
        driver.handle(BrowseCommand::ToggleNeighborhood("SoHo".to_string()));

        driver.handle(BrowseCommand::Reset);
        assert!(!driver.state().is_filtered());
        assert_eq!(driver.search.local(), "");
        assert!(!driver.search.is_pending());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(commits.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_visit_replaces_restaurant() {
        let (mut driver, mut rx, _commits) = driver(vec![restaurant(5, "SoHo")]);
        driver.start();
        pump(&mut driver, &mut rx, 2).await;

        driver.handle(BrowseCommand::ToggleVisited(5));
        pump(&mut driver, &mut rx, 1).await;
        assert!(driver.state().visible()[0].visited);
    }

    #[test]
    fn test_resolve_label() {
        let options = vec!["SoHo".to_string(), "West Village".to_string()];
        let mut selected = SelectionSet::new();
        assert_eq!(
            resolve_label(Some(options.as_slice()), &selected, "west village"),
            Some("West Village".to_string())
        );
        assert_eq!(resolve_label(Some(options.as_slice()), &selected, "Harlem"), None);
        assert_eq!(
            resolve_label(None, &selected, "Harlem"),
            Some("Harlem".to_string())
        );

        selected.toggle("Harlem");
        assert_eq!(
            resolve_label(Some(options.as_slice()), &selected, "harlem"),
            Some("Harlem".to_string())
        );
    }

    #[tokio::test]
    async fn test_exit_stops_loop() {
        let (mut driver, _rx, _commits) = driver(Vec::new());
        assert_eq!(driver.handle(BrowseCommand::Show), Flow::Continue);
        assert_eq!(driver.handle(BrowseCommand::Exit), Flow::Exit);
    }
}
