//! Executes session effects against the gateway
//!
//! Each effect runs on its own task and reports back by sending an
//! [`Action`] on the session's channel. Completions may arrive in any
//! order; the reducer's sequence check decides which listing wins.

use crate::api::RestaurantApi;
use crate::browse::session::{Action, Effect};

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawns gateway calls for session effects
#[derive(Clone)]
pub struct EffectRunner {
    api: Arc<dyn RestaurantApi>,
    actions: mpsc::UnboundedSender<Action>,
}

impl EffectRunner {
    /// Create a runner that reports completions on `actions`
    pub fn new(api: Arc<dyn RestaurantApi>, actions: mpsc::UnboundedSender<Action>) -> Self {
        Self { api, actions }
    }

    /// Spawn every effect, returning their task handles
    pub fn run_all(&self, effects: Vec<Effect>) -> Vec<JoinHandle<()>> {
        effects.into_iter().map(|e| self.run(e)).collect()
    }

    /// Spawn one effect
    pub fn run(&self, effect: Effect) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let actions = self.actions.clone();

        tokio::spawn(async move {
            let action = match effect {
                Effect::FetchRestaurants { seq, search } => {
                    tracing::debug!("Fetching restaurants (request {}, search {:?})", seq, search);
                    let result = api
                        .list_all_restaurants(&search)
                        .await
                        .map_err(|e| e.to_string());
                    Action::RestaurantsLoaded { seq, result }
                }
                Effect::FetchStats => {
                    Action::StatsLoaded(api.get_stats().await.map_err(|e| e.to_string()))
                }
                Effect::ToggleVisited(id) => Action::RestaurantUpdated(
                    api.toggle_visited(id).await.map_err(|e| e.to_string()),
                ),
            };

            if actions.send(action).is_err() {
                tracing::debug!("Session closed before effect completed");
            }
        })
    }
}
