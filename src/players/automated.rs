//! Automated player backed by a move selector.

use super::Player;
use crate::config::PlayerRole;
use anyhow::{Context, Result};
use std::sync::Arc;
use strictly_slide::{Action, FirstAvailable, MoveSelector, Position};
use tracing::{debug, instrument};

/// Plays whatever its selector picks.
///
/// Selection runs on the blocking pool so the orchestrating task stays
/// free; the chosen action is handed back and applied there.
pub struct AutomatedPlayer {
    name: String,
    selector: Arc<dyn MoveSelector>,
}

impl AutomatedPlayer {
    /// Creates an automated player with the given selector.
    pub fn new(name: impl Into<String>, selector: Arc<dyn MoveSelector>) -> Self {
        Self {
            name: name.into(),
            selector,
        }
    }

    /// Creates an automated player using the first-available policy.
    pub fn first_available(name: impl Into<String>) -> Self {
        Self::new(name, Arc::new(FirstAvailable))
    }
}

#[async_trait::async_trait]
impl Player for AutomatedPlayer {
    #[instrument(skip(self, position), fields(player = %self.name, selector = self.selector.name()))]
    async fn choose_action(&mut self, position: &Position) -> Result<Action> {
        let position = *position;
        let selector = Arc::clone(&self.selector);

        let action = tokio::task::spawn_blocking(move || selector.choose(&position))
            .await
            .context("Move selection task failed")??;

        debug!(%action, "Automated player chose action");
        Ok(action)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> PlayerRole {
        PlayerRole::Automated
    }
}
