//! Human player reading action notation from a line source.

use super::Player;
use crate::config::PlayerRole;
use crate::orchestrator::GameEvent;
use anyhow::Result;
use std::sync::Arc;
use strictly_slide::{Action, Player as Mark, Position};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, instrument, warn};

/// Lines typed at the terminal, shared by every human at the table.
///
/// Only the side to move awaits input, so one receiver serves both.
pub type InputSource = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Human player using typed `row,col` or `row,col>row,col` notation.
pub struct HumanPlayer {
    name: String,
    mark: Mark,
    input: InputSource,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(
        name: impl Into<String>,
        mark: Mark,
        input: InputSource,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            name: name.into(),
            mark,
            input,
            events,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    #[instrument(skip(self, _position), fields(player = %self.name))]
    async fn choose_action(&mut self, _position: &Position) -> Result<Action> {
        let mut input = self.input.lock().await;

        while let Some(line) = input.recv().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<Action>() {
                Ok(action) => {
                    debug!(%action, "Parsed human input");
                    return Ok(action);
                }
                Err(err) => {
                    warn!(input = line, error = %err, "Unparseable input");
                    self.events.send(GameEvent::InputRejected {
                        player: self.mark,
                        input: line.to_string(),
                        reason: err.to_string(),
                    })?;
                }
            }
        }

        anyhow::bail!("Input closed")
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> PlayerRole {
        PlayerRole::Human
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_slide::Coordinate;

    fn human() -> (
        HumanPlayer,
        mpsc::UnboundedSender<String>,
        mpsc::UnboundedReceiver<GameEvent>,
    ) {
        let (line_tx, line_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let player = HumanPlayer::new("alice", Mark::X, Arc::new(Mutex::new(line_rx)), event_tx);
        (player, line_tx, event_rx)
    }

    #[tokio::test]
    async fn test_reprompts_until_parseable() {
        let (mut player, lines, mut events) = human();
        lines.send("".to_string()).unwrap();
        lines.send("middle".to_string()).unwrap();
        lines.send("1,1".to_string()).unwrap();

        let action = player
            .choose_action(&Position::starting_with(Mark::X))
            .await
            .unwrap();
        assert_eq!(action, Action::place(Coordinate::new(1, 1)));

        match events.try_recv().unwrap() {
            GameEvent::InputRejected { input, .. } => assert_eq!(input, "middle"),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_input_is_an_error() {
        let (mut player, lines, _events) = human();
        drop(lines);
        assert!(
            player
                .choose_action(&Position::starting_with(Mark::X))
                .await
                .is_err()
        );
    }
}
