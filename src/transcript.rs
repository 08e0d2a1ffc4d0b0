//! Rendering game events for the terminal.

use crate::config::PlayerRole;
use crate::orchestrator::GameEvent;
use anyhow::Result;
use strictly_slide::{Board, Phase};

/// How events are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    /// Board diagrams and prompts.
    Text,
    /// One JSON object per line.
    Json,
}

/// Renders one event. Returns `None` for events the format omits.
pub fn render(event: &GameEvent, format: TranscriptFormat) -> Result<Option<String>> {
    match format {
        TranscriptFormat::Json => Ok(Some(serde_json::to_string(event)?)),
        TranscriptFormat::Text => Ok(render_text(event)),
    }
}

fn render_text(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::TurnStarted {
            player,
            role: PlayerRole::Human,
            phase,
            legal,
        } => {
            let verb = match phase {
                Phase::Placing => "place a piece (row,col)",
                Phase::Sliding => "slide a piece (row,col>row,col)",
            };
            let options = legal
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("  ");
            Some(format!(
                "{}: {} to {}\n  legal: {}",
                player.to_string().to_uppercase(),
                PlayerRole::Human,
                verb,
                options
            ))
        }
        GameEvent::TurnStarted { .. } => None,
        GameEvent::ActionApplied {
            player,
            action,
            board,
            phase,
        } => {
            let diagram = board
                .parse::<Board>()
                .map(|b| b.display())
                .unwrap_or_else(|_| board.clone());
            Some(format!(
                "{} plays {}  [{}]\n{}\n",
                player.to_string().to_uppercase(),
                action,
                phase,
                diagram
            ))
        }
        GameEvent::ActionRejected { action, reason, .. } => {
            Some(format!("  {action} rejected: {reason}"))
        }
        GameEvent::InputRejected { reason, .. } => Some(format!("  {reason}")),
        GameEvent::GameOver { winner, turns } => Some(format!(
            "Game over: {} wins after {} turns!",
            winner.to_string().to_uppercase(),
            turns
        )),
        GameEvent::Stalled { player, turns } => Some(format!(
            "Game stalled after {} turns: {} has no legal action",
            turns,
            player.to_string().to_uppercase()
        )),
        GameEvent::TurnLimitReached { turns } => {
            Some(format!("Stopped after {turns} turns without a winner"))
        }
    }
}
