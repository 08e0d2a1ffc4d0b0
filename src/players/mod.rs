//! Player trait and implementations.

mod automated;
mod human;

pub use automated::AutomatedPlayer;
pub use human::{HumanPlayer, InputSource};

use crate::config::PlayerRole;
use anyhow::Result;
use strictly_slide::{Action, Position};

/// Something that decides actions for one side.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Decides the next action for the side to move in `position`.
    ///
    /// The returned action is not yet validated; the session does that.
    async fn choose_action(&mut self, position: &Position) -> Result<Action>;

    /// Display name.
    fn name(&self) -> &str;

    /// Who is behind this player.
    fn role(&self) -> PlayerRole;
}
