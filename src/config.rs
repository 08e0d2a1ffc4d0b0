//! Match configuration: who controls each side and how long play may run.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_slide::Player;
use tracing::{debug, info, instrument};

/// Who controls a player slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    /// Moves are typed at the terminal.
    #[display("human")]
    Human,
    /// Moves come from the move selector.
    #[display("automated")]
    #[serde(alias = "ai")]
    #[value(alias = "ai")]
    Automated,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Role controlling X.
    pub x: Option<PlayerRole>,
    /// Role controlling O.
    pub o: Option<PlayerRole>,
    /// Starting-player seed.
    pub seed: Option<u64>,
    /// Turn limit.
    pub max_turns: Option<u32>,
}

/// Configuration for one match, resolved once per new game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Role controlling X.
    #[serde(default = "default_x_role")]
    x: PlayerRole,

    /// Role controlling O.
    #[serde(default = "default_o_role")]
    o: PlayerRole,

    /// Seed for choosing the starting player. Random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Applied actions after which the match is abandoned.
    #[serde(default = "default_max_turns")]
    max_turns: u32,
}

#[instrument]
fn default_x_role() -> PlayerRole {
    PlayerRole::Human
}

#[instrument]
fn default_o_role() -> PlayerRole {
    PlayerRole::Automated
}

#[instrument]
fn default_max_turns() -> u32 {
    200
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(default_x_role(), default_o_role())
    }
}

impl MatchConfig {
    /// Creates a configuration with the given roles and default limits.
    #[instrument]
    pub fn new(x: PlayerRole, o: PlayerRole) -> Self {
        Self {
            x,
            o,
            seed: None,
            max_turns: default_max_turns(),
        }
    }

    /// Two automated players.
    pub fn automated() -> Self {
        Self::new(PlayerRole::Automated, PlayerRole::Automated)
    }

    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading match config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(x = %config.x, o = %config.o, "Match config loaded");
        Ok(config)
    }

    /// Loads the file if one is given (defaults otherwise), then applies
    /// the overrides on top.
    #[instrument(skip(path), fields(path = ?path.map(Path::display)))]
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(overrides)
    }

    /// Applies every override that is set and re-validates.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(role) = overrides.x {
            self.x = role;
        }
        if let Some(role) = overrides.o {
            self.o = role;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(max_turns) = overrides.max_turns {
            self.max_turns = max_turns;
        }
        self.validate()?;
        debug!(x = %self.x, o = %self.o, seed = ?self.seed, "Applied overrides");
        Ok(self)
    }

    /// Role controlling the given player.
    pub fn role_of(&self, player: Player) -> PlayerRole {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Replaces the role for one player.
    pub fn with_role(mut self, player: Player, role: PlayerRole) -> Self {
        match player {
            Player::X => self.x = role,
            Player::O => self.o = role,
        }
        self
    }

    /// Sets the starting-player seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the turn limit.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Checks value ranges that serde cannot express.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns == 0 {
            return Err(ConfigError::new("max_turns must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
