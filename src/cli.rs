//! Command-line interface for strictly_slide.

use clap::{Parser, Subcommand};
use strictly_slide_games::PlayerRole;

/// Strictly Slide - place-then-slide tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_slide")]
#[command(about = "Place three, then slide: tic-tac-toe with a second phase", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match at the terminal (human vs automated by default)
    Play {
        /// Path to a match config TOML file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Role controlling X (overrides config)
        #[arg(long, value_enum)]
        x: Option<PlayerRole>,

        /// Role controlling O (overrides config)
        #[arg(long, value_enum)]
        o: Option<PlayerRole>,

        /// Seed for the starting player (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Abandon the match after this many turns (overrides config)
        #[arg(long)]
        max_turns: Option<u32>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Watch two automated players
    Auto {
        /// Seed for the starting player
        #[arg(long)]
        seed: Option<u64>,

        /// Abandon the match after this many turns
        #[arg(long)]
        max_turns: Option<u32>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Show legal actions and the automated choice for a position
    Legal {
        /// Board as three rows of x, o or '.', separated by '/' (e.g. "xo./.x./...")
        #[arg(long)]
        board: String,

        /// Player to move (x or o)
        #[arg(long)]
        turn: strictly_slide::Player,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_leaves_turn_limit_to_config() {
        let cli = Cli::try_parse_from(["strictly_slide", "auto", "--seed", "3"]).unwrap();
        match cli.command {
            Command::Auto {
                seed, max_turns, ..
            } => {
                assert_eq!(seed, Some(3));
                assert_eq!(max_turns, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_play_accepts_ai_alias() {
        let cli = Cli::try_parse_from(["strictly_slide", "play", "--x", "ai"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Play {
                x: Some(PlayerRole::Automated),
                ..
            }
        ));
    }
}
