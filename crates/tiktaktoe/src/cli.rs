//! Command-line interface for tiktaktoe.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tiktaktoe_core::Mark;

/// Tic-tac-toe in the terminal, with a persistent leaderboard
#[derive(Parser, Debug)]
#[command(name = "tiktaktoe")]
#[command(about = "Tic-tac-toe against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it is missing)
    #[arg(long, global = true, default_value = "tiktaktoe.toml")]
    pub config: PathBuf,

    /// Override the leaderboard file from the config
    #[arg(long, global = true)]
    pub leaderboard: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the game lobby
    Play {
        /// Sign in as this player, skipping the sign-in screen
        #[arg(long)]
        name: Option<String>,

        /// Mark to play with when `--name` is given
        #[arg(long, value_enum, default_value = "x")]
        mark: MarkArg,
    },

    /// Print the leaderboard and exit
    Leaderboard {
        /// Number of entries to show (defaults to the config's leaderboard_size)
        #[arg(long)]
        top: Option<usize>,
    },
}

/// Mark choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkArg {
    /// Play as X
    X,
    /// Play as O
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["tiktaktoe"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("tiktaktoe.toml"));
    }

    #[test]
    fn test_play_with_name_and_mark() {
        let cli = Cli::try_parse_from(["tiktaktoe", "play", "--name", "ann", "--mark", "o"]).unwrap();
        match cli.command {
            Some(Command::Play { name, mark }) => {
                assert_eq!(name.as_deref(), Some("ann"));
                assert_eq!(Mark::from(mark), Mark::O);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_leaderboard_after_subcommand() {
        let cli = Cli::try_parse_from(["tiktaktoe", "leaderboard", "--top", "3", "--leaderboard", "x.json"])
            .unwrap();
        assert_eq!(cli.leaderboard, Some(PathBuf::from("x.json")));
        assert!(matches!(cli.command, Some(Command::Leaderboard { top: Some(3) })));
    }
}
