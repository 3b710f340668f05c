//! Terminal front end for tiktaktoe.
//!
//! Game rules and computer strategies live in [`tiktaktoe_core`]; this crate
//! adds the configuration file, the persistent leaderboard, and the ratatui
//! lobby that ties them together.
//!
//! # Example
//!
//! ```no_run
//! use tiktaktoe::{DriverConfig, Leaderboard};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = DriverConfig::load_or_default("tiktaktoe.toml")?;
//! let board = Leaderboard::load(config.leaderboard_path())?;
//! println!("{}", board.render_top(*config.leaderboard_size()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod leaderboard;
mod lobby;
mod tui;

pub use config::{ConfigError, DriverConfig};
pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardError};
pub use lobby::{
    ActiveScreen, DifficultySelectScreen, InGameScreen, LeaderboardViewScreen, LobbyController,
    MainMenuScreen, MenuOption, OpponentNameScreen, Screen, ScreenTransition, SignInScreen,
    SignInStage,
};
pub use tui::run_lobby;
