//! Screen implementations for the lobby state machine.

mod difficulty_select;
mod in_game;
mod leaderboard_view;
mod main_menu;
mod opponent_name;
mod sign_in;

pub use difficulty_select::DifficultySelectScreen;
pub use in_game::InGameScreen;
pub use leaderboard_view::LeaderboardViewScreen;
pub use main_menu::{MainMenuScreen, MenuOption};
pub use opponent_name::OpponentNameScreen;
pub use sign_in::{SignInScreen, SignInStage};
