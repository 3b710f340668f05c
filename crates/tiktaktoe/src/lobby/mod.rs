//! Lobby system: sign-in, menu, game and leaderboard screens.

mod board_view;
mod controller;
mod screen;
mod screens;
mod widgets;

pub use controller::{ActiveScreen, LobbyController};
pub use screen::{Screen, ScreenTransition};
pub use screens::{
    DifficultySelectScreen, InGameScreen, LeaderboardViewScreen, MainMenuScreen, MenuOption,
    OpponentNameScreen, SignInScreen, SignInStage,
};
