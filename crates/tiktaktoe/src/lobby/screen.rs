//! Screen trait and transition type for the lobby state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use tiktaktoe_core::Player;

use crate::DriverConfig;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Player one finished signing in.
    SignedIn(Player),
    /// Navigate to the main menu.
    GoToMainMenu,
    /// Ask for the second human's name.
    GoToOpponentName,
    /// Ask for the computer difficulty.
    GoToDifficultySelect,
    /// Show the top of the leaderboard.
    GoToLeaderboard,
    /// Start a session against the given opponent.
    StartSession {
        /// Player two.
        opponent: Player,
    },
    /// Leave the game screen, saving the session's records.
    EndSession,
    /// Exit the application.
    Quit,
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, config: &DriverConfig);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, config: &DriverConfig) -> ScreenTransition;
}
