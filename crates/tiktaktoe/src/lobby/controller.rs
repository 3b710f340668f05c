//! Lobby controller: the state machine driving the multi-screen TUI.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use derive_getters::Getters;
use ratatui::{Frame, Terminal, backend::Backend};
use tiktaktoe_core::{GameSession, Player};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::screens::{
    DifficultySelectScreen, InGameScreen, LeaderboardViewScreen, MainMenuScreen,
    OpponentNameScreen, SignInScreen,
};
use crate::{DriverConfig, Leaderboard};

/// Active screen in the lobby state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Player one's name and mark.
    SignIn(SignInScreen),
    /// Hub menu.
    MainMenu(MainMenuScreen),
    /// Second human's name.
    OpponentName(OpponentNameScreen),
    /// Computer difficulty.
    DifficultySelect(DifficultySelectScreen),
    /// A running session.
    InGame(InGameScreen),
    /// All-time standings.
    Leaderboard(LeaderboardViewScreen),
}

impl ActiveScreen {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignIn(_) => "SignIn",
            Self::MainMenu(_) => "MainMenu",
            Self::OpponentName(_) => "OpponentName",
            Self::DifficultySelect(_) => "DifficultySelect",
            Self::InGame(_) => "InGame",
            Self::Leaderboard(_) => "Leaderboard",
        }
    }

    fn render(&self, frame: &mut Frame, config: &DriverConfig) {
        match self {
            Self::SignIn(s) => s.render(frame, config),
            Self::MainMenu(s) => s.render(frame, config),
            Self::OpponentName(s) => s.render(frame, config),
            Self::DifficultySelect(s) => s.render(frame, config),
            Self::InGame(s) => s.render(frame, config),
            Self::Leaderboard(s) => s.render(frame, config),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, config: &DriverConfig) -> ScreenTransition {
        match self {
            Self::SignIn(s) => s.handle_key(key, config),
            Self::MainMenu(s) => s.handle_key(key, config),
            Self::OpponentName(s) => s.handle_key(key, config),
            Self::DifficultySelect(s) => s.handle_key(key, config),
            Self::InGame(s) => s.handle_key(key, config),
            Self::Leaderboard(s) => s.handle_key(key, config),
        }
    }
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct LobbyController {
    config: DriverConfig,
    player_one: Option<Player>,
}

impl LobbyController {
    /// Creates a controller with nobody signed in.
    #[instrument(skip(config))]
    pub fn new(config: DriverConfig) -> Self {
        info!("Creating LobbyController");
        Self {
            config,
            player_one: None,
        }
    }

    /// Creates a controller with player one already signed in.
    #[instrument(skip(config, player), fields(username = %player.username()))]
    pub fn signed_in(config: DriverConfig, player: Player) -> Self {
        info!("Creating LobbyController with signed-in player");
        Self {
            config,
            player_one: Some(player),
        }
    }

    /// First screen: the menu if someone is signed in, otherwise sign-in.
    pub fn initial_screen(&self) -> ActiveScreen {
        match &self.player_one {
            Some(player) => ActiveScreen::MainMenu(MainMenuScreen::new(player.clone())),
            None => ActiveScreen::SignIn(SignInScreen::new()),
        }
    }

    /// Feeds one key press to `screen`, returning the next screen or `None` to quit.
    #[instrument(skip(self, screen, key), fields(screen = screen.name()))]
    pub fn step(&mut self, mut screen: ActiveScreen, key: KeyEvent) -> Option<ActiveScreen> {
        let transition = screen.handle_key(key, &self.config);
        self.apply_transition(transition, screen)
    }

    /// Runs the lobby event loop until the user quits.
    ///
    /// Computer moves are played after `computer_delay_ms` so the human's
    /// move is visible first.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        let mut screen = self.initial_screen();
        let delay = Duration::from_millis(*self.config.computer_delay_ms());

        loop {
            terminal.draw(|f| screen.render(f, &self.config))?;

            if let ActiveScreen::InGame(game) = &mut screen
                && game.awaiting_computer()
            {
                sleep(delay).await;
                game.play_computer_turn();
                continue;
            }

            // Poll with a short timeout to keep the loop responsive.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // crossterm fires both press and release on some platforms.
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                screen = match self.step(screen, key) {
                    Some(next) => next,
                    None => {
                        info!("Lobby quitting");
                        return Ok(());
                    }
                };
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current), fields(current = current.name()))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::SignedIn(player) => {
                info!(username = %player.username(), "Navigating to MainMenu");
                self.player_one = Some(player.clone());
                Some(ActiveScreen::MainMenu(MainMenuScreen::new(player)))
            }

            ScreenTransition::GoToMainMenu => Some(self.main_menu_or_sign_in()),

            ScreenTransition::GoToOpponentName => Some(match &self.player_one {
                Some(p) => ActiveScreen::OpponentName(OpponentNameScreen::new(p.clone())),
                None => self.main_menu_or_sign_in(),
            }),

            ScreenTransition::GoToDifficultySelect => Some(match &self.player_one {
                Some(p) => ActiveScreen::DifficultySelect(DifficultySelectScreen::new(p.clone())),
                None => self.main_menu_or_sign_in(),
            }),

            ScreenTransition::GoToLeaderboard => {
                info!("Navigating to Leaderboard");
                Some(ActiveScreen::Leaderboard(LeaderboardViewScreen::new(
                    &self.config,
                )))
            }

            ScreenTransition::StartSession { opponent } => Some(self.start_session(opponent)),

            ScreenTransition::EndSession => {
                if let ActiveScreen::InGame(game) = current {
                    self.record_session(game.into_session());
                } else {
                    warn!("EndSession outside of a game");
                }
                Some(self.main_menu_or_sign_in())
            }

            ScreenTransition::Quit => None,
        }
    }

    fn main_menu_or_sign_in(&self) -> ActiveScreen {
        match &self.player_one {
            Some(p) => ActiveScreen::MainMenu(MainMenuScreen::new(p.clone())),
            None => {
                warn!("No player signed in, redirecting to SignIn");
                ActiveScreen::SignIn(SignInScreen::new())
            }
        }
    }

    #[instrument(skip(self, opponent), fields(opponent = %opponent.username()))]
    fn start_session(&self, opponent: Player) -> ActiveScreen {
        let Some(player_one) = self.player_one.clone() else {
            return self.main_menu_or_sign_in();
        };
        match GameSession::new(player_one, opponent) {
            Ok(session) => {
                info!("Navigating to InGame");
                ActiveScreen::InGame(InGameScreen::new(session))
            }
            Err(e) => {
                warn!(error = %e, "Could not start session");
                self.main_menu_or_sign_in()
            }
        }
    }

    /// Adds a finished session's records to the leaderboard file.
    ///
    /// An unreadable file is moved to `<path>.bak` before a new one is
    /// written; if it cannot be moved, nothing is saved. Failures are
    /// logged; the lobby keeps running.
    #[instrument(skip(self, session))]
    fn record_session(&self, session: GameSession) {
        let records = session.finish();
        let path = self.config.leaderboard_path();
        let mut board = match Leaderboard::load(path) {
            Ok(board) => board,
            Err(e) => {
                warn!(error = %e, "Leaderboard unreadable");
                if let Err(e) = Leaderboard::back_up(path) {
                    warn!(error = %e, "Could not back up leaderboard, session not saved");
                    return;
                }
                Leaderboard::empty(path)
            }
        };
        board.merge_session(&records);
        if let Err(e) = board.save() {
            warn!(error = %e, "Failed to save leaderboard");
        }
    }
}
