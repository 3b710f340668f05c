//! Main menu screen: hub for navigation after sign-in.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tiktaktoe_core::Player;
use tracing::{debug, info, instrument};

use crate::DriverConfig;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::widgets;

/// Menu options available in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    /// Two humans on one keyboard.
    PlayHuman,
    /// Human against a computer strategy.
    PlayComputer,
    /// Show the all-time leaderboard.
    ViewLeaderboard,
    /// Leave the program.
    Exit,
}

impl MenuOption {
    fn label(self) -> &'static str {
        match self {
            Self::PlayHuman => "Play vs Human",
            Self::PlayComputer => "Play vs Computer",
            Self::ViewLeaderboard => "View Leaderboard",
            Self::Exit => "Exit",
        }
    }

    fn all() -> &'static [MenuOption] {
        &[
            Self::PlayHuman,
            Self::PlayComputer,
            Self::ViewLeaderboard,
            Self::Exit,
        ]
    }
}

/// State for the main menu screen.
#[derive(Debug, Getters)]
pub struct MainMenuScreen {
    player: Player,
    list_state: ListState,
}

impl MainMenuScreen {
    /// Creates a main menu for the signed-in player.
    #[instrument(skip(player), fields(username = %player.username()))]
    pub fn new(player: Player) -> Self {
        debug!("Initializing MainMenuScreen");
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            player,
            list_state: state,
        }
    }

    fn select_previous(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Returns the currently selected menu option.
    pub fn selected_option(&self) -> MenuOption {
        let options = MenuOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }
}

impl Screen for MainMenuScreen {
    #[instrument(skip(self, frame, _config))]
    fn render(&self, frame: &mut Frame, _config: &DriverConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Tic Tac Toe — Main Menu"), chunks[0]);

        let player_bar = Paragraph::new(format!(
            "Player: {}   Mark: {}",
            self.player.username(),
            self.player.mark()
        ))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(player_bar, chunks[1]);

        let items: Vec<ListItem> = MenuOption::all()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        frame.render_widget(
            widgets::help("↑↓: Navigate | Enter: Select | q: Quit"),
            chunks[3],
        );
    }

    #[instrument(skip(self, key, _config))]
    fn handle_key(&mut self, key: KeyEvent, _config: &DriverConfig) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                match option {
                    MenuOption::PlayHuman => ScreenTransition::GoToOpponentName,
                    MenuOption::PlayComputer => ScreenTransition::GoToDifficultySelect,
                    MenuOption::ViewLeaderboard => ScreenTransition::GoToLeaderboard,
                    MenuOption::Exit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tiktaktoe_core::Mark;

    fn press(screen: &mut MainMenuScreen, code: KeyCode) -> ScreenTransition {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &DriverConfig::default())
    }

    #[test]
    fn test_menu_wraps_and_selects() {
        let mut screen = MainMenuScreen::new(Player::human("ann", Mark::X));
        assert_eq!(screen.selected_option(), MenuOption::PlayHuman);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.selected_option(), MenuOption::Exit);
        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenTransition::Quit);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            ScreenTransition::GoToDifficultySelect
        );
    }
}
