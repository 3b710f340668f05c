//! Computer difficulty picker.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use tiktaktoe_core::{Difficulty, Player};
use tracing::{debug, info, instrument};

use crate::DriverConfig;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::widgets;

const CHOICES: [Difficulty; 2] = [Difficulty::Medium, Difficulty::Easy];

/// State for the difficulty picker.
#[derive(Debug, Getters)]
pub struct DifficultySelectScreen {
    player_one: Player,
    list_state: ListState,
}

impl DifficultySelectScreen {
    /// Creates the picker for a game against `player_one`.
    #[instrument(skip(player_one), fields(player_one = %player_one.username()))]
    pub fn new(player_one: Player) -> Self {
        debug!("Initializing DifficultySelectScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            player_one,
            list_state,
        }
    }

    /// Difficulty under the cursor.
    pub fn selected(&self) -> Difficulty {
        CHOICES[self.list_state.selected().unwrap_or(0).min(CHOICES.len() - 1)]
    }

    fn start(&self, difficulty: Difficulty) -> ScreenTransition {
        let opponent = Player::computer(difficulty, self.player_one.mark().opponent());
        info!(%difficulty, opponent = %opponent.username(), "Computer opponent chosen");
        ScreenTransition::StartSession { opponent }
    }
}

impl Screen for DifficultySelectScreen {
    #[instrument(skip(self, frame, _config))]
    fn render(&self, frame: &mut Frame, _config: &DriverConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Tic Tac Toe — Difficulty"), chunks[0]);

        let items: Vec<ListItem> = CHOICES
            .iter()
            .enumerate()
            .map(|(i, d)| ListItem::new(format!("{}. {}", i + 1, d)))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Choose the computer's difficulty"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        frame.render_widget(
            widgets::help("↑↓: Navigate | 1/2 or Enter: Select | Esc: Back | q: Quit"),
            chunks[2],
        );
    }

    #[instrument(skip(self, key, _config))]
    fn handle_key(&mut self, key: KeyEvent, _config: &DriverConfig) -> ScreenTransition {
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                let next = 1 - self.list_state.selected().unwrap_or(0).min(1);
                self.list_state.select(Some(next));
                ScreenTransition::Stay
            }
            KeyCode::Char('1') => self.start(CHOICES[0]),
            KeyCode::Char('2') => self.start(CHOICES[1]),
            KeyCode::Enter => self.start(self.selected()),
            KeyCode::Esc => ScreenTransition::GoToMainMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
