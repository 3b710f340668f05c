//! Leaderboard screen: the top players by all-time wins.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};
use tracing::{debug, instrument, warn};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::widgets;
use crate::{DriverConfig, Leaderboard};

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Standing {
    username: String,
    wins: u32,
    losses: u32,
    ties: u32,
}

/// State for the leaderboard screen.
#[derive(Debug, Getters)]
pub struct LeaderboardViewScreen {
    #[getter(skip)]
    standings: Vec<Standing>,
    load_error: Option<String>,
}

impl LeaderboardViewScreen {
    /// Reads the leaderboard file named in `config`.
    #[instrument(skip(config))]
    pub fn new(config: &DriverConfig) -> Self {
        match Leaderboard::load(config.leaderboard_path()) {
            Ok(board) => Self::from_leaderboard(&board, *config.leaderboard_size()),
            Err(e) => {
                warn!(error = %e, "Failed to load leaderboard");
                Self {
                    standings: Vec::new(),
                    load_error: Some(e.message),
                }
            }
        }
    }

    /// Snapshots the top `size` entries of `board`.
    pub fn from_leaderboard(board: &Leaderboard, size: usize) -> Self {
        let standings: Vec<Standing> = board
            .top(size)
            .into_iter()
            .map(|e| Standing {
                username: e.username().clone(),
                wins: *e.record().wins(),
                losses: *e.record().losses(),
                ties: *e.record().ties(),
            })
            .collect();
        debug!(rows = standings.len(), "Leaderboard snapshot");
        Self {
            standings,
            load_error: None,
        }
    }

    /// Usernames in ranked order.
    pub fn usernames(&self) -> Vec<&str> {
        self.standings.iter().map(|s| s.username.as_str()).collect()
    }
}

impl Screen for LeaderboardViewScreen {
    #[instrument(skip(self, frame, config))]
    fn render(&self, frame: &mut Frame, config: &DriverConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Tic Tac Toe — Leaderboard"), chunks[0]);

        let header = Row::new(vec!["#", "Player", "Wins", "Losses", "Ties"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = self
            .standings
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Row::new(vec![
                    Cell::from((i + 1).to_string()),
                    Cell::from(s.username.clone()),
                    Cell::from(s.wins.to_string()),
                    Cell::from(s.losses.to_string()),
                    Cell::from(s.ties.to_string()),
                ])
            })
            .collect();
        let title = format!("Top {}", config.leaderboard_size());
        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(12),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(table, chunks[1]);

        let notice = match (&self.load_error, self.standings.is_empty()) {
            (Some(e), _) => Some(e.as_str()),
            (None, true) => Some("No games recorded yet"),
            (None, false) => None,
        };
        frame.render_widget(widgets::error_line(notice), chunks[2]);

        frame.render_widget(widgets::help("Esc/Enter: Back | q: Quit"), chunks[3]);
    }

    #[instrument(skip(self, key, _config))]
    fn handle_key(&mut self, key: KeyEvent, _config: &DriverConfig) -> ScreenTransition {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => ScreenTransition::GoToMainMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
