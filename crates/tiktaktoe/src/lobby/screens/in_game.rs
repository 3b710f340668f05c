//! In-game screen: owns the running session.
//!
//! Humans move with the arrow keys and Enter/Space, or jump straight to a
//! square with digits 1-9 (row-major). The controller drives computer
//! turns through [`InGameScreen::play_computer_turn`]. Once a game ends the
//! screen offers a rematch; declining hands the session back to the
//! controller so its records reach the leaderboard.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tiktaktoe_core::{GameSession, MoveError, Position, TurnOutcome};
use tracing::{debug, info, instrument, warn};

use crate::DriverConfig;
use crate::lobby::board_view;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::widgets;

/// State for the game screen.
#[derive(Debug, Getters)]
pub struct InGameScreen {
    session: GameSession,
    cursor: Position,
    status: String,
}

impl InGameScreen {
    /// Wraps a freshly started session.
    #[instrument(skip(session))]
    pub fn new(session: GameSession) -> Self {
        debug!("Initializing InGameScreen");
        let mut screen = Self {
            session,
            cursor: Position::Center,
            status: String::new(),
        };
        screen.update_status(&TurnOutcome::Continue);
        screen
    }

    /// Gives up the screen, returning the session for scoring.
    pub fn into_session(self) -> GameSession {
        self.session
    }

    /// True when the controller should play the computer's move.
    pub fn awaiting_computer(&self) -> bool {
        self.session.is_computer_turn()
    }

    /// Plays the computer's move and refreshes the status line.
    #[instrument(skip(self))]
    pub fn play_computer_turn(&mut self) {
        match self.session.play_computer_turn() {
            Ok((mv, outcome)) => {
                info!(mv = %mv, "Computer moved");
                self.cursor = mv.position;
                self.update_status(&outcome);
            }
            Err(e) => {
                warn!(error = %e, "Computer turn failed");
                self.status = format!("Computer could not move: {}", e);
            }
        }
    }

    fn update_status(&mut self, outcome: &TurnOutcome) {
        self.status = match outcome {
            TurnOutcome::Continue => {
                let current = self.session.current_player();
                format!("{}'s turn ({})", current.username(), current.mark())
            }
            TurnOutcome::Won { username, mark } => {
                format!("{} ({}) wins! Play again? (y/n)", username, mark)
            }
            TurnOutcome::Tie => "It's a tie! Play again? (y/n)".to_string(),
        };
    }

    #[instrument(skip(self))]
    fn place(&mut self, position: Position) {
        self.cursor = position;
        match self.session.place(position) {
            Ok(outcome) => self.update_status(&outcome),
            Err(MoveError::Occupied(pos)) => {
                debug!(%pos, "Square taken");
                self.status = format!("{} is already taken, pick another square", pos);
            }
            Err(MoveError::NotHumanTurn) => {
                self.status = format!("Waiting for {}", self.session.current_player().username());
            }
            Err(e) => {
                warn!(error = %e, "Move rejected");
                self.status = e.to_string();
            }
        }
    }

    fn handle_playing_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Up => self.cursor = self.cursor.step(-1, 0),
            KeyCode::Down => self.cursor = self.cursor.step(1, 0),
            KeyCode::Left => self.cursor = self.cursor.step(0, -1),
            KeyCode::Right => self.cursor = self.cursor.step(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(position) = Position::from_index(index) {
                    self.place(position);
                }
            }
            KeyCode::Esc => {
                info!("Game abandoned");
                self.session.stop();
                return ScreenTransition::EndSession;
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn handle_finished_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                info!("Rematch");
                self.session.rematch();
                self.cursor = Position::Center;
                self.update_status(&TurnOutcome::Continue);
                ScreenTransition::Stay
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ScreenTransition::EndSession,
            _ => ScreenTransition::Stay,
        }
    }
}

impl Screen for InGameScreen {
    #[instrument(skip(self, frame, _config))]
    fn render(&self, frame: &mut Frame, _config: &DriverConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Tic Tac Toe"), chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(24),
                Constraint::Min(40),
                Constraint::Length(24),
            ])
            .split(chunks[1]);

        let playing = self.session.is_playing();
        let current = self.session.current_player();
        let one = self.session.player_one();
        let two = self.session.player_two();
        board_view::draw_player_panel(frame, middle[0], one, playing && current == one);
        let cursor = playing.then_some(self.cursor);
        board_view::draw_board(frame, middle[1], self.session.board(), cursor);
        board_view::draw_player_panel(frame, middle[2], two, playing && current == two);

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help_text = if playing {
            "←↑↓→: Move | Enter/Space: Place | 1-9: Place | Esc: Leave"
        } else {
            "y: Rematch | n/Esc: Back to menu"
        };
        frame.render_widget(widgets::help(help_text), chunks[3]);
    }

    #[instrument(skip(self, key, _config))]
    fn handle_key(&mut self, key: KeyEvent, _config: &DriverConfig) -> ScreenTransition {
        if self.session.is_playing() {
            self.handle_playing_key(key)
        } else {
            self.handle_finished_key(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tiktaktoe_core::{Cell, Difficulty, Mark, Player};

    fn press(screen: &mut InGameScreen, code: KeyCode) -> ScreenTransition {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &DriverConfig::default())
    }

    fn two_humans() -> InGameScreen {
        let session = GameSession::new(Player::human("ann", Mark::X), Player::human("bob", Mark::O))
            .unwrap();
        InGameScreen::new(session)
    }

    #[test]
    fn test_cursor_moves_and_places() {
        let mut screen = two_humans();
        press(&mut screen, KeyCode::Up);
        press(&mut screen, KeyCode::Left);
        assert_eq!(*screen.cursor(), Position::TopLeft);
        press(&mut screen, KeyCode::Up);
        assert_eq!(*screen.cursor(), Position::TopLeft);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            screen.session().board().cell(Position::TopLeft),
            Cell::Occupied(Mark::X)
        );
        assert_eq!(screen.status(), "bob's turn (O)");
    }

    #[test]
    fn test_occupied_square_reported() {
        let mut screen = two_humans();
        press(&mut screen, KeyCode::Char('5'));
        press(&mut screen, KeyCode::Char('5'));
        assert!(screen.status().contains("already taken"));
        assert_eq!(screen.session().current_player().username(), "bob");
    }

    #[test]
    fn test_win_then_rematch_then_leave() {
        let mut screen = two_humans();
        for key in ['1', '4', '2', '5', '3'] {
            press(&mut screen, KeyCode::Char(key));
        }
        assert!(!screen.session().is_playing());
        assert_eq!(screen.status(), "ann (X) wins! Play again? (y/n)");

        assert_eq!(press(&mut screen, KeyCode::Char('y')), ScreenTransition::Stay);
        assert!(screen.session().is_playing());
        assert!(screen.session().board().history().is_empty());

        assert_eq!(press(&mut screen, KeyCode::Esc), ScreenTransition::EndSession);
        let records = screen.into_session().finish();
        assert_eq!(*records["ann"].wins(), 1);
        assert_eq!(*records["bob"].losses(), 1);
    }

    #[test]
    fn test_computer_turn_is_driven_externally() {
        let session = GameSession::with_strategy(
            Player::human("ann", Mark::X),
            Player::computer(Difficulty::Easy, Mark::O),
            Difficulty::Easy.seeded_strategy(7),
        )
        .unwrap();
        let mut screen = InGameScreen::new(session);
        press(&mut screen, KeyCode::Char('5'));
        assert!(screen.awaiting_computer());

        press(&mut screen, KeyCode::Char('1'));
        assert_eq!(screen.status(), "Waiting for EasyAi");

        screen.play_computer_turn();
        assert!(!screen.awaiting_computer());
        assert_eq!(screen.session().board().history().len(), 2);
    }
}
