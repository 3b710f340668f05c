//! Second human's sign-in. The opponent takes the other mark.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tiktaktoe_core::{Player, validate_opponent_username};
use tracing::{debug, info, instrument};

use crate::DriverConfig;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::widgets;

/// State for the opponent name prompt.
#[derive(Debug, Getters)]
pub struct OpponentNameScreen {
    player_one: Player,
    name_input: String,
    error_message: Option<String>,
}

impl OpponentNameScreen {
    /// Creates the prompt for a game against `player_one`.
    #[instrument(skip(player_one), fields(player_one = %player_one.username()))]
    pub fn new(player_one: Player) -> Self {
        debug!("Initializing OpponentNameScreen");
        Self {
            player_one,
            name_input: String::new(),
            error_message: None,
        }
    }

    #[instrument(skip(self))]
    fn confirm(&mut self) -> ScreenTransition {
        if !validate_opponent_username(&self.name_input, &self.player_one) {
            self.error_message = Some(format!(
                "Invalid username (must differ from {})",
                self.player_one.username()
            ));
            return ScreenTransition::Stay;
        }
        let opponent = Player::human(self.name_input.trim(), self.player_one.mark().opponent());
        info!(opponent = %opponent.username(), mark = %opponent.mark(), "Opponent signed in");
        ScreenTransition::StartSession { opponent }
    }
}

impl Screen for OpponentNameScreen {
    #[instrument(skip(self, frame, _config))]
    fn render(&self, frame: &mut Frame, _config: &DriverConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Tic Tac Toe — Player Two"), chunks[0]);

        let title = format!(
            "Player two, enter your name (you play {})",
            self.player_one.mark().opponent()
        );
        let input = Paragraph::new(self.name_input.as_str())
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(input, chunks[1]);

        frame.render_widget(widgets::error_line(self.error_message.as_deref()), chunks[2]);
        frame.render_widget(
            widgets::help("Type name | Enter: Start | Esc: Back"),
            chunks[4],
        );
    }

    #[instrument(skip(self, key, _config))]
    fn handle_key(&mut self, key: KeyEvent, _config: &DriverConfig) -> ScreenTransition {
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.name_input.push(c);
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                self.name_input.pop();
                ScreenTransition::Stay
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Esc => ScreenTransition::GoToMainMenu,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiktaktoe_core::Mark;

    fn type_and_confirm(screen: &mut OpponentNameScreen, name: &str) -> ScreenTransition {
        let config = DriverConfig::default();
        for c in name.chars() {
            screen.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), &config);
        }
        screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &config)
    }

    #[test]
    fn test_same_name_rejected() {
        let mut screen = OpponentNameScreen::new(Player::human("ann", Mark::X));
        assert_eq!(type_and_confirm(&mut screen, "ann"), ScreenTransition::Stay);
        assert!(screen.error_message().is_some());
    }

    #[test]
    fn test_ctrl_chars_not_typed() {
        let mut screen = OpponentNameScreen::new(Player::human("ann", Mark::X));
        screen.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &DriverConfig::default(),
        );
        assert!(screen.name_input().is_empty());
        assert_eq!(
            type_and_confirm(&mut screen, "bob"),
            ScreenTransition::StartSession {
                opponent: Player::human("bob", Mark::O)
            }
        );
    }

    #[test]
    fn test_opponent_gets_other_mark() {
        let mut screen = OpponentNameScreen::new(Player::human("ann", Mark::O));
        assert_eq!(
            type_and_confirm(&mut screen, "bob"),
            ScreenTransition::StartSession {
                opponent: Player::human("bob", Mark::X)
            }
        );
    }
}
