//! Sign-in screen: enter a username, then pick a mark.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tiktaktoe_core::{Mark, Player, validate_username};
use tracing::{debug, info, instrument};

use crate::DriverConfig;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::widgets;

const MARKS: [Mark; 2] = [Mark::X, Mark::O];

/// Which prompt is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInStage {
    /// Typing the username.
    EnterName,
    /// Choosing X or O.
    ChooseMark,
}

/// State for the sign-in screen.
#[derive(Debug, Getters)]
pub struct SignInScreen {
    name_input: String,
    stage: SignInStage,
    mark_state: ListState,
    error_message: Option<String>,
}

impl SignInScreen {
    /// Creates an empty sign-in screen.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing SignInScreen");
        let mut mark_state = ListState::default();
        mark_state.select(Some(0));
        Self {
            name_input: String::new(),
            stage: SignInStage::EnterName,
            mark_state,
            error_message: None,
        }
    }

    fn selected_mark(&self) -> Mark {
        MARKS[self.mark_state.selected().unwrap_or(0).min(MARKS.len() - 1)]
    }

    fn toggle_mark(&mut self) {
        let next = 1 - self.mark_state.selected().unwrap_or(0).min(1);
        self.mark_state.select(Some(next));
    }

    #[instrument(skip(self))]
    fn confirm_name(&mut self) {
        if validate_username(&self.name_input) {
            self.stage = SignInStage::ChooseMark;
            self.error_message = None;
        } else {
            self.error_message = Some("Invalid username".to_string());
        }
    }

    #[instrument(skip(self))]
    fn finish(&self) -> ScreenTransition {
        let player = Player::human(self.name_input.trim(), self.selected_mark());
        info!(username = %player.username(), mark = %player.mark(), "Signed in");
        ScreenTransition::SignedIn(player)
    }
}

impl Default for SignInScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for SignInScreen {
    #[instrument(skip(self, frame, _config))]
    fn render(&self, frame: &mut Frame, _config: &DriverConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Tic Tac Toe — Sign In"), chunks[0]);

        let name_style = match self.stage {
            SignInStage::EnterName => Style::default().fg(Color::White),
            SignInStage::ChooseMark => Style::default().fg(Color::DarkGray),
        };
        let name = Paragraph::new(self.name_input.as_str())
            .style(name_style)
            .block(Block::default().borders(Borders::ALL).title("Please enter your name"));
        frame.render_widget(name, chunks[1]);

        if self.stage == SignInStage::ChooseMark {
            let items: Vec<ListItem> = MARKS.iter().map(|m| ListItem::new(m.to_string())).collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("Please select your symbol"))
                .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");
            let mut state = self.mark_state;
            frame.render_stateful_widget(list, chunks[2], &mut state);
        }

        frame.render_widget(widgets::error_line(self.error_message.as_deref()), chunks[3]);

        let help_text = match self.stage {
            SignInStage::EnterName => "Type name | Enter: Confirm | Esc: Quit",
            SignInStage::ChooseMark => "↑↓ / x / o: Choose | Enter: Confirm | Esc: Back",
        };
        frame.render_widget(widgets::help(help_text), chunks[4]);
    }

    #[instrument(skip(self, key, _config))]
    fn handle_key(&mut self, key: KeyEvent, _config: &DriverConfig) -> ScreenTransition {
        match self.stage {
            SignInStage::EnterName => match key.code {
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
                KeyCode::Enter => {
                    self.confirm_name();
                    ScreenTransition::Stay
                }
                KeyCode::Esc => ScreenTransition::Quit,
                _ => ScreenTransition::Stay,
            },
            SignInStage::ChooseMark => match key.code {
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                    self.toggle_mark();
                    ScreenTransition::Stay
                }
                KeyCode::Char('x') | KeyCode::Char('X') => {
                    self.mark_state.select(Some(0));
                    ScreenTransition::Stay
                }
                KeyCode::Char('o') | KeyCode::Char('O') => {
                    self.mark_state.select(Some(1));
                    ScreenTransition::Stay
                }
                KeyCode::Enter => self.finish(),
                KeyCode::Esc => {
                    self.stage = SignInStage::EnterName;
                    ScreenTransition::Stay
                }
                _ => ScreenTransition::Stay,
            },
        }
    }
}
