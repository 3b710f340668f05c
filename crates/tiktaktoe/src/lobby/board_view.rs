//! Stateless board and scoreboard rendering for the game screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tiktaktoe_core::{Board, Cell, Mark, Player, Position};

use crate::lobby::widgets::center_rect;

/// Draws the 3x3 grid with the cursor square highlighted.
///
/// The cursor is hidden once the game is over.
pub fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        draw_row(frame, chunk, board, cursor, row);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
}

fn draw_row(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (col, chunk) in [cols[0], cols[2], cols[4]].into_iter().enumerate() {
        if let Some(pos) = Position::from_row_col(row, col) {
            draw_cell(frame, chunk, board, cursor, pos);
        }
    }
    draw_separator_vertical(frame, cols[1]);
    draw_separator_vertical(frame, cols[3]);
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>, pos: Position) {
    let (symbol, base_style) = match board.cell(pos) {
        // Empty squares show their keypad digit.
        Cell::Empty => (
            format!(" {} ", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::Occupied(mark) => (
            format!(" {} ", mark),
            Style::default()
                .fg(mark_color(mark))
                .add_modifier(Modifier::BOLD),
        ),
    };

    let style = if cursor == Some(pos) {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(38)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

/// Colour used for a mark on the board and in the player panels.
pub fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::X => Color::Blue,
        Mark::O => Color::Red,
    }
}

/// Side panel with a player's name, mark and session record.
pub fn draw_player_panel(frame: &mut Frame, area: Rect, player: &Player, to_move: bool) {
    let record = player.record();
    let border_style = if to_move {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("{} ({})", player.username(), player.mark()),
            Style::default()
                .fg(mark_color(*player.mark()))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Wins:   {}", record.wins())),
        Line::from(format!("Losses: {}", record.losses())),
        Line::from(format!("Ties:   {}", record.ties())),
    ];
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Session"),
    );
    frame.render_widget(panel, area);
}
