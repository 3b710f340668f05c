//! Terminal setup and teardown around the lobby.

use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tiktaktoe_core::Player;
use tracing::{error, info, instrument};

use crate::{DriverConfig, LobbyController};

/// Runs the lobby in the alternate screen until the user quits.
///
/// With `player` set, sign-in is skipped. The terminal is restored even
/// when the lobby fails.
#[instrument(skip(config, player))]
pub async fn run_lobby(config: DriverConfig, player: Option<Player>) -> Result<()> {
    info!("Starting tiktaktoe lobby");

    let mut controller = match player {
        Some(player) => LobbyController::signed_in(config, player),
        None => LobbyController::new(config),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Lobby loop error");
    }
    res
}
