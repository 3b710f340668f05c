//! Game session state machine.
//!
//! A session is a run of consecutive games between the same two players.
//! Player one is always human and always opens each game. Records
//! accumulate across rematches until the session is finished.

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use crate::{Board, Move, MoveError, Player, PlayerKind, PlayerRecord, Position, SessionError, Strategy};

/// What a single move did to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Game continues with the other player to move.
    Continue,
    /// The mover completed a line.
    Won {
        /// Winner's username.
        username: String,
        /// Winner's mark.
        mark: crate::Mark,
    },
    /// Board filled with no winner.
    Tie,
}

impl TurnOutcome {
    /// True if this move ended the game.
    pub fn is_final(&self) -> bool {
        !matches!(self, TurnOutcome::Continue)
    }
}

/// Two players, one board, and whose turn it is.
#[derive(Debug)]
pub struct GameSession {
    players: [Player; 2],
    current: usize,
    board: Board,
    playing: bool,
    strategy: Option<Box<dyn Strategy>>,
}

impl GameSession {
    /// Starts a session. A computer player two gets a strategy for its difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if player one is a computer or the players
    /// share a mark or a username.
    #[instrument(skip(player_one, player_two), fields(p1 = %player_one.username(), p2 = %player_two.username()))]
    pub fn new(player_one: Player, player_two: Player) -> Result<Self, SessionError> {
        let strategy = match player_two.kind() {
            PlayerKind::Computer(difficulty) => Some(difficulty.strategy()),
            PlayerKind::Human => None,
        };
        Self::build(player_one, player_two, strategy)
    }

    /// Starts a session with an explicit strategy for a computer player two.
    ///
    /// # Errors
    ///
    /// Same as [`GameSession::new`].
    pub fn with_strategy(
        player_one: Player,
        player_two: Player,
        strategy: Box<dyn Strategy>,
    ) -> Result<Self, SessionError> {
        Self::build(player_one, player_two, Some(strategy))
    }

    fn build(
        player_one: Player,
        player_two: Player,
        strategy: Option<Box<dyn Strategy>>,
    ) -> Result<Self, SessionError> {
        if !player_one.is_human() {
            return Err(SessionError::ComputerPlayerOne);
        }
        if player_one.mark() == player_two.mark() {
            return Err(SessionError::SameMark(*player_one.mark()));
        }
        if player_one.username() == player_two.username() {
            return Err(SessionError::SameUsername(player_one.username().clone()));
        }
        let strategy = if player_two.is_human() { None } else { strategy };
        info!(
            player_one = %player_one.username(),
            player_two = %player_two.username(),
            "Session started"
        );
        Ok(Self {
            players: [player_one, player_two],
            current: 0,
            board: Board::new(),
            playing: true,
            strategy,
        })
    }

    /// Player one (the signed-in human).
    pub fn player_one(&self) -> &Player {
        &self.players[0]
    }

    /// Player two (second human or computer).
    pub fn player_two(&self) -> &Player {
        &self.players[1]
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Player waiting for their turn.
    pub fn opponent_player(&self) -> &Player {
        &self.players[1 - self.current]
    }

    /// The board of the game in progress.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// False once the current game has ended or the session was stopped.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True when the game is live and a computer is to move.
    pub fn is_computer_turn(&self) -> bool {
        self.playing && !self.current_player().is_human()
    }

    /// Places the current human player's mark.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] after the game has ended,
    /// [`MoveError::NotHumanTurn`] on a computer's turn, and
    /// [`MoveError::Occupied`] for a taken square.
    #[instrument(skip(self), fields(player = %self.current_player().username()))]
    pub fn place(&mut self, position: Position) -> Result<TurnOutcome, MoveError> {
        if !self.playing {
            return Err(MoveError::GameOver);
        }
        if !self.current_player().is_human() {
            return Err(MoveError::NotHumanTurn);
        }
        let mv = Move::new(position, *self.current_player().mark());
        self.apply(mv)
    }

    /// Lets the computer player choose and play its move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] after the game has ended,
    /// [`MoveError::NotComputerTurn`] on a human's turn, and
    /// [`MoveError::NoMovesAvailable`] if the strategy finds nothing to play.
    #[instrument(skip(self))]
    pub fn play_computer_turn(&mut self) -> Result<(Move, TurnOutcome), MoveError> {
        if !self.playing {
            return Err(MoveError::GameOver);
        }
        let mark = *self.current_player().mark();
        let human_turn = self.current_player().is_human();
        let strategy = match (&mut self.strategy, human_turn) {
            (Some(strategy), false) => strategy,
            _ => return Err(MoveError::NotComputerTurn),
        };
        let mv = strategy
            .choose_move(&self.board, mark)
            .ok_or(MoveError::NoMovesAvailable)?;
        let outcome = self.apply(mv)?;
        Ok((mv, outcome))
    }

    fn apply(&mut self, mv: Move) -> Result<TurnOutcome, MoveError> {
        self.board.make_move(mv)?;
        debug!(mv = %mv, "Move applied");

        if self.board.has_won(mv.mark) {
            let opponent = 1 - self.current;
            self.players[self.current].record_mut().add_win();
            self.players[opponent].record_mut().add_loss();
            self.playing = false;
            let winner = &self.players[self.current];
            info!(winner = %winner.username(), "Game won");
            return Ok(TurnOutcome::Won {
                username: winner.username().clone(),
                mark: *winner.mark(),
            });
        }

        if self.board.is_tie() {
            for player in &mut self.players {
                player.record_mut().add_tie();
            }
            self.playing = false;
            info!("Game tied");
            return Ok(TurnOutcome::Tie);
        }

        self.current = 1 - self.current;
        Ok(TurnOutcome::Continue)
    }

    /// Starts another game: empty board, player one to move, records kept.
    #[instrument(skip(self))]
    pub fn rematch(&mut self) {
        if self.playing {
            warn!("Rematch requested while a game is still live");
        }
        self.board.reset();
        self.current = 0;
        self.playing = true;
    }

    /// Ends the current game without a result.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Records of both players for this session, keyed by username.
    pub fn scoreboard(&self) -> HashMap<String, PlayerRecord> {
        self.players
            .iter()
            .map(|p| (p.username().clone(), *p.record()))
            .collect()
    }

    /// Ends the session and hands back its scoreboard.
    #[instrument(skip(self))]
    pub fn finish(self) -> HashMap<String, PlayerRecord> {
        let scoreboard = self.scoreboard();
        info!(players = scoreboard.len(), "Session finished");
        scoreboard
    }
}
