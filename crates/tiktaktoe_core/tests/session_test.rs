//! Whole-game tests for sessions against computer opponents.

use tiktaktoe_core::{
    Difficulty, GameSession, Mark, Player, PlayerRecord, Position, TurnOutcome,
};

/// Plays one game where the human always takes the first empty square.
fn play_out(session: &mut GameSession) -> TurnOutcome {
    loop {
        let outcome = if session.is_computer_turn() {
            session.play_computer_turn().expect("computer move").1
        } else {
            let target = session
                .board()
                .valid_moves(*session.current_player().mark())
                .first()
                .map(|mv| mv.position)
                .expect("board has an empty square while playing");
            session.place(target).expect("human move")
        };
        if outcome.is_final() {
            return outcome;
        }
    }
}

#[test]
fn test_full_game_against_easy_ends() {
    let mut session = GameSession::with_strategy(
        Player::human("ann", Mark::X),
        Player::computer(Difficulty::Easy, Mark::O),
        Difficulty::Easy.seeded_strategy(42),
    )
    .expect("session");

    let outcome = play_out(&mut session);
    assert!(!session.is_playing());

    let board = session.scoreboard();
    let ann = board["ann"];
    let ai = board["EasyAi"];
    assert_eq!(ann.games_played(), 1);
    assert_eq!(ai.games_played(), 1);
    match outcome {
        TurnOutcome::Won { username, .. } if username == "ann" => {
            assert_eq!(ann, PlayerRecord::new(1, 0, 0));
            assert_eq!(ai, PlayerRecord::new(0, 1, 0));
        }
        TurnOutcome::Won { .. } => {
            assert_eq!(ann, PlayerRecord::new(0, 1, 0));
            assert_eq!(ai, PlayerRecord::new(1, 0, 0));
        }
        TurnOutcome::Tie => {
            assert_eq!(ann, PlayerRecord::new(0, 0, 1));
            assert_eq!(ai, PlayerRecord::new(0, 0, 1));
        }
        TurnOutcome::Continue => unreachable!(),
    }
}

#[test]
fn test_medium_blocks_then_wins_against_naive_play() {
    // Human X fills TopLeft, TopCenter, ... in order; Medium O must block
    // TopRight, then punish.
    let mut session = GameSession::with_strategy(
        Player::human("ann", Mark::X),
        Player::computer(Difficulty::Medium, Mark::O),
        Difficulty::Medium.seeded_strategy(9),
    )
    .expect("session");

    session.place(Position::TopLeft).expect("x1");
    let (mv, _) = session.play_computer_turn().expect("o1");
    assert_eq!(mv.position, Position::Center);

    session.place(Position::TopCenter).expect("x2");
    let (mv, _) = session.play_computer_turn().expect("o2");
    assert_eq!(mv.position, Position::TopRight, "must block the top row");

    session.place(Position::MiddleLeft).expect("x3");
    let (mv, outcome) = session.play_computer_turn().expect("o3");
    assert_eq!(mv.position, Position::BottomLeft, "anti-diagonal win");
    assert_eq!(
        outcome,
        TurnOutcome::Won {
            username: "MediumAi".to_string(),
            mark: Mark::O
        }
    );
}

#[test]
fn test_records_accumulate_over_rematches() {
    let mut session = GameSession::with_strategy(
        Player::human("ann", Mark::O),
        Player::computer(Difficulty::Medium, Mark::X),
        Difficulty::Medium.seeded_strategy(1),
    )
    .expect("session");

    for _ in 0..3 {
        play_out(&mut session);
        session.rematch();
    }

    let scores = session.finish();
    assert_eq!(scores["ann"].games_played(), 3);
    assert_eq!(scores["MediumAi"].games_played(), 3);
    assert_eq!(scores["ann"].wins(), scores["MediumAi"].losses());
}
