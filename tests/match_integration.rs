//! End-to-end tests over the public API: movement scenarios, full matches,
//! snapshots, config files and replay.
//!
//! Run with: cargo test --release match_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::fs;

use ladders::board::{Board, Cell, Layout};
use ladders::config::{MatchConfig, Mode};
use ladders::game::{
    LogEntry, MATCH_STARTED, MatchState, RandomDice, RecordingDice, RoundOutcome, Status,
};
use ladders::movement::resolve_move;
use ladders::replay::{Recording, ReplayEngine};
use ladders::session::{Match, SessionError};
use ladders::simulate::{DEFAULT_MAX_TURNS, run_batch, run_match};
use ladders::snapshot::{decode_match, encode_match};
use tempfile::tempdir;

fn board_100(shortcuts: &[(Cell, Cell)], setbacks: &[(Cell, Cell)]) -> Board {
    Board::new_unchecked(
        100,
        shortcuts.iter().copied().collect::<BTreeMap<_, _>>(),
        setbacks.iter().copied().collect::<BTreeMap<_, _>>(),
    )
}

#[test]
fn test_shortcut_scenario() {
    let mv = resolve_move(0, 2, &board_100(&[(2, 38)], &[]));
    assert_eq!((mv.final_position, mv.pre_hazard_position), (38, 2));
}

#[test]
fn test_setback_scenario() {
    let mv = resolve_move(15, 1, &board_100(&[], &[(16, 6)]));
    assert_eq!((mv.final_position, mv.pre_hazard_position), (6, 16));
}

#[test]
fn test_overshoot_then_setback_scenario() {
    let mv = resolve_move(99, 4, &board_100(&[], &[(97, 50)]));
    assert_eq!((mv.final_position, mv.pre_hazard_position), (50, 97));
}

#[test]
fn test_exact_win_overrides_hazards_scenario() {
    let board = board_100(&[(100, 10)], &[(100, 5)]);
    let mv = resolve_move(94, 6, &board);
    assert_eq!((mv.final_position, mv.pre_hazard_position), (100, 100));
}

#[test]
fn test_three_sixes_scenario() {
    let board = Board::classic(100).unwrap();
    let mut state = MatchState::new(2).unwrap();
    let mut sixes = || 6u8;

    for _ in 0..3 {
        state.play_round(&board, &mut sixes).unwrap();
    }

    assert_eq!(state.positions()[0], 0);
    assert_eq!(state.current_player(), 1);
    let last = state.log().current_round().last().unwrap();
    assert_eq!(
        last,
        &LogEntry::system(
            "Player 1 rolled six three times in a row and was penalized: returned to start."
        )
    );
    let last_move = state.last_move().unwrap();
    assert_eq!((last_move.to, last_move.pre_hazard_position), (0, None));
}

#[test]
fn test_classic_ladder_to_goal_wins() {
    let board = Board::classic(100).unwrap();
    let mut state = MatchState::from_positions(vec![77, 0]).unwrap();
    let outcome = state.play_round(&board, &mut || 3u8).unwrap();

    assert!(matches!(outcome, RoundOutcome::Won { player: 0, .. }));
    assert_eq!(state.status(), Status::Finished);
    assert_eq!(state.winner(&board), Some(0));
    assert!(state.play_round(&board, &mut || 1u8).is_err());
}

#[test]
fn test_versus_computer_session() {
    let config = MatchConfig {
        mode: Mode::VersusComputer { computers: 2 },
        ..MatchConfig::small()
    };
    let mut game = Match::start(config).unwrap();
    let mut dice = RandomDice::seeded(77);

    while !game.state().is_finished() {
        assert!(game.is_human_turn());
        let human = game.state().current_player();
        assert_eq!(human, 0);
        game.play_turn(human, &mut dice).unwrap();
        if !game.state().is_finished() && !game.is_human_turn() {
            game.play_computer_turns(&mut dice).unwrap();
        }
    }

    assert!(game.winner().is_some());
    assert!(matches!(
        game.play_computer_turns(&mut dice),
        Err(SessionError::Finished(_))
    ));
}

#[test]
fn test_snapshot_resume_continues_identically() {
    let mut game = Match::start(MatchConfig::default()).unwrap();
    let mut dice = RandomDice::seeded(5);
    for _ in 0..10 {
        game.play_round(&mut dice).unwrap();
    }

    let mut resumed = decode_match(&encode_match(&game).unwrap()).unwrap();
    let mut dice_a = RandomDice::seeded(6);
    let mut dice_b = RandomDice::seeded(6);
    game.play_to_end(&mut dice_a, DEFAULT_MAX_TURNS).unwrap();
    resumed.play_to_end(&mut dice_b, DEFAULT_MAX_TURNS).unwrap();

    assert_eq!(game, resumed);
}

#[test]
fn test_snapshot_from_string_keyed_json() {
    let json = r#"{
        "config": {"rows": 4, "cols": 5, "layout": "generated",
                   "mode": {"kind": "multiplayer", "players": 2}},
        "board": {"size": 20, "shortcuts": {"3": "11"}, "setbacks": {"18": 4}},
        "state": {
            "positions": [0, 0],
            "current_player": 0,
            "six_streak": [0, 0],
            "status": "in_progress",
            "round_number": 1,
            "log": [[{"player": null, "text": "Match started."}]],
            "last_move": null,
            "last_roll": null,
            "message": "Match started."
        }
    }"#;

    let mut game = decode_match(json).unwrap();
    assert_eq!(game.board().layout(), Layout::Generated);
    assert_eq!(game.state().message(), MATCH_STARTED);

    game.play_round(&mut || 3u8).unwrap();
    assert_eq!(game.state().positions(), &[11, 0]);
}

#[test]
fn test_config_file_to_match() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ladders.toml");
    fs::write(
        &path,
        "rows = 6\ncols = 6\nlayout = \"generated\"\nseed = 3\n\n[mode]\nkind = \"multiplayer\"\nplayers = 4\n",
    )
    .unwrap();

    let config = MatchConfig::load(&path).unwrap();
    let game = Match::start(config).unwrap();
    assert_eq!(game.board().size(), 36);
    assert_eq!(game.state().player_count(), 4);
    assert!(game.is_human_turn());
    assert_eq!(Match::start(config).unwrap().board(), game.board());
}

#[test]
fn test_recording_replays_to_same_result() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("match.json");

    let config = MatchConfig {
        layout: Layout::Generated,
        rows: 8,
        cols: 8,
        mode: Mode::Multiplayer { players: 3 },
        ..MatchConfig::default()
    };
    let mut game = Match::start(config).unwrap();
    let start = game.clone();
    let mut inner = RandomDice::seeded(31);
    let mut dice = RecordingDice::new(&mut inner);
    game.play_to_end(&mut dice, DEFAULT_MAX_TURNS).unwrap();

    Recording::from_match(&start, dice.into_rolls())
        .save(&path)
        .unwrap();
    let recording = Recording::load(&path).unwrap();
    let total = recording.rolls.len();

    let mut engine = ReplayEngine::new(recording).unwrap();
    while engine.step() < total {
        engine.step_forward().unwrap();
    }
    assert_eq!(engine.state(), game.state());

    engine.goto_step(total / 2).unwrap();
    assert_eq!(engine.step(), total / 2);
    assert!(!engine.is_game_over());
}

#[test]
fn test_simulation_is_reproducible() {
    let config = MatchConfig {
        mode: Mode::Multiplayer { players: 4 },
        ..MatchConfig::default()
    };
    let a = run_batch(9, 50, &config, DEFAULT_MAX_TURNS).unwrap();
    let b = run_batch(9, 50, &config, DEFAULT_MAX_TURNS).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.games_played, 50);

    let single = run_match(9, &config, DEFAULT_MAX_TURNS).unwrap();
    assert!(single.winner.is_some_and(|w| w < 4));
}
