//! JSON snapshots of boards and matches.
//!
//! Hazard maps are written with string keys, as JSON requires. On the way
//! back in, keys and values may be either strings or integers; both are
//! normalized to [`Cell`] before the board is rebuilt and checked. A decoded
//! state is always validated against its board before anyone can play on it.

use crate::board::{Board, Cell, Layout};
use crate::config::{ConfigError, MatchConfig};
use crate::error::{BoardError, StateError};
use crate::game::MatchState;
use crate::session::Match;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use thiserror::Error;

/// Error type for snapshot decoding.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Malformed JSON or wrong shape.
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// The stored hazards break a board invariant.
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
    /// The stored state does not fit its board.
    #[error("invalid state: {0}")]
    State(#[from] StateError),
    /// The stored configuration is invalid.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    /// A board marked classic whose hazards differ from the classic layout.
    #[error("board is marked classic but its hazards differ from the {size}-cell layout")]
    ClassicMismatch {
        /// Board size.
        size: Cell,
    },
    /// The board is not the one the configuration describes.
    #[error("config describes {expected} cells, board has {found}")]
    SizeMismatch {
        /// Size from the configuration.
        expected: Cell,
        /// Size of the stored board.
        found: Cell,
    },
    /// The board layout differs from the configuration's.
    #[error("config asks for a {expected:?} board, stored board is {found:?}")]
    LayoutMismatch {
        /// Layout from the configuration.
        expected: Layout,
        /// Layout of the stored board.
        found: Layout,
    },
    /// The state seats a different number of players than configured.
    #[error("config seats {expected} players, state has {found}")]
    PlayerCountMismatch {
        /// Seats from the configuration.
        expected: usize,
        /// Slots in the stored state.
        found: usize,
    },
}

/// A cell number as it may appear in stored JSON.
#[derive(Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Number(Cell),
    Text(String),
}

fn parse_cell(text: &str) -> Result<Cell, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("{text:?} is not a cell number"))
}

impl CellRepr {
    fn into_cell(self) -> Result<Cell, String> {
        match self {
            Self::Number(cell) => Ok(cell),
            Self::Text(text) => parse_cell(&text),
        }
    }
}

fn lenient_map<'de, D>(deserializer: D) -> Result<BTreeMap<Cell, Cell>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, CellRepr>::deserialize(deserializer)?;
    let mut map = BTreeMap::new();
    for (key, value) in raw {
        let from = parse_cell(&key).map_err(D::Error::custom)?;
        let to = value.into_cell().map_err(D::Error::custom)?;
        match map.entry(from) {
            Entry::Vacant(slot) => {
                slot.insert(to);
            }
            Entry::Occupied(_) => {
                return Err(D::Error::custom(format!("cell {from} appears twice")));
            }
        }
    }
    Ok(map)
}

/// A board as read from JSON, before its invariants are checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardSnapshot {
    /// Total cells.
    pub size: Cell,
    /// Ladder entries.
    #[serde(default, deserialize_with = "lenient_map")]
    pub shortcuts: BTreeMap<Cell, Cell>,
    /// Snake entries.
    #[serde(default, deserialize_with = "lenient_map")]
    pub setbacks: BTreeMap<Cell, Cell>,
    /// Stored layout; generated when absent.
    #[serde(default)]
    pub layout: Layout,
}

impl BoardSnapshot {
    /// Rebuild and check the board.
    ///
    /// Classic boards must match the built-in layout exactly; every other
    /// board goes through the strict invariant checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the hazards are not a valid board.
    pub fn into_board(self) -> Result<Board, SnapshotError> {
        match self.layout {
            Layout::Classic => {
                let board = Board::classic(self.size)?;
                if board.shortcuts() != &self.shortcuts || board.setbacks() != &self.setbacks {
                    return Err(SnapshotError::ClassicMismatch { size: self.size });
                }
                Ok(board)
            }
            Layout::Generated => Ok(Board::new(self.size, self.shortcuts, self.setbacks)?),
        }
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BoardSnapshot::deserialize(deserializer)?
            .into_board()
            .map_err(D::Error::custom)
    }
}

#[derive(Deserialize)]
struct MatchSnapshot {
    config: MatchConfig,
    board: BoardSnapshot,
    state: MatchState,
}

/// Serialize a board to pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_board(board: &Board) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(board)?)
}

/// Parse and check a board.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or the board is invalid.
pub fn decode_board(json: &str) -> Result<Board, SnapshotError> {
    let snapshot: BoardSnapshot = serde_json::from_str(json)?;
    snapshot.into_board()
}

/// Serialize a whole match to pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_match(game: &Match) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(game)?)
}

/// Parse a match and check config, board and state agree.
///
/// # Errors
///
/// Returns the first inconsistency found.
pub fn decode_match(json: &str) -> Result<Match, SnapshotError> {
    let MatchSnapshot {
        config,
        board,
        state,
    } = serde_json::from_str(json)?;

    config.validate()?;
    let board = board.into_board()?;

    if board.size() != config.size() {
        return Err(SnapshotError::SizeMismatch {
            expected: config.size(),
            found: board.size(),
        });
    }
    if board.layout() != config.layout {
        return Err(SnapshotError::LayoutMismatch {
            expected: config.layout,
            found: board.layout(),
        });
    }
    if state.player_count() != config.player_count() {
        return Err(SnapshotError::PlayerCountMismatch {
            expected: config.player_count(),
            found: state.player_count(),
        });
    }
    state.validate_against(&board)?;

    log::debug!(
        "Decoded match: round {}, {} players",
        state.round_number(),
        state.player_count()
    );
    Ok(Match::from_parts(config, board, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RandomDice;

    #[test]
    fn test_lenient_keys_and_values() {
        let board = decode_board(
            r#"{
                "size": 30,
                "shortcuts": {"3": 12, " 7 ": "20"},
                "setbacks": {"25": "5"}
            }"#,
        )
        .unwrap();

        assert_eq!(board.size(), 30);
        assert_eq!(board.shortcuts().get(&3), Some(&12));
        assert_eq!(board.shortcuts().get(&7), Some(&20));
        assert_eq!(board.setbacks().get(&25), Some(&5));
        assert_eq!(board.layout(), Layout::Generated);
    }

    #[test]
    fn test_rejects_bad_cells() {
        let bad_key = decode_board(r#"{"size": 30, "shortcuts": {"three": 12}}"#);
        assert!(matches!(bad_key, Err(SnapshotError::Json(_))));

        let duplicate = decode_board(r#"{"size": 30, "shortcuts": {"3": 12, "03": 14}}"#);
        assert!(matches!(duplicate, Err(SnapshotError::Json(_))));

        let negative = decode_board(r#"{"size": 30, "setbacks": {"20": -1}}"#);
        assert!(matches!(negative, Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_rejects_invalid_board() {
        let result = decode_board(r#"{"size": 30, "shortcuts": {"10": 5}}"#);
        assert!(matches!(
            result,
            Err(SnapshotError::Board(BoardError::ShortcutNotAscending { from: 10, to: 5 }))
        ));
    }

    #[test]
    fn test_classic_board_round_trip() {
        let board = Board::classic(100).unwrap();
        let json = encode_board(&board).unwrap();
        assert!(json.contains("\"80\": 100"));
        assert_eq!(decode_board(&json).unwrap(), board);
    }

    #[test]
    fn test_classic_mismatch() {
        let result = decode_board(
            r#"{"size": 25, "layout": "classic", "shortcuts": {"2": 14}, "setbacks": {}}"#,
        );
        assert!(matches!(
            result,
            Err(SnapshotError::ClassicMismatch { size: 25 })
        ));
    }

    #[test]
    fn test_board_deserialize_impl_checks() {
        let board: Board =
            serde_json::from_str(r#"{"size": 20, "shortcuts": {"2": "9"}}"#).unwrap();
        assert_eq!(board.apply_hazard(2), 9);

        let invalid: Result<Board, _> = serde_json::from_str(r#"{"size": 20, "setbacks": {"4": 9}}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_match_round_trip() {
        let mut game = Match::start(MatchConfig::small()).unwrap();
        let mut dice = RandomDice::seeded(8);
        for _ in 0..6 {
            game.play_round(&mut dice).unwrap();
        }

        let json = encode_match(&game).unwrap();
        let decoded = decode_match(&json).unwrap();
        assert_eq!(decoded, game);
    }

    #[test]
    fn test_match_state_is_validated() {
        let game = Match::start(MatchConfig::small()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&encode_match(&game).unwrap()).unwrap();
        value["state"]["positions"][1] = serde_json::json!(26);

        let result = decode_match(&value.to_string());
        assert!(matches!(
            result,
            Err(SnapshotError::State(StateError::PositionOutOfRange { slot: 1, .. }))
        ));
    }

    fn decode_edited(edit: impl FnOnce(&mut serde_json::Value)) -> Result<Match, SnapshotError> {
        let game = Match::start(MatchConfig::small()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&encode_match(&game).unwrap()).unwrap();
        edit(&mut value);
        decode_match(&value.to_string())
    }

    #[test]
    fn test_match_rules_are_validated() {
        let running_winner = decode_edited(|v| {
            v["state"]["positions"] = serde_json::json!([25, 0]);
        });
        assert!(matches!(
            running_winner,
            Err(SnapshotError::State(StateError::WinnerInRunningMatch { slot: 0 }))
        ));

        let no_winner = decode_edited(|v| {
            v["state"]["positions"] = serde_json::json!([3, 0]);
            v["state"]["status"] = serde_json::json!("finished");
        });
        assert!(matches!(
            no_winner,
            Err(SnapshotError::State(StateError::FinishedWithoutWinner { at_goal: 0 }))
        ));

        let streak = decode_edited(|v| {
            v["state"]["six_streak"] = serde_json::json!([9, 0]);
        });
        assert!(matches!(
            streak,
            Err(SnapshotError::State(StateError::SixStreakTooLong { slot: 0, streak: 9 }))
        ));

        let rounds = decode_edited(|v| {
            v["state"]["round_number"] = serde_json::json!(7);
        });
        assert!(matches!(
            rounds,
            Err(SnapshotError::State(StateError::RoundMismatch {
                rounds: 1,
                round_number: 7
            }))
        ));
    }

    #[test]
    fn test_finished_match_round_trips() {
        let mut game = Match::start(MatchConfig::small()).unwrap();
        game.play_to_end(&mut RandomDice::seeded(12), 10_000).unwrap();
        assert!(game.winner().is_some());

        let decoded = decode_match(&encode_match(&game).unwrap()).unwrap();
        assert_eq!(decoded.winner(), game.winner());
        assert!(decoded.state().is_finished());
    }

    #[test]
    fn test_match_player_count_checked() {
        let game = Match::start(MatchConfig::small()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&encode_match(&game).unwrap()).unwrap();
        value["config"]["mode"]["computers"] = serde_json::json!(2);

        let result = decode_match(&value.to_string());
        assert!(matches!(
            result,
            Err(SnapshotError::PlayerCountMismatch { expected: 3, found: 2 })
        ));
    }
}
