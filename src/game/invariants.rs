//! Match invariants - sanity checks that detect bugs.
//!
//! A state produced only by [`MatchState::play_round`] from a fresh match
//! should never trip these. They are bug detectors, not game rules.

use crate::board::Board;
use crate::game::round::SIX_STREAK_PENALTY;
use crate::game::state::{MatchState, Status};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

/// Check all match invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &MatchState, board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violate = |message: String| violations.push(InvariantViolation { message });

    for (slot, &position) in state.positions().iter().enumerate() {
        if position > board.size() {
            violate(format!(
                "Player {slot} at cell {position} beyond board of {}",
                board.size()
            ));
        }
    }

    for (slot, &streak) in state.six_streak().iter().enumerate() {
        if streak >= SIX_STREAK_PENALTY {
            violate(format!(
                "Player {slot} holds a six streak of {streak} without penalty"
            ));
        }
    }

    if state.current_player() >= state.player_count() {
        violate(format!(
            "Current player {} out of {} slots",
            state.current_player(),
            state.player_count()
        ));
    }

    let rounds = state.log().rounds().len();
    if u32::try_from(rounds).ok() != Some(state.round_number()) {
        violate(format!(
            "Log has {rounds} rounds but round number is {}",
            state.round_number()
        ));
    }

    let at_goal = state
        .positions()
        .iter()
        .filter(|&&p| p == board.size())
        .count();
    match state.status() {
        Status::InProgress if at_goal > 0 => {
            violate(format!("{at_goal} player(s) on the final cell of a running match"));
        }
        Status::Finished if at_goal != 1 => {
            violate(format!("Finished match has {at_goal} player(s) on the final cell"));
        }
        _ => {}
    }

    violations
}

/// Assert all match invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &MatchState, board: &Board) {
    let violations = check_invariants(state, board);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Match invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &MatchState, _board: &Board) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dice::RandomDice;

    #[test]
    fn test_fresh_state_is_clean() {
        let board = Board::classic(100).unwrap();
        let state = MatchState::new(4).unwrap();
        assert!(check_invariants(&state, &board).is_empty());
    }

    #[test]
    fn test_full_match_stays_clean() {
        let board = Board::classic(25).unwrap();
        let mut state = MatchState::new(3).unwrap();
        let mut dice = RandomDice::seeded(5);
        while !state.is_finished() {
            state.play_round(&board, &mut dice).unwrap();
            assert_invariants(&state, &board);
        }
    }

    #[test]
    fn test_detects_goal_in_running_match() {
        let board = Board::empty(20).unwrap();
        let state = MatchState::from_positions(vec![20, 0]).unwrap();
        let violations = check_invariants(&state, &board);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("final cell"));
    }

    #[test]
    fn test_detects_round_mismatch() {
        let board = Board::empty(20).unwrap();
        let mut state = MatchState::new(2).unwrap();
        state.round_number = 3;
        assert_eq!(check_invariants(&state, &board).len(), 1);
    }
}
