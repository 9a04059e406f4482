//! Single-move resolution.
//!
//! Order of rules:
//! 1. Exact landing on the final cell wins, whatever hazard is configured there.
//! 2. Below the final cell, the landing cell's hazard applies.
//! 3. Past the final cell, the token reflects back by the overshoot, then the
//!    hazard on the reflected cell applies.

use crate::board::{Board, Cell, HazardKind};
use serde::{Deserialize, Serialize};

/// Outcome of one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Where the token ends up.
    pub final_position: Cell,
    /// Where the token landed before any hazard applied.
    pub pre_hazard_position: Cell,
}

impl Move {
    /// Whether a hazard changed the landing cell.
    #[must_use]
    pub const fn hit_hazard(&self) -> bool {
        self.final_position != self.pre_hazard_position
    }

    /// Which kind of hazard applied, judged by direction.
    #[must_use]
    pub const fn hazard(&self) -> Option<HazardKind> {
        if self.final_position > self.pre_hazard_position {
            Some(HazardKind::Shortcut)
        } else if self.final_position < self.pre_hazard_position {
            Some(HazardKind::Setback)
        } else {
            None
        }
    }
}

/// Whether a roll of `dice` from `position` overshoots the final cell and
/// bounces back.
#[must_use]
pub fn bounced(position: Cell, dice: u8, board: &Board) -> bool {
    position.saturating_add(Cell::from(dice)) > board.size()
}

/// Resolve one move from `position` by `dice` pips.
///
/// Pure and total: the result always lies in `0..=board.size()`. A reflection
/// that would go below cell 0 clamps to 0.
#[must_use]
pub fn resolve_move(position: Cell, dice: u8, board: &Board) -> Move {
    let size = board.size();
    let raw_target = position.saturating_add(Cell::from(dice));

    if raw_target == size {
        return Move {
            final_position: size,
            pre_hazard_position: size,
        };
    }

    let landing = if raw_target < size {
        raw_target
    } else {
        size.saturating_sub(raw_target - size)
    };

    Move {
        final_position: board.apply_hazard(landing).min(size),
        pre_hazard_position: landing,
    }
}
