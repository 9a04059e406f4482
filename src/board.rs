//! Board and hazard maps.
//!
//! A board is immutable once built. Cell 0 is the off-board start, cell
//! `size` is the winning cell, and hazards live strictly between them.

mod generate;
mod layout;

pub use generate::{GenerateOptions, MAX_ATTEMPTS, generate, generate_with_rng, min_distance, target_count};
pub use layout::{cell_coords, serpentine_cells};

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Smallest board the engine accepts.
pub const MIN_SIZE: u32 = 10;

/// A cell index. 0 is the start, `size` is the goal.
pub type Cell = u32;

/// Where a board's hazards came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Sampled by the generator.
    #[default]
    Generated,
    /// One of the fixed hand-made boards.
    Classic,
}

/// Kind of hazard sitting on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    /// A ladder: moves the token up.
    Shortcut,
    /// A snake: moves the token down.
    Setback,
}

/// A board: size plus the two hazard maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: Cell,
    shortcuts: BTreeMap<Cell, Cell>,
    setbacks: BTreeMap<Cell, Cell>,
    layout: Layout,
}

impl Board {
    /// Build a board from explicit hazard maps, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] naming the first violated invariant.
    pub fn new(
        size: Cell,
        shortcuts: BTreeMap<Cell, Cell>,
        setbacks: BTreeMap<Cell, Cell>,
    ) -> Result<Self, BoardError> {
        let board = Self::from_parts(size, shortcuts, setbacks, Layout::Generated);
        board.validate()?;
        Ok(board)
    }

    /// A board with no hazards at all.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is below [`MIN_SIZE`].
    pub fn empty(size: Cell) -> Result<Self, BoardError> {
        Self::new(size, BTreeMap::new(), BTreeMap::new())
    }

    /// Build a board without checking invariants.
    ///
    /// For maps the caller already trusts, such as a persisted board. The
    /// movement rules stay total on any board built this way.
    #[must_use]
    pub fn new_unchecked(
        size: Cell,
        shortcuts: BTreeMap<Cell, Cell>,
        setbacks: BTreeMap<Cell, Cell>,
    ) -> Self {
        Self::from_parts(size, shortcuts, setbacks, Layout::Generated)
    }

    pub(crate) fn from_parts(
        size: Cell,
        shortcuts: BTreeMap<Cell, Cell>,
        setbacks: BTreeMap<Cell, Cell>,
        layout: Layout,
    ) -> Self {
        Self {
            size,
            shortcuts,
            setbacks,
            layout,
        }
    }

    /// Total cell count; also the winning cell.
    #[must_use]
    pub const fn size(&self) -> Cell {
        self.size
    }

    /// Ladder entries, base to top.
    #[must_use]
    pub const fn shortcuts(&self) -> &BTreeMap<Cell, Cell> {
        &self.shortcuts
    }

    /// Snake entries, head to tail.
    #[must_use]
    pub const fn setbacks(&self) -> &BTreeMap<Cell, Cell> {
        &self.setbacks
    }

    /// How this board was produced.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// The hazard starting on `cell`, if any. Shortcuts are checked first.
    #[must_use]
    pub fn hazard_at(&self, cell: Cell) -> Option<(HazardKind, Cell)> {
        if let Some(&to) = self.shortcuts.get(&cell) {
            return Some((HazardKind::Shortcut, to));
        }
        self.setbacks
            .get(&cell)
            .map(|&to| (HazardKind::Setback, to))
    }

    /// Where a token landing on `cell` ends up.
    #[must_use]
    pub fn apply_hazard(&self, cell: Cell) -> Cell {
        self.hazard_at(cell).map_or(cell, |(_, to)| to)
    }

    /// Check the board invariants.
    ///
    /// Every endpoint lies in `1..size`, shortcuts climb, setbacks descend,
    /// and no cell is used twice across both maps. The last rule also keeps a
    /// setback head off every shortcut top.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.size < MIN_SIZE {
            return Err(BoardError::TooSmall {
                size: self.size,
                min: MIN_SIZE,
            });
        }

        let in_range = |cell: Cell| cell >= 1 && cell < self.size;
        let mut used = BTreeSet::new();

        for (&from, &to) in &self.shortcuts {
            if !in_range(from) || !in_range(to) {
                return Err(BoardError::OutOfRange {
                    from,
                    to,
                    size: self.size,
                });
            }
            if to <= from {
                return Err(BoardError::ShortcutNotAscending { from, to });
            }
            for cell in [from, to] {
                if !used.insert(cell) {
                    return Err(BoardError::Overlap { cell });
                }
            }
        }

        for (&from, &to) in &self.setbacks {
            if !in_range(from) || !in_range(to) {
                return Err(BoardError::OutOfRange {
                    from,
                    to,
                    size: self.size,
                });
            }
            if to >= from {
                return Err(BoardError::SetbackNotDescending { from, to });
            }
            for cell in [from, to] {
                if !used.insert(cell) {
                    return Err(BoardError::Overlap { cell });
                }
            }
        }

        Ok(())
    }
}
