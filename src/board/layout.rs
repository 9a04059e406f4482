//! Fixed classic boards and the serpentine cell ordering.

use super::{Board, Cell, Layout};
use crate::error::BoardError;
use std::collections::BTreeMap;

const CLASSIC_100_SETBACKS: [(Cell, Cell); 10] = [
    (16, 6),
    (47, 26),
    (49, 11),
    (56, 53),
    (62, 19),
    (64, 60),
    (87, 24),
    (93, 73),
    (95, 75),
    (98, 78),
];

const CLASSIC_100_SHORTCUTS: [(Cell, Cell); 9] = [
    (1, 38),
    (4, 14),
    (9, 31),
    (21, 42),
    (28, 84),
    (36, 44),
    (51, 67),
    (71, 91),
    (80, 100),
];

const CLASSIC_25_SETBACKS: [(Cell, Cell); 3] = [(23, 8), (19, 7), (17, 4)];

const CLASSIC_25_SHORTCUTS: [(Cell, Cell); 3] = [(2, 14), (5, 12), (9, 21)];

impl Board {
    /// The hand-made board for `size` cells (25 or 100).
    ///
    /// The 100-cell board keeps its 80->100 ladder, which the strict
    /// [`Board::validate`] rules would refuse. Climbing it wins.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoClassicLayout`] for any other size.
    pub fn classic(size: Cell) -> Result<Self, BoardError> {
        let (shortcuts, setbacks): (&[(Cell, Cell)], &[(Cell, Cell)]) = match size {
            25 => (&CLASSIC_25_SHORTCUTS, &CLASSIC_25_SETBACKS),
            100 => (&CLASSIC_100_SHORTCUTS, &CLASSIC_100_SETBACKS),
            _ => return Err(BoardError::NoClassicLayout { size }),
        };

        Ok(Self::from_parts(
            size,
            shortcuts.iter().copied().collect::<BTreeMap<_, _>>(),
            setbacks.iter().copied().collect::<BTreeMap<_, _>>(),
            Layout::Classic,
        ))
    }
}

/// Cell numbers in display order for a `rows` x `cols` grid.
///
/// Reads top row first, left to right. Rows are counted from the bottom; even
/// rows run left to right and odd rows right to left, so cell 1 sits bottom
/// left and the path snakes upward.
#[must_use]
pub fn serpentine_cells(rows: u32, cols: u32) -> Vec<Cell> {
    let mut cells = Vec::with_capacity((rows * cols) as usize);
    for visual_row in 0..rows {
        let from_bottom = rows - 1 - visual_row;
        for col in 0..cols {
            let cell = if from_bottom % 2 == 0 {
                from_bottom * cols + col + 1
            } else {
                from_bottom * cols + (cols - col)
            };
            cells.push(cell);
        }
    }
    cells
}

/// Display coordinate `(row, col)` of `cell`, row 0 being the top.
///
/// Cell 0 (off the board) shares the position of cell 1.
#[must_use]
pub fn cell_coords(cell: Cell, rows: u32, cols: u32) -> Option<(u32, u32)> {
    if cols == 0 || rows == 0 {
        return None;
    }
    let index = cell.max(1) - 1;
    let from_bottom = index / cols;
    if from_bottom >= rows {
        return None;
    }
    let offset = index % cols;
    let col = if from_bottom % 2 == 0 {
        offset
    } else {
        cols - 1 - offset
    };
    Some((rows - 1 - from_bottom, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{HazardKind, MIN_SIZE};
    use std::collections::BTreeSet;

    #[test]
    fn test_classic_100() {
        let board = Board::classic(100).unwrap();
        assert_eq!(board.layout(), Layout::Classic);
        assert_eq!(board.shortcuts().len(), 9);
        assert_eq!(board.setbacks().len(), 10);
        assert_eq!(board.hazard_at(80), Some((HazardKind::Shortcut, 100)));
        assert_eq!(board.apply_hazard(98), 78);
    }

    #[test]
    fn test_classic_boards_only_break_final_cell_rule() {
        for size in [25, 100] {
            let board = Board::classic(size).unwrap();
            assert!(size >= MIN_SIZE);

            let mut used = BTreeSet::new();
            for (&from, &to) in board.shortcuts() {
                assert!(to > from);
                assert!(from >= 1 && to <= size);
                assert!(used.insert(from) && used.insert(to));
            }
            for (&from, &to) in board.setbacks() {
                assert!(to < from);
                assert!(to >= 1 && from < size);
                assert!(used.insert(from) && used.insert(to));
            }
        }
    }

    #[test]
    fn test_no_classic_for_other_sizes() {
        assert_eq!(
            Board::classic(64),
            Err(BoardError::NoClassicLayout { size: 64 })
        );
    }

    #[test]
    fn test_serpentine_3x3() {
        assert_eq!(serpentine_cells(3, 3), vec![7, 8, 9, 6, 5, 4, 1, 2, 3]);
    }

    #[test]
    fn test_serpentine_10x10_corners() {
        let cells = serpentine_cells(10, 10);
        assert_eq!(cells.len(), 100);
        // Top row is row 9 from the bottom (odd), so it runs right to left.
        assert_eq!(cells[0], 100);
        assert_eq!(cells[9], 91);
        assert_eq!(cells[90], 1);
        assert_eq!(cells[99], 10);
    }

    #[test]
    fn test_cell_coords_matches_serpentine() {
        let (rows, cols) = (5, 5);
        let cells = serpentine_cells(rows, cols);
        for (i, &cell) in cells.iter().enumerate() {
            let i = u32::try_from(i).unwrap();
            assert_eq!(cell_coords(cell, rows, cols), Some((i / cols, i % cols)));
        }
        assert_eq!(cell_coords(0, rows, cols), cell_coords(1, rows, cols));
        assert_eq!(cell_coords(26, rows, cols), None);
    }
}
