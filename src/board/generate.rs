//! Random hazard placement.

// Density math goes through f64 and back to counts
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use super::{Board, Cell, Layout, MIN_SIZE};
use crate::error::GenerationError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

/// Sampling attempts allowed per hazard before giving up on that kind.
pub const MAX_ATTEMPTS: u32 = 1000;

/// Optional knobs for [`generate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Ladders to place (default: [`target_count`]).
    pub shortcuts: Option<usize>,
    /// Snakes to place (default: [`target_count`]).
    pub setbacks: Option<usize>,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

/// Default number of each hazard kind for a board of `size` cells.
///
/// Scales with the square root of the size so small and large boards stay
/// equally busy. Boards of 25 cells or fewer always get at least three.
#[must_use]
pub fn target_count(size: Cell) -> usize {
    let count = ((f64::from(size).sqrt() * 0.6).floor() as usize).max(2);
    if size <= 25 { count.max(3) } else { count }
}

/// Shortest jump any hazard may make.
#[must_use]
pub const fn min_distance(size: Cell) -> Cell {
    let dist = size / 20;
    if dist < 2 { 2 } else { dist }
}

/// Generate a board of `size` cells.
///
/// # Errors
///
/// Returns [`GenerationError::BoardTooSmall`] if `size` is below [`MIN_SIZE`].
pub fn generate(size: Cell, options: &GenerateOptions) -> Result<Board, GenerationError> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_with_rng(size, options.shortcuts, options.setbacks, &mut rng)
}

/// Generate a board drawing from a caller-supplied RNG.
///
/// If a hazard cannot be placed within [`MAX_ATTEMPTS`] samples, placement of
/// that kind stops and the board is returned with fewer entries.
///
/// # Errors
///
/// Returns [`GenerationError::BoardTooSmall`] if `size` is below [`MIN_SIZE`].
pub fn generate_with_rng<R: Rng + ?Sized>(
    size: Cell,
    shortcuts: Option<usize>,
    setbacks: Option<usize>,
    rng: &mut R,
) -> Result<Board, GenerationError> {
    if size < MIN_SIZE {
        return Err(GenerationError::BoardTooSmall {
            size,
            min: MIN_SIZE,
        });
    }

    let dist = min_distance(size);
    let mut occupied = BTreeSet::new();

    let wanted = shortcuts.unwrap_or_else(|| target_count(size));
    let shortcut_map = place_shortcuts(size, dist, wanted, &mut occupied, rng);

    let wanted = setbacks.unwrap_or_else(|| target_count(size));
    let setback_map = place_setbacks(size, dist, wanted, &shortcut_map, &mut occupied, rng);

    log::debug!(
        "generated board: size={size} shortcuts={} setbacks={} min_distance={dist}",
        shortcut_map.len(),
        setback_map.len()
    );

    let board = Board::from_parts(size, shortcut_map, setback_map, Layout::Generated);
    debug_assert!(board.validate().is_ok());
    Ok(board)
}

/// Place ladders: base in `1..=size-1-dist`, top in `base+dist..=size-1`.
fn place_shortcuts<R: Rng + ?Sized>(
    size: Cell,
    dist: Cell,
    wanted: usize,
    occupied: &mut BTreeSet<Cell>,
    rng: &mut R,
) -> BTreeMap<Cell, Cell> {
    let mut placed = BTreeMap::new();

    for _ in 0..wanted {
        let accepted = (0..MAX_ATTEMPTS).find_map(|_| {
            let base = rng.gen_range(1..=size - 1 - dist);
            let top = rng.gen_range(base + dist..=size - 1);
            if base == top || occupied.contains(&base) || occupied.contains(&top) {
                log::trace!("rejected shortcut candidate {base}->{top}");
                return None;
            }
            Some((base, top))
        });

        let Some((base, top)) = accepted else {
            log::warn!(
                "placed {} of {wanted} shortcuts on a {size}-cell board before giving up",
                placed.len()
            );
            break;
        };

        occupied.insert(base);
        occupied.insert(top);
        placed.insert(base, top);
    }

    placed
}

/// Place snakes: head in `1+dist..=size-1`, tail in `1..=head-dist`.
///
/// Heads never sit on a ladder top.
fn place_setbacks<R: Rng + ?Sized>(
    size: Cell,
    dist: Cell,
    wanted: usize,
    shortcuts: &BTreeMap<Cell, Cell>,
    occupied: &mut BTreeSet<Cell>,
    rng: &mut R,
) -> BTreeMap<Cell, Cell> {
    let mut placed = BTreeMap::new();

    for _ in 0..wanted {
        let accepted = (0..MAX_ATTEMPTS).find_map(|_| {
            let head = rng.gen_range(1 + dist..=size - 1);
            let tail = rng.gen_range(1..=head - dist);
            if head == tail
                || occupied.contains(&head)
                || occupied.contains(&tail)
                || shortcuts.values().any(|&top| top == head)
            {
                log::trace!("rejected setback candidate {head}->{tail}");
                return None;
            }
            Some((head, tail))
        });

        let Some((head, tail)) = accepted else {
            log::warn!(
                "placed {} of {wanted} setbacks on a {size}-cell board before giving up",
                placed.len()
            );
            break;
        };

        occupied.insert(head);
        occupied.insert(tail);
        placed.insert(head, tail);
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_count() {
        assert_eq!(target_count(10), 3);
        assert_eq!(target_count(25), 3);
        assert_eq!(target_count(36), 3);
        assert_eq!(target_count(100), 6);
        assert_eq!(target_count(400), 12);
    }

    #[test]
    fn test_min_distance() {
        assert_eq!(min_distance(10), 2);
        assert_eq!(min_distance(25), 2);
        assert_eq!(min_distance(60), 3);
        assert_eq!(min_distance(100), 5);
    }

    #[test]
    fn test_rejects_small_board() {
        assert_eq!(
            generate(9, &GenerateOptions::default()),
            Err(GenerationError::BoardTooSmall { size: 9, min: 10 })
        );
    }

    #[test]
    fn test_generation_determinism() {
        let options = GenerateOptions {
            seed: Some(42),
            ..GenerateOptions::default()
        };
        let a = generate(100, &options).unwrap();
        let b = generate(100, &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_counts_on_roomy_board() {
        let options = GenerateOptions {
            seed: Some(7),
            ..GenerateOptions::default()
        };
        let board = generate(100, &options).unwrap();
        assert_eq!(board.shortcuts().len(), 6);
        assert_eq!(board.setbacks().len(), 6);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_partial_board_when_crowded() {
        // A 10-cell board has 9 usable cells, so 10 ladders cannot fit.
        let options = GenerateOptions {
            shortcuts: Some(10),
            setbacks: Some(10),
            seed: Some(1),
        };
        let board = generate(10, &options).unwrap();
        assert!(board.shortcuts().len() < 10);
        assert!(board.shortcuts().len() + board.setbacks().len() <= 4);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_valid_across_seeds_and_sizes() {
        for size in [10, 25, 50, 100, 144] {
            for seed in 0..50 {
                let options = GenerateOptions {
                    seed: Some(seed),
                    ..GenerateOptions::default()
                };
                let board = generate(size, &options).unwrap();
                assert!(
                    board.validate().is_ok(),
                    "size {size} seed {seed}: {:?}",
                    board.validate()
                );
            }
        }
    }
}
