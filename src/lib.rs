// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Ladders: a deterministic round-resolution engine for Snakes & Ladders.
//!
//! This crate provides:
//! - Board generation with non-overlapping shortcuts (ladders) and setbacks
//!   (snakes), plus the two fixed classic boards
//! - A pure movement resolver with exact-landing and reflection rules
//! - A turn state machine with extra turns on six and the three-sixes penalty
//! - Seating, snapshots, headless simulation and replay on top
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Session / Simulate / Replay        │
//! ├─────────────────────────────────────┤
//! │  Round state machine (game)         │
//! ├─────────────────────────────────────┤
//! │  Movement resolver                  │
//! ├─────────────────────────────────────┤
//! │  Board + generator                  │
//! └─────────────────────────────────────┘
//! ```
//!
//! Randomness enters only through the board generator's RNG and the
//! [`DiceRoller`] passed to each round, so a seeded match is reproducible.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod movement;
pub mod replay;
pub mod session;
pub mod simulate;
pub mod snapshot;

pub use error::{BoardError, GenerationError, InvalidStateError, StateError};

// Re-export key types at crate root for convenience
pub use board::{Board, Cell, HazardKind, Layout, generate};
pub use config::{MatchConfig, Mode};
pub use game::{DiceRoller, MatchState, RandomDice, RoundOutcome, Status};
pub use movement::{Move, resolve_move};
pub use session::{Match, SessionError};
