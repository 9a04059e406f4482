//! Round resolution: one die roll for the current player.

use crate::board::{Board, Cell, HazardKind};
use crate::error::InvalidStateError;
use crate::game::dice::{DiceRoller, MAX_FACE, MIN_FACE};
use crate::game::event_log::LogEntry;
use crate::game::state::{LastMove, MatchState, Status};
use crate::movement::{Move, bounced, resolve_move};
use std::fmt::Write as _;

/// Consecutive sixes that send a player back to the start.
pub const SIX_STREAK_PENALTY: u8 = 3;

/// What a single round did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The token moved and the match goes on.
    Moved {
        /// Slot that moved.
        player: usize,
        /// Die value.
        roll: u8,
        /// Resolved move.
        mv: Move,
        /// Whether the same slot plays again.
        extra_turn: bool,
    },
    /// The token reached the final cell.
    Won {
        /// Winning slot.
        player: usize,
        /// Die value.
        roll: u8,
        /// Resolved move.
        mv: Move,
    },
    /// Third six in a row: back to the start, turn passes.
    Penalized {
        /// Penalized slot.
        player: usize,
        /// Die value (always six).
        roll: u8,
        /// Cell the token was on before the reset.
        from: Cell,
    },
}

impl RoundOutcome {
    /// Slot that acted this round.
    #[must_use]
    pub const fn player(&self) -> usize {
        match *self {
            Self::Moved { player, .. } | Self::Won { player, .. } | Self::Penalized { player, .. } => {
                player
            }
        }
    }

    /// Die value rolled this round.
    #[must_use]
    pub const fn roll(&self) -> u8 {
        match *self {
            Self::Moved { roll, .. } | Self::Won { roll, .. } | Self::Penalized { roll, .. } => roll,
        }
    }
}

impl MatchState {
    /// Resolve one round for the current player.
    ///
    /// Rolls once, then either applies the three-sixes penalty or moves the
    /// token, logs the result and hands the turn on. A six keeps the turn
    /// unless it triggered the penalty. Turn order wrapping to slot 0 starts a
    /// new round in both the counter and the log.
    ///
    /// The state must fit `board` (see [`MatchState::validate_against`]).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError`] without touching the state if the match
    /// is already finished.
    pub fn play_round<D: DiceRoller + ?Sized>(
        &mut self,
        board: &Board,
        dice: &mut D,
    ) -> Result<RoundOutcome, InvalidStateError> {
        if self.is_finished() {
            return Err(InvalidStateError);
        }

        let player = self.current_player;
        let roll = checked_roll(dice);
        self.last_roll = Some(roll);

        if roll == MAX_FACE {
            self.six_streak[player] = self.six_streak[player].saturating_add(1);
        } else {
            self.six_streak[player] = 0;
        }

        if self.six_streak[player] >= SIX_STREAK_PENALTY {
            return Ok(self.penalize(player, roll));
        }

        let from = self.positions[player];
        let mv = resolve_move(from, roll, board);
        self.positions[player] = mv.final_position;
        self.last_move = Some(LastMove {
            player,
            from,
            to: mv.final_position,
            dice: roll,
            pre_hazard_position: mv.hit_hazard().then_some(mv.pre_hazard_position),
        });

        let mut message = describe_move(player, roll, from, mv, board);
        log::debug!(
            "round {}: player {player} rolled {roll}, {from} -> {} (landed {})",
            self.round_number,
            mv.final_position,
            mv.pre_hazard_position
        );

        if mv.final_position == board.size() {
            self.status = Status::Finished;
            let win = format!("Player {} won!", player + 1);
            self.log.push(LogEntry::player(player, message.clone()));
            self.log.push(LogEntry::system(win.clone()));
            self.message = format!("{message} {win}");
            log::info!("player {player} won in round {}", self.round_number);
            return Ok(RoundOutcome::Won { player, roll, mv });
        }

        let extra_turn = roll == MAX_FACE;
        if extra_turn {
            let _ = write!(message, " Player {} rolls again.", player + 1);
        }
        self.log.push(LogEntry::player(player, message.clone()));
        self.message = message;
        if !extra_turn {
            self.pass_turn();
        }

        Ok(RoundOutcome::Moved {
            player,
            roll,
            mv,
            extra_turn,
        })
    }

    fn penalize(&mut self, player: usize, roll: u8) -> RoundOutcome {
        let from = self.positions[player];
        self.six_streak[player] = 0;
        self.positions[player] = 0;
        self.last_move = Some(LastMove {
            player,
            from,
            to: 0,
            dice: roll,
            pre_hazard_position: None,
        });

        let message = format!(
            "Player {} rolled six three times in a row and was penalized: returned to start.",
            player + 1
        );
        self.log.push(LogEntry::system(message.clone()));
        self.message = message;
        log::debug!("round {}: player {player} penalized from {from}", self.round_number);

        self.pass_turn();
        RoundOutcome::Penalized { player, roll, from }
    }

    /// Hand the turn to the next slot, opening a new round on wrap.
    fn pass_turn(&mut self) {
        self.current_player = (self.current_player + 1) % self.positions.len();
        if self.current_player == 0 {
            self.round_number += 1;
            self.log.open_round();
        }
    }
}

/// Roll and keep the value on the die.
fn checked_roll<D: DiceRoller + ?Sized>(dice: &mut D) -> u8 {
    let roll = dice.roll();
    if (MIN_FACE..=MAX_FACE).contains(&roll) {
        roll
    } else {
        log::warn!("dice returned {roll}, clamping to {MIN_FACE}..={MAX_FACE}");
        roll.clamp(MIN_FACE, MAX_FACE)
    }
}

fn describe_move(player: usize, roll: u8, from: Cell, mv: Move, board: &Board) -> String {
    let mut notes = Vec::new();
    if bounced(from, roll, board) {
        notes.push(format!("bounced back to cell {}", mv.pre_hazard_position));
    }
    match mv.hazard() {
        Some(HazardKind::Shortcut) => notes.push("climbed a ladder".to_string()),
        Some(HazardKind::Setback) => notes.push("slid down a snake".to_string()),
        None => {}
    }

    let mut text = format!(
        "Player {} rolled {roll} and moved from cell {from} to cell {}",
        player + 1,
        mv.final_position
    );
    if !notes.is_empty() {
        let _ = write!(text, " ({})", notes.join(", "));
    }
    text.push('.');
    text
}
