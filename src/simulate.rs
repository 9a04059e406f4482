//! Headless matches for statistics.
//!
//! Every slot is driven by a seeded die, so `(seed, config) -> MatchResult`
//! is a pure function. Batches fan out over rayon with one accumulator per
//! worker, merged at the end.

use crate::board::HazardKind;
use crate::config::MatchConfig;
use crate::game::{RandomDice, RoundOutcome, assert_invariants};
use crate::movement::bounced;
use crate::session::{Match, SessionError};
use rayon::prelude::*;
use serde::Serialize;

/// Turn cap used when the caller has no better idea.
pub const DEFAULT_MAX_TURNS: u32 = 10_000;

/// Mixed into the match seed so dice and board draw from different streams.
const DICE_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for the dice of the match played with `seed`.
#[must_use]
pub const fn dice_seed(seed: u64) -> u64 {
    seed ^ DICE_SALT
}

/// Summary of one simulated match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Seed the match was played with.
    pub seed: u64,
    /// Winning slot, `None` if the turn cap was hit first.
    pub winner: Option<usize>,
    /// Round counter when play stopped.
    pub rounds: u32,
    /// Rounds resolved (one die roll each).
    pub turns: u32,
    /// Three-sixes penalties applied.
    pub penalties: u32,
    /// Ladders climbed.
    pub shortcuts_taken: u32,
    /// Snakes slid down.
    pub setbacks_taken: u32,
    /// Overshoots reflected off the final cell.
    pub bounces: u32,
}

impl MatchResult {
    const fn new(seed: u64) -> Self {
        Self {
            seed,
            winner: None,
            rounds: 0,
            turns: 0,
            penalties: 0,
            shortcuts_taken: 0,
            setbacks_taken: 0,
            bounces: 0,
        }
    }

    fn record(&mut self, outcome: &RoundOutcome, bounced: bool) {
        self.turns += 1;
        if bounced {
            self.bounces += 1;
        }
        match *outcome {
            RoundOutcome::Penalized { .. } => self.penalties += 1,
            RoundOutcome::Moved { mv, .. } | RoundOutcome::Won { mv, .. } => match mv.hazard() {
                Some(HazardKind::Shortcut) => self.shortcuts_taken += 1,
                Some(HazardKind::Setback) => self.setbacks_taken += 1,
                None => {}
            },
        }
    }
}

/// Play one match to the end, or until `max_turns` rounds were resolved.
///
/// A generated board uses the config's seed when set and `seed` otherwise;
/// the dice always derive from `seed`.
///
/// # Errors
///
/// Returns an error if the configuration cannot start a match.
pub fn run_match(
    seed: u64,
    config: &MatchConfig,
    max_turns: u32,
) -> Result<MatchResult, SessionError> {
    let config = MatchConfig {
        seed: Some(config.seed.unwrap_or(seed)),
        ..*config
    };
    let mut game = Match::build(config)?;
    let mut dice = RandomDice::seeded(dice_seed(seed));
    let mut result = MatchResult::new(seed);

    while !game.state().is_finished() && result.turns < max_turns {
        let outcome = game.play_round(&mut dice)?;
        let bounce = !matches!(outcome, RoundOutcome::Penalized { .. })
            && game
                .state()
                .last_move()
                .is_some_and(|last| bounced(last.from, last.dice, game.board()));
        result.record(&outcome, bounce);
        assert_invariants(game.state(), game.board());
    }

    result.winner = game.winner();
    result.rounds = game.state().round_number();
    Ok(result)
}

/// Aggregate statistics over many matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    /// Matches played.
    pub games_played: u64,
    /// Wins per slot.
    pub wins: Vec<u64>,
    /// Matches that hit the turn cap.
    pub unfinished: u64,
    /// Sum of final round counters.
    pub total_rounds: u64,
    /// Sum of rounds resolved.
    pub total_turns: u64,
    /// Sum of penalties.
    pub penalties: u64,
    /// Sum of ladders climbed.
    pub shortcuts_taken: u64,
    /// Sum of snakes slid down.
    pub setbacks_taken: u64,
    /// Sum of bounces.
    pub bounces: u64,
}

#[allow(clippy::cast_precision_loss)]
impl BatchStats {
    /// Empty stats for `players` slots.
    #[must_use]
    pub fn new(players: usize) -> Self {
        Self {
            games_played: 0,
            wins: vec![0; players],
            unfinished: 0,
            total_rounds: 0,
            total_turns: 0,
            penalties: 0,
            shortcuts_taken: 0,
            setbacks_taken: 0,
            bounces: 0,
        }
    }

    /// Fold one match into the totals.
    pub fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        self.total_rounds += u64::from(result.rounds);
        self.total_turns += u64::from(result.turns);
        self.penalties += u64::from(result.penalties);
        self.shortcuts_taken += u64::from(result.shortcuts_taken);
        self.setbacks_taken += u64::from(result.setbacks_taken);
        self.bounces += u64::from(result.bounces);

        match result.winner.and_then(|slot| self.wins.get_mut(slot)) {
            Some(wins) => *wins += 1,
            None => self.unfinished += 1,
        }
    }

    /// Combine two partial accumulators.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        if self.wins.len() < other.wins.len() {
            self.wins.resize(other.wins.len(), 0);
        }
        for (mine, theirs) in self.wins.iter_mut().zip(&other.wins) {
            *mine += theirs;
        }
        self.unfinished += other.unfinished;
        self.total_rounds += other.total_rounds;
        self.total_turns += other.total_turns;
        self.penalties += other.penalties;
        self.shortcuts_taken += other.shortcuts_taken;
        self.setbacks_taken += other.setbacks_taken;
        self.bounces += other.bounces;
    }

    /// Share of matches won by `slot` (0.0-1.0).
    #[must_use]
    pub fn win_rate(&self, slot: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(slot).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Mean final round counter.
    #[must_use]
    pub fn avg_rounds(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.games_played as f64
    }

    /// Mean rolls per match.
    #[must_use]
    pub fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }
}

/// Play `games` matches in parallel with seeds `base_seed`, `base_seed + 1`, ...
///
/// # Errors
///
/// Returns an error if the configuration cannot start a match.
pub fn run_batch(
    base_seed: u64,
    games: u64,
    config: &MatchConfig,
    max_turns: u32,
) -> Result<BatchStats, SessionError> {
    config.validate()?;
    let players = config.player_count();

    let stats = (0..games)
        .into_par_iter()
        .fold(
            || BatchStats::new(players),
            |mut local, i| {
                let seed = base_seed.wrapping_add(i);
                match run_match(seed, config, max_turns) {
                    Ok(result) => local.add_result(&result),
                    Err(e) => log::warn!("Match with seed {seed} failed: {e}"),
                }
                local
            },
        )
        .reduce(
            || BatchStats::new(players),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    log::info!(
        "Simulated {} matches, {} unfinished",
        stats.games_played,
        stats.unfinished
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layout;
    use crate::config::Mode;

    #[test]
    fn test_run_match_deterministic() {
        let config = MatchConfig::default();
        let a = run_match(42, &config, DEFAULT_MAX_TURNS).unwrap();
        let b = run_match(42, &config, DEFAULT_MAX_TURNS).unwrap();
        assert_eq!(a, b);
        assert!(a.winner.is_some());
        assert!(a.turns >= a.rounds);
    }

    #[test]
    fn test_run_match_generated_board() {
        let config = MatchConfig {
            layout: Layout::Generated,
            rows: 6,
            cols: 6,
            mode: Mode::Multiplayer { players: 3 },
            ..MatchConfig::default()
        };
        let result = run_match(7, &config, DEFAULT_MAX_TURNS).unwrap();
        assert!(result.winner.is_some_and(|w| w < 3));
    }

    #[test]
    fn test_turn_cap() {
        let result = run_match(3, &MatchConfig::default(), 2).unwrap();
        assert_eq!(result.turns, 2);
        assert_eq!(result.winner, None);
    }

    #[test]
    fn test_add_and_merge() {
        let mut a = BatchStats::new(2);
        let mut b = BatchStats::new(2);
        let won = MatchResult {
            winner: Some(1),
            rounds: 10,
            turns: 22,
            ..MatchResult::new(0)
        };
        let stuck = MatchResult::new(1);

        a.add_result(&won);
        b.add_result(&won);
        b.add_result(&stuck);
        a.merge(&b);

        assert_eq!(a.games_played, 3);
        assert_eq!(a.wins, vec![0, 2]);
        assert_eq!(a.unfinished, 1);
        assert_eq!(a.total_turns, 44);
        assert!((a.win_rate(1) - 2.0 / 3.0).abs() < 1e-9);
        assert!((a.avg_rounds() - 20.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_batch_matches_sequential() {
        let config = MatchConfig::small();
        let stats = run_batch(100, 40, &config, DEFAULT_MAX_TURNS).unwrap();

        let mut expected = BatchStats::new(2);
        for i in 0..40 {
            expected.add_result(&run_match(100 + i, &config, DEFAULT_MAX_TURNS).unwrap());
        }

        assert_eq!(stats, expected);
        assert_eq!(stats.wins.iter().sum::<u64>() + stats.unfinished, 40);
    }

    #[test]
    fn test_run_batch_rejects_invalid_config() {
        let config = MatchConfig {
            rows: 7,
            cols: 7,
            ..MatchConfig::default()
        };
        assert!(run_batch(0, 10, &config, DEFAULT_MAX_TURNS).is_err());
    }
}
