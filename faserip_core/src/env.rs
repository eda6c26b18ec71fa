//! Environment oracles - Percentile rolls and timestamps
//!
//! Resolution draws exactly one percentile roll and stamps karma log entries
//! with the current time. Both come from injected sources so results can be
//! reproduced in tests and replays.

use rand::Rng;
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of d100 rolls
pub trait PercentileRoller {
    /// Roll 1..=100 inclusive
    fn roll_percentile(&mut self) -> u32;
}

/// Percentile roller backed by any `rand` RNG
#[derive(Debug, Clone)]
pub struct RngRoller<R: Rng> {
    rng: R,
}

impl<R: Rng> RngRoller<R> {
    pub fn new(rng: R) -> Self {
        RngRoller { rng }
    }
}

impl RngRoller<rand::rngs::ThreadRng> {
    /// Roller using the thread-local RNG
    pub fn thread() -> Self {
        RngRoller::new(rand::thread_rng())
    }
}

impl<R: Rng> PercentileRoller for RngRoller<R> {
    fn roll_percentile(&mut self) -> u32 {
        self.rng.gen_range(1..=100)
    }
}

/// Pre-determined rolls, consumed in order
///
/// Once exhausted every further roll is 1.
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    rolls: VecDeque<u32>,
}

impl FixedRolls {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        FixedRolls {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl PercentileRoller for FixedRolls {
    fn roll_percentile(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(1).clamp(1, 100)
    }
}

/// Source of timestamps for karma log entries
pub trait Clock {
    /// Seconds since the Unix epoch
    fn now(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}
