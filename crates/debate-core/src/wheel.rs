//! The spinning wheel: randomness source and outcome mapping.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Faces used for the pre-game order rolls
pub const PRE_GAME_FACES: u8 = 12;

/// Faces once the game has started
pub const WHEEL_FACES: u8 = 16;

/// Source of wheel rolls and uniform picks
pub trait RollSource {
    /// Uniform value in `1..=faces`
    fn roll(&mut self, faces: u8) -> u8;

    /// Uniform index in `0..len` (0 when `len` is 0)
    fn pick(&mut self, len: usize) -> usize;
}

impl RollSource for StdRng {
    fn roll(&mut self, faces: u8) -> u8 {
        self.gen_range(1..=faces.max(1))
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

/// A loaded wheel for replays and tests.
///
/// Queued rolls and picks are returned first, in order; once a queue runs dry
/// the values come from a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: VecDeque<u8>,
    picks: VecDeque<usize>,
    fallback: StdRng,
}

impl ScriptedRolls {
    pub fn new(seed: u64) -> Self {
        Self {
            rolls: VecDeque::new(),
            picks: VecDeque::new(),
            fallback: StdRng::seed_from_u64(seed),
        }
    }

    /// Queue rolls to be returned before falling back to the seeded rng
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u8>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn push_roll(&mut self, roll: u8) {
        self.rolls.push_back(roll);
    }

    pub fn push_pick(&mut self, index: usize) {
        self.picks.push_back(index);
    }

    pub fn queued_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl Default for ScriptedRolls {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self, faces: u8) -> u8 {
        match self.rolls.pop_front() {
            Some(roll) => roll.clamp(1, faces.max(1)),
            None => self.fallback.roll(faces),
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match self.picks.pop_front() {
            Some(index) => index % len,
            None => self.fallback.pick(len),
        }
    }
}

/// What a committed roll does once the game has started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelOutcome {
    /// 1-12: answer a card from the group's own deck
    Card(u8),
    /// 13: flip the turn direction and pass the turn
    Reverse,
    /// 14: answer a card from the previous group's deck
    Borrow,
    /// 15: bank an extra turn and spin again
    ExtraTurn,
    /// 16: lose the turn
    Skip,
}

impl WheelOutcome {
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            1..=12 => WheelOutcome::Card(roll),
            13 => WheelOutcome::Reverse,
            14 => WheelOutcome::Borrow,
            15 => WheelOutcome::ExtraTurn,
            _ => WheelOutcome::Skip,
        }
    }
}
