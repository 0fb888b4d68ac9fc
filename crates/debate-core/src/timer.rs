//! One-second countdowns.
//!
//! The engine never reads a clock. The host calls [`crate::GameState::tick`]
//! once per second and every armed countdown moves one step; a countdown
//! reports its expiry exactly once.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// A disarmed countdown of `duration` seconds
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    /// Restore the full duration and arm
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.running = true;
    }

    /// Disarm without touching the remaining time
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Disarm and restore the full duration
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.duration;
    }

    /// Advance one second. Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
