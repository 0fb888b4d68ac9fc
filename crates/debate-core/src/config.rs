//! Timing configuration.

use serde::{Deserialize, Serialize};

/// Countdown lengths, in engine seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Time to debate and answer one card
    pub card_seconds: u32,
    /// Length of the whole game once it has started
    pub game_seconds: u32,
    /// Wheel animation; the roll commits when it elapses
    pub spin_seconds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            card_seconds: 60,
            game_seconds: 30 * 60,
            spin_seconds: 3,
        }
    }
}
