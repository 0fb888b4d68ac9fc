//! Requests the UI can make and the events they produce.
//!
//! Events are also the presentation hooks: the UI plays the spin sound on
//! [`GameEvent::SpinStarted`], the buzzer on [`GameEvent::CardTimeUp`] and
//! the confetti on [`GameEvent::Celebration`]. The engine never waits on them.

use crate::cards::{CardId, DeckColor};
use crate::deck::DealtCard;
use crate::game::EndReason;
use crate::wheel::WheelOutcome;
use serde::{Deserialize, Serialize};

/// Everything the UI or a timer can ask of the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Setup ====================
    /// Register a new group with an unused color
    CreateGroup { name: String, color: DeckColor },

    // ==================== Initial Roll ====================
    /// Roll the pre-game wheel for a specific group
    RollForOrder { group: usize },
    /// Confirm the starting group and begin play
    StartGame,

    // ==================== Playing ====================
    /// Spin the wheel (pre-game: rolls for the next group without a roll)
    Spin,
    /// Answer the current card
    Respond { agree: bool },
    /// Dismiss the current card without answering
    CloseCard,

    // ==================== Timers ====================
    /// The card countdown ran out
    CardTimeUp,
    /// The game countdown ran out
    GameTimeUp,
    /// One second has passed
    Tick,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A group joined the game
    GroupCreated {
        group: usize,
        name: String,
        color: DeckColor,
    },

    /// All four groups are in; order rolls may begin
    RollPhaseStarted,

    /// The wheel started turning
    SpinStarted { group: usize },

    /// A pre-game roll was recorded
    InitialRollRecorded { group: usize, roll: u8 },

    /// Play began with the lowest roller
    GameStarted { starting_group: usize, roll: u8 },

    /// A spin committed during play
    WheelStopped {
        group: usize,
        roll: u8,
        outcome: WheelOutcome,
    },

    /// A card is now on the table
    CardDealt {
        group: usize,
        card: DealtCard,
        /// Lending group, for borrowed cards
        borrowed_from: Option<usize>,
    },

    /// Nothing left to deal from the requested deck
    DeckExhausted { group: usize, deck: DeckColor },

    /// Turn direction flipped
    DirectionChanged { clockwise: bool },

    /// An extra turn was banked
    ExtraTurnGranted { group: usize, banked: u8 },

    /// A banked extra turn kept the turn with the same group
    ExtraTurnUsed { group: usize, remaining: u8 },

    /// A card was answered
    CardAnswered {
        group: usize,
        card_id: CardId,
        agree: bool,
    },

    /// The card was dismissed without an answer
    CardClosed { group: usize },

    /// The card countdown ran out
    CardTimeUp { group: usize },

    /// Turn moved to another group
    TurnPassed { from: usize, to: usize },

    /// One-time effect when a group completes its cards
    Celebration,

    /// The game is over
    GameOver { reason: EndReason },
}
