//! Juego en Debate - turn engine for a spinning-wheel debate card game
//!
//! Up to four color-coded groups take turns spinning a wheel. Most results
//! deal a statement card the group must agree or disagree with before a
//! one-minute countdown runs out; the rest reverse the turn order, borrow a
//! card from the previous group, grant an extra turn or skip the turn. The
//! game ends when a group has answered twelve cards or after thirty minutes.
//!
//! # Architecture
//!
//! The engine is platform-agnostic and holds no clock. A host (the terminal
//! runner, or a browser through the `wasm` feature) feeds it user requests
//! and one tick per second, and renders the events and snapshots it returns.
//!
//! # Modules
//!
//! - [`cards`]: The static statement catalog and color palette
//! - [`deck`]: Per-color decks and the single draw primitive
//! - [`group`]: Groups, recorded responses and order rolls
//! - [`wheel`]: Randomness source and wheel outcomes
//! - [`timer`]: One-second countdowns
//! - [`game`]: The turn engine

pub mod actions;
pub mod cards;
pub mod config;
pub mod deck;
pub mod game;
pub mod group;
pub mod timer;
pub mod wheel;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use cards::{catalog, CardId, DeckColor, UnknownColor, CARDS_PER_DECK};
pub use config::GameConfig;
pub use deck::{DealtCard, Deck, DeckAllocator, DeckCard};
pub use game::{
    CurrentCard, EndReason, GameError, GamePhase, GameSnapshot, GameState, CARDS_TO_WIN,
    MIN_GROUPS,
};
pub use group::{starting_group, Group, GroupId, InitialRoll, Response};
pub use timer::Countdown;
pub use wheel::{RollSource, ScriptedRolls, WheelOutcome, PRE_GAME_FACES, WHEEL_FACES};
