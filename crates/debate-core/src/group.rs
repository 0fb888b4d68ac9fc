//! Groups and their answered cards.

use crate::cards::{CardId, DeckColor};
use crate::deck::DealtCard;
use serde::{Deserialize, Serialize};

/// Session-unique group identifier, assigned in creation order
pub type GroupId = u32;

/// A recorded answer to a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub card_id: CardId,
    /// Deck the card was dealt from
    pub deck: DeckColor,
    pub agree: bool,
    /// Text color the card was shown with, frozen at presentation
    pub color: String,
    /// Background color the card was shown with, frozen at presentation
    pub bg_color: String,
    /// Index of the lending group when the card was borrowed
    pub borrowed_from: Option<usize>,
}

impl Response {
    pub fn new(card: &DealtCard, agree: bool, borrowed_from: Option<usize>) -> Self {
        Self {
            card_id: card.id,
            deck: card.deck,
            agree,
            color: card.color.clone(),
            bg_color: card.bg_color.clone(),
            borrowed_from,
        }
    }

    pub fn is_borrowed(&self) -> bool {
        self.borrowed_from.is_some()
    }
}

/// A debating group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub color: DeckColor,
    /// Answers in play order
    pub responses: Vec<Response>,
}

impl Group {
    pub fn new(id: GroupId, name: String, color: DeckColor) -> Self {
        Self {
            id,
            name,
            color,
            responses: Vec::new(),
        }
    }

    /// Number of cards this group has answered
    pub fn card_count(&self) -> usize {
        self.responses.len()
    }

    /// Whether any response carries this card id (regardless of deck)
    pub fn has_answered(&self, card_id: CardId) -> bool {
        self.responses.iter().any(|r| r.card_id == card_id)
    }

    pub fn answered_ids(&self) -> Vec<CardId> {
        self.responses.iter().map(|r| r.card_id).collect()
    }

    pub fn agreed_count(&self) -> usize {
        self.responses.iter().filter(|r| r.agree).count()
    }
}

/// A pre-game roll deciding who starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialRoll {
    pub group: usize,
    pub roll: u8,
}

/// The group with the strictly lowest roll.
///
/// Ties are not re-rolled: among equal minimum rolls the lowest group index
/// (the earliest created group) starts.
pub fn starting_group(rolls: &[InitialRoll]) -> Option<InitialRoll> {
    rolls
        .iter()
        .copied()
        .min_by_key(|r| (r.roll, r.group))
}
