//! Deck allocation.
//!
//! One deck per color, shared by every group for the whole session. Both the
//! own-deck draw and the borrow draw go through [`DeckAllocator::draw`], which
//! is the only place a card is ever marked used.

use crate::cards::{catalog, CardId, DeckColor};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A card in a deck, with its session bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
    pub id: CardId,
    pub text: String,
    pub used: bool,
}

/// A single color's deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub color: DeckColor,
    cards: Vec<DeckCard>,
}

impl Deck {
    /// Full deck for a color, nothing used
    pub fn fresh(color: DeckColor) -> Self {
        Self {
            color,
            cards: catalog(color)
                .map(|c| DeckCard {
                    id: c.id,
                    text: c.text.to_string(),
                    used: false,
                })
                .collect(),
        }
    }

    pub fn cards(&self) -> &[DeckCard] {
        &self.cards
    }

    /// Number of cards already dealt
    pub fn used_count(&self) -> usize {
        self.cards.iter().filter(|c| c.used).count()
    }

    /// Number of cards still dealable
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.used_count()
    }

    pub fn is_used(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id && c.used)
    }

    /// Unused cards not in `excluded`, in deck order
    pub fn available<'a>(&'a self, excluded: &'a [CardId]) -> impl Iterator<Item = &'a DeckCard> {
        self.cards
            .iter()
            .filter(move |c| !c.used && !excluded.contains(&c.id))
    }
}

/// A card taken out of a deck, with the presentation colors it was shown with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealtCard {
    pub deck: DeckColor,
    pub id: CardId,
    pub text: String,
    pub color: String,
    pub bg_color: String,
}

/// Owner of all four decks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckAllocator {
    decks: [Deck; 4],
}

fn slot(color: DeckColor) -> usize {
    match color {
        DeckColor::Red => 0,
        DeckColor::Green => 1,
        DeckColor::Purple => 2,
        DeckColor::Blue => 3,
    }
}

impl DeckAllocator {
    /// Four fresh decks
    pub fn new() -> Self {
        Self {
            decks: DeckColor::ALL.map(Deck::fresh),
        }
    }

    pub fn deck(&self, color: DeckColor) -> &Deck {
        &self.decks[slot(color)]
    }

    pub fn decks(&self) -> impl Iterator<Item = &Deck> {
        self.decks.iter()
    }

    pub fn used_count(&self, color: DeckColor) -> usize {
        self.deck(color).used_count()
    }

    pub fn remaining(&self, color: DeckColor) -> usize {
        self.deck(color).remaining()
    }

    /// Deal one card from `color`'s deck.
    ///
    /// Used cards and any id in `excluded` are skipped. `select` receives the
    /// number of candidates and returns the index to deal (taken modulo the
    /// candidate count). The dealt card is marked used before returning.
    /// `None` means nothing is left to deal.
    pub fn draw<F>(&mut self, color: DeckColor, excluded: &[CardId], select: F) -> Option<DealtCard>
    where
        F: FnOnce(usize) -> usize,
    {
        let deck = &mut self.decks[slot(color)];
        let candidates: Vec<usize> = deck
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.used && !excluded.contains(&c.id))
            .map(|(i, _)| i)
            .collect();

        if candidates.is_empty() {
            debug!(%color, "deck exhausted");
            return None;
        }

        let pick = select(candidates.len()) % candidates.len();
        let card = &mut deck.cards[candidates[pick]];
        card.used = true;

        let dealt = DealtCard {
            deck: color,
            id: card.id,
            text: card.text.clone(),
            color: color.text_color().to_string(),
            bg_color: color.bg_color().to_string(),
        };
        debug!(%color, card = dealt.id, remaining = deck.remaining(), "card dealt");
        Some(dealt)
    }
}

impl Default for DeckAllocator {
    fn default() -> Self {
        Self::new()
    }
}
