//! Static card catalog.
//!
//! Four statement decks, one per group color. The text and presentation
//! colors never change during a session; only the "used" flag tracked by
//! [`crate::deck::DeckAllocator`] does.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cards in every deck
pub const CARDS_PER_DECK: usize = 12;

/// Card identifier, unique within a deck (1..=12). Ids repeat across decks.
pub type CardId = u8;

/// Group / deck color - the fixed four-color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckColor {
    Red,
    Green,
    Purple,
    Blue,
}

impl DeckColor {
    /// Palette order used when offering colors to new groups
    pub const ALL: [DeckColor; 4] = [
        DeckColor::Red,
        DeckColor::Green,
        DeckColor::Purple,
        DeckColor::Blue,
    ];

    /// Lowercase key, as used by the UI
    pub fn key(&self) -> &'static str {
        match self {
            DeckColor::Red => "red",
            DeckColor::Green => "green",
            DeckColor::Purple => "purple",
            DeckColor::Blue => "blue",
        }
    }

    /// Text color of cards from this deck
    pub fn text_color(&self) -> &'static str {
        match self {
            DeckColor::Red => "#DC2626",
            DeckColor::Blue => "#2563EB",
            DeckColor::Green => "#059669",
            DeckColor::Purple => "#7C3AED",
        }
    }

    /// Background color of cards from this deck
    pub fn bg_color(&self) -> &'static str {
        match self {
            DeckColor::Red => "#FEE2E2",
            DeckColor::Blue => "#DBEAFE",
            DeckColor::Green => "#D1FAE5",
            DeckColor::Purple => "#EDE9FE",
        }
    }
}

impl fmt::Display for DeckColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string is not one of the palette keys
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color '{0}'")]
pub struct UnknownColor(pub String);

impl FromStr for DeckColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(DeckColor::Red),
            "green" => Ok(DeckColor::Green),
            "purple" => Ok(DeckColor::Purple),
            "blue" => Ok(DeckColor::Blue),
            other => Err(UnknownColor(other.to_string())),
        }
    }
}

static RED: [&str; CARDS_PER_DECK] = [
    "JUGAR IMPLICA COMPETIR CON OTRAS Y OTROS.",
    "JUGAR PERMITE EXPRESAR FANTASIAS.",
    "JUGAR ES OBLIGATORIO.",
    "JUGAR SIEMPRE IMPLICA APOSTAR.",
    "EL JUEGO PRODUCE TENSION.",
    "JUGAR ES UN DERECHO.",
    "JUGAR ES TRABAJAR.",
    "EL RESULTADO DE UN JUEGO DEPENDE DE LOS ALGORITMOS.",
    "SI SE JUEGA BIEN AL FÚTBOL SE TIENE ÉXITO EN EL JUEGO ONLINE.",
    "JUGAR PUEDE TRANSFORMAR LA REALIDAD.",
    "JUGAR REQUIERE DISCIPLINA.",
    "AL JUGAR SE CONOCEN NUEVAS AMIGAS Y NUEVOS AMIGOS.",
];

static BLUE: [&str; CARDS_PER_DECK] = [
    "GANAR ES FACIL.",
    "JUGAR TE PERMITE VIVENCIAR OTRA REALIDAD.",
    "JUGAR DISTRAE.",
    "APOSTAR NO ES JUGAR.",
    "JUGAR ES DIVERTIDO.",
    "JUGAR ES SOLO PARA NIÑAS Y NIÑOS.",
    "JUGAR DESPIERTA LA CREATIVIDAD.",
    "JUGAR SIEMPRE ES LEGAL.",
    "LOS JUEGOS EXPONEN A RIESGOS.",
    "EN EL JUEGO SE PUEDE SER DE OTRO MODO.",
    "EL RESULTADO DEL JUEGO DEPENDE DEL AZAR.",
    "JUGAR DESPIERTA PASIONES.",
];

static GREEN: [&str; CARDS_PER_DECK] = [
    "EL JUEGO SIEMPRE TIENE REGLAS.",
    "LA PUBLICIDAD INFLUYE EN LA ELECCIÓN DE LOS JUEGOS.",
    "JUGAR DA PLACER.",
    "SE JUEGA PARA GANAR.",
    "JUGAR PROVOCA EXCITACIÓN.",
    "JUGAR ES UNA PÉRDIDA DE TIEMPO.",
    "EN EL JUEGO SE APRENDEN DISTINTAS REGLAS SOCIALES.",
    "EN EL JUEGO TODO ES GANANCIA.",
    "LOS VARONES CONSUMEN MÁS JUEGOS DE APUESTA.",
    "EL JUEGO ES UN OBJETO DE CONSUMO.",
    "EL RESULTADO DEL JUEGO DEPENDE DE LAS HABILIDADES DE LAS/OS JUGADORAS/ES.",
    "CUANDO LA PERSONA QUIERE PARAR EL JUEGO PUEDE HACERLO.",
];

static PURPLE: [&str; CARDS_PER_DECK] = [
    "AL JUGAR TODAS/OS ACEPTAN LAS REGLAS.",
    "LAS REDES SOCIALES INDUCEN DIFERENTES PRÁCTICAS DE JUEGO.",
    "LOS JUEGOS GENERAN COMPULSIÓN.",
    "PERDER INVALIDA EL JUGAR.",
    "JUGAR RELAJA.",
    "SE APRENDE JUGANDO.",
    "ALGUNOS JUEGOS ONLINE TIENEN COSTO ECONÓMICO.",
    "LAS DEUDAS DE JUEGO SE PAGAN.",
    "JUGAR ABURRE.",
    "JUGAR ENTRETIENE.",
    "JUGAR PUEDE ALTERAR LA ORGANIZACIÓN DEL TIEMPO.",
    "LAS MUJERES TIENEN MENOS INTERÉS POR LOS JUEGOS ONLINE.",
];

/// A statement card from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCard {
    pub id: CardId,
    pub text: &'static str,
}

/// The twelve cards of a deck, in id order
pub fn catalog(color: DeckColor) -> impl Iterator<Item = CatalogCard> {
    let texts = match color {
        DeckColor::Red => &RED,
        DeckColor::Blue => &BLUE,
        DeckColor::Green => &GREEN,
        DeckColor::Purple => &PURPLE,
    };
    texts.iter().copied().enumerate().map(|(i, text)| CatalogCard {
        id: i as CardId + 1,
        text,
    })
}
