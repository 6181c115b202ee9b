//! Raw Scryfall card records and their normalization into canonical entities.
//!
//! Each raw record describes exactly one printing within one set, so
//! [`ScryfallCard::unpack`] always yields one [`Set`] and one
//! [`CardPrinting`]. Multi-face records (split/transform/modal) carry the
//! per-face data in `card_faces`; the face shape is resolved once into
//! [`Layout`] before any field derivation.

use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::{non_empty, CardPrinting, Set};

/// Default catalog language; localized names are suppressed for it
pub const ENGLISH: &str = "en";
/// The one non-default language kept by the sync
pub const SPANISH: &str = "es";
/// Distribution channel marker for physically printed cards
pub const GAME_PAPER: &str = "paper";

/// One printed side of a multi-sided card
#[derive(Debug, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub printed_name: String,
}

/// Raw card record from the Scryfall bulk "all cards" dump
#[derive(Debug, Deserialize)]
pub struct ScryfallCard {
    pub id: Uuid,
    #[serde(default)]
    pub oracle_id: Uuid,
    pub lang: String,
    pub name: String,
    #[serde(default)]
    pub printed_name: String,
    #[serde(default)]
    pub collector_number: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
    #[serde(default)]
    pub games: Vec<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub type_line: String,
    pub set_id: Uuid,
    #[serde(rename = "set")]
    pub set_code: String,
    #[serde(default)]
    pub set_name: String,
    pub uri: String,
    pub scryfall_uri: String,
}

/// Face shape of a raw record, resolved once before field derivation
enum Layout<'a> {
    Single,
    Double(&'a CardFace, &'a CardFace),
}

impl ScryfallCard {
    /// Whether this record belongs in the sync: physically printed (paper)
    /// and in one of the two accepted languages.
    pub fn is_syncable(&self) -> bool {
        self.games.iter().any(|g| g == GAME_PAPER)
            && (self.lang == ENGLISH || self.lang == SPANISH)
    }

    /// Split the record into its canonical set and printing.
    pub fn unpack(&self) -> (Set, CardPrinting) {
        let set = Set {
            scryfall_id: self.set_id,
            code: self.set_code.clone(),
            name: self.set_name.clone(),
        };
        let printing = CardPrinting {
            scryfall_id: self.id,
            oracle_id: self.oracle_id,
            set_scryfall_id: self.set_id,
            name: self.name.clone(),
            localized_name: self.localized_name(),
            collector_number: self.collector_number.clone(),
            type_line: self.type_line.clone(),
            rarity: non_empty(self.rarity.clone()),
            colors: self.color_string(),
            color_identity: self.color_identity_string(),
            language: self.lang.clone(),
            api_uri: self.uri.clone(),
            web_uri: self.scryfall_uri.clone(),
        };
        (set, printing)
    }

    fn layout(&self) -> Layout<'_> {
        match self.card_faces.as_slice() {
            [front, back] => Layout::Double(front, back),
            _ => Layout::Single,
        }
    }

    /// Colors of the printing, canonicalized.
    ///
    /// The top-level list wins when present; double-faced records without
    /// one combine both faces. Two empty faces yield `None`, never an error.
    fn color_string(&self) -> Option<String> {
        if !self.colors.is_empty() {
            return canonical_colors(self.colors.iter().map(String::as_str).collect());
        }
        match self.layout() {
            Layout::Double(front, back) => canonical_colors(
                front
                    .colors
                    .iter()
                    .chain(back.colors.iter())
                    .map(String::as_str)
                    .collect(),
            ),
            Layout::Single => None,
        }
    }

    /// Color identity is always populated at the top level; no face fallback.
    fn color_identity_string(&self) -> Option<String> {
        canonical_colors(self.color_identity.iter().map(String::as_str).collect())
    }

    /// Localized display name, `None` in the default language.
    ///
    /// A combined title is produced for double-faced records only when both
    /// faces carry a non-empty localized name.
    fn localized_name(&self) -> Option<String> {
        if self.lang == ENGLISH {
            return None;
        }
        if !self.printed_name.is_empty() {
            return Some(self.printed_name.clone());
        }
        match self.layout() {
            Layout::Double(front, back)
                if !front.printed_name.is_empty() && !back.printed_name.is_empty() =>
            {
                Some(format!("{} // {}", front.printed_name, back.printed_name))
            }
            _ => None,
        }
    }
}

/// Sort and dedup single-letter color codes, then concatenate.
fn canonical_colors(mut symbols: Vec<&str>) -> Option<String> {
    if symbols.is_empty() {
        return None;
    }
    symbols.sort_unstable();
    symbols.dedup();
    Some(symbols.concat())
}

#[cfg(test)]
#[path = "card_tests.rs"]
mod tests;
