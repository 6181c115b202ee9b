//! Canonical catalog entities built from the bulk feed.
//!
//! These are per-run value objects: rebuilt from scratch on every sync and
//! compared field-by-field against the persisted rows to decide what needs
//! writing. They never outlive a run.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::{CardInsert, CardRow, CardUpdate, SetInsert, SetRow, SetUpdate};

/// A release/edition of the catalog.
///
/// `scryfall_id` is the vendor-issued external identifier and the stable
/// join key; `code` and `name` may change between snapshots for the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub scryfall_id: Uuid,
    pub code: String,
    pub name: String,
}

impl Set {
    /// Field-level comparison against the persisted row.
    pub fn matches(&self, row: &SetRow) -> bool {
        self.scryfall_id.to_string() == row.scryfall_id
            && self.code == row.code
            && self.name == row.name
    }

    pub fn to_insert(&self, now: DateTime<Utc>) -> SetInsert {
        SetInsert {
            scryfall_id: self.scryfall_id,
            code: self.code.clone(),
            name: self.name.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_update(&self, now: DateTime<Utc>) -> SetUpdate {
        SetUpdate {
            scryfall_id: self.scryfall_id,
            code: self.code.clone(),
            name: self.name.clone(),
            updated_at: now,
        }
    }
}

/// One printed version of a card in one set, in one language.
///
/// Optional text fields hold `None` for "not set"; the raw feed's empty
/// strings are mapped to `None` during normalization so they line up with
/// SQL NULL in the persisted rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPrinting {
    pub scryfall_id: Uuid,
    pub oracle_id: Uuid,
    pub set_scryfall_id: Uuid,
    pub name: String,
    pub localized_name: Option<String>,
    pub collector_number: String,
    pub type_line: String,
    pub rarity: Option<String>,
    pub colors: Option<String>,
    pub color_identity: Option<String>,
    pub language: String,
    pub api_uri: String,
    pub web_uri: String,
}

impl CardPrinting {
    /// Field-level comparison against the persisted row.
    ///
    /// Every mapped field participates. Optional text fields go through
    /// [`text_matches`], so a missing source value compares equal to a
    /// stored NULL.
    pub fn matches(&self, row: &CardRow) -> bool {
        self.scryfall_id.to_string() == row.scryfall_id
            && self.oracle_id.to_string() == row.oracle_id
            && self.set_scryfall_id.to_string() == row.set_scryfall_id
            && self.name == row.name
            && self.collector_number == row.collector_number
            && self.type_line == row.type_line
            && self.language == row.language
            && self.api_uri == row.api_uri
            && self.web_uri == row.web_uri
            && text_matches(self.localized_name.as_deref(), row.localized_name.as_deref())
            && text_matches(self.rarity.as_deref(), row.rarity.as_deref())
            && text_matches(self.colors.as_deref(), row.colors.as_deref())
            && text_matches(self.color_identity.as_deref(), row.color_identity.as_deref())
    }

    pub fn to_insert(&self, now: DateTime<Utc>) -> CardInsert {
        CardInsert {
            scryfall_id: self.scryfall_id,
            oracle_id: self.oracle_id,
            set_scryfall_id: self.set_scryfall_id,
            name: self.name.clone(),
            localized_name: self.localized_name.clone(),
            collector_number: self.collector_number.clone(),
            type_line: self.type_line.clone(),
            rarity: self.rarity.clone(),
            colors: self.colors.clone(),
            color_identity: self.color_identity.clone(),
            language: self.language.clone(),
            api_uri: self.api_uri.clone(),
            web_uri: self.web_uri.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_update(&self, now: DateTime<Utc>) -> CardUpdate {
        CardUpdate {
            scryfall_id: self.scryfall_id,
            oracle_id: self.oracle_id,
            set_scryfall_id: self.set_scryfall_id,
            name: self.name.clone(),
            localized_name: self.localized_name.clone(),
            collector_number: self.collector_number.clone(),
            type_line: self.type_line.clone(),
            rarity: self.rarity.clone(),
            colors: self.colors.clone(),
            color_identity: self.color_identity.clone(),
            language: self.language.clone(),
            api_uri: self.api_uri.clone(),
            web_uri: self.web_uri.clone(),
            updated_at: now,
        }
    }
}

/// Map an empty string to `None`, keeping non-empty text as `Some`.
pub(crate) fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Optional-text equality with "empty means not set" on both sides.
///
/// A source value of `None` must compare equal to a stored NULL, and also to
/// a stored empty string; the two stored shapes are never distinguished.
fn text_matches(source: Option<&str>, stored: Option<&str>) -> bool {
    source.filter(|s| !s.is_empty()) == stored.filter(|s| !s.is_empty())
}
