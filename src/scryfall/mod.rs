//! Scryfall bulk feed: raw record types, normalization, and snapshot loading

pub mod card;
mod snapshot;

pub use card::{CardFace, ScryfallCard, ENGLISH, GAME_PAPER, SPANISH};
pub use snapshot::Snapshot;
