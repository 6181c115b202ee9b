//! Catalog Sync - MTG Card Database Reconciliation
//!
//! Loads one bulk snapshot of Scryfall card data, normalizes it into
//! canonical sets and printings, and reconciles the result into a SQLite
//! database with the minimal inserts and updates.

pub mod catalog;
pub mod database;
pub mod error;
pub mod scryfall;
pub mod sync;

pub use error::{Result, SyncError};
pub use scryfall::Snapshot;
pub use sync::reconcile_all;
