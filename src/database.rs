//! SQLite persistence for the card catalog.
//!
//! Uses parameterized queries exclusively (no SQL string concatenation).
//! Batch inserts run inside a single transaction, and update batches are
//! all-or-nothing: any failure rolls the whole transaction back.
//!
//! Rows own the surrogate `id` and the `created_at`/`updated_at` stamps;
//! callers address everything by the vendor-issued `scryfall_id`. UUIDs are
//! stored as hyphenated lowercase TEXT, timestamps as RFC 3339 TEXT.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Transaction};
use uuid::Uuid;

/// Result type for database operations
pub type DbResult<T> = rusqlite::Result<T>;

/// Initialize the database schema
///
/// Creates tables if they don't exist:
/// - `sets`: catalog releases, unique per vendor set identifier
/// - `cards`: one row per printing, referencing its set
///
/// Also turns on foreign key enforcement so a card can never be written
/// before its set exists.
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS sets (
            id INTEGER PRIMARY KEY,
            scryfall_id TEXT NOT NULL UNIQUE,
            code TEXT NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY,
            scryfall_id TEXT NOT NULL UNIQUE,
            oracle_id TEXT NOT NULL,
            set_scryfall_id TEXT NOT NULL REFERENCES sets(scryfall_id),
            name TEXT NOT NULL,
            localized_name TEXT,
            collector_number TEXT NOT NULL,
            type_line TEXT NOT NULL,
            rarity TEXT,
            colors TEXT,
            color_identity TEXT,
            language TEXT NOT NULL,
            api_uri TEXT NOT NULL,
            web_uri TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_cards_set ON cards(set_scryfall_id);
        CREATE INDEX IF NOT EXISTS idx_cards_oracle ON cards(oracle_id);
        ",
    )?;

    log::info!("Database schema initialized");
    Ok(())
}

/// Persisted set row, owned by this layer
#[derive(Debug, Clone)]
pub struct SetRow {
    pub id: i64,
    pub scryfall_id: String,
    pub code: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Persisted card row, owned by this layer
#[derive(Debug, Clone)]
pub struct CardRow {
    pub id: i64,
    pub scryfall_id: String,
    pub oracle_id: String,
    pub set_scryfall_id: String,
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
    pub created_at: String,
    pub updated_at: String,
}

/// Insert request for a new set; both timestamps stamped with the run's now
#[derive(Debug, Clone, PartialEq)]
pub struct SetInsert {
    pub scryfall_id: Uuid,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update request for an existing set, keyed by the vendor identifier;
/// `created_at` is left untouched
#[derive(Debug, Clone, PartialEq)]
pub struct SetUpdate {
    pub scryfall_id: Uuid,
    pub code: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

/// Insert request for a new card printing
#[derive(Debug, Clone, PartialEq)]
pub struct CardInsert {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update request for an existing card printing, keyed by the vendor
/// identifier; `created_at` is left untouched
#[derive(Debug, Clone, PartialEq)]
pub struct CardUpdate {
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
    pub updated_at: DateTime<Utc>,
}

/// Fetch all persisted sets
pub fn all_sets(conn: &Connection) -> DbResult<Vec<SetRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, scryfall_id, code, name, created_at, updated_at FROM sets",
    )?;

    let rows: DbResult<Vec<SetRow>> = stmt
        .query_map([], |row| {
            Ok(SetRow {
                id: row.get(0)?,
                scryfall_id: row.get(1)?,
                code: row.get(2)?,
                name: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?
        .collect();
    rows
}

/// Fetch all persisted cards
pub fn all_cards(conn: &Connection) -> DbResult<Vec<CardRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, scryfall_id, oracle_id, set_scryfall_id, name, localized_name,
                collector_number, type_line, rarity, colors, color_identity,
                language, api_uri, web_uri, created_at, updated_at
         FROM cards",
    )?;

    let rows: DbResult<Vec<CardRow>> = stmt
        .query_map([], |row| {
            Ok(CardRow {
                id: row.get(0)?,
                scryfall_id: row.get(1)?,
                oracle_id: row.get(2)?,
                set_scryfall_id: row.get(3)?,
                name: row.get(4)?,
                localized_name: row.get(5)?,
                collector_number: row.get(6)?,
                type_line: row.get(7)?,
                rarity: row.get(8)?,
                colors: row.get(9)?,
                color_identity: row.get(10)?,
                language: row.get(11)?,
                api_uri: row.get(12)?,
                web_uri: row.get(13)?,
                created_at: row.get(14)?,
                updated_at: row.get(15)?,
            })
        })?
        .collect();
    rows
}

/// Insert a batch of new sets as one atomic operation
///
/// Returns the number of rows inserted. An empty batch is a no-op.
pub fn insert_sets(conn: &mut Connection, sets: &[SetInsert]) -> DbResult<usize> {
    if sets.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    insert_sets_tx(&tx, sets)?;
    tx.commit()?;
    Ok(sets.len())
}

fn insert_sets_tx(tx: &Transaction<'_>, sets: &[SetInsert]) -> DbResult<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO sets (scryfall_id, code, name, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    for set in sets {
        stmt.execute(params![
            set.scryfall_id.to_string(),
            &set.code,
            &set.name,
            set.created_at.to_rfc3339(),
            set.updated_at.to_rfc3339(),
        ])?;
    }
    Ok(())
}

/// Insert a batch of new cards as one atomic operation
///
/// Returns the number of rows inserted. An empty batch is a no-op.
pub fn insert_cards(conn: &mut Connection, cards: &[CardInsert]) -> DbResult<usize> {
    if cards.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    insert_cards_tx(&tx, cards)?;
    tx.commit()?;
    Ok(cards.len())
}

fn insert_cards_tx(tx: &Transaction<'_>, cards: &[CardInsert]) -> DbResult<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO cards
         (scryfall_id, oracle_id, set_scryfall_id, name, localized_name,
          collector_number, type_line, rarity, colors, color_identity,
          language, api_uri, web_uri, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
    )?;

    for card in cards {
        stmt.execute(params![
            card.scryfall_id.to_string(),
            card.oracle_id.to_string(),
            card.set_scryfall_id.to_string(),
            &card.name,
            &card.localized_name,
            &card.collector_number,
            &card.type_line,
            &card.rarity,
            &card.colors,
            &card.color_identity,
            &card.language,
            &card.api_uri,
            &card.web_uri,
            card.created_at.to_rfc3339(),
            card.updated_at.to_rfc3339(),
        ])?;
    }
    Ok(())
}

/// Apply a batch of set updates in one transaction
///
/// Any single failure aborts and rolls back the whole batch. Returns the
/// number of rows updated. An empty batch is a no-op.
pub fn update_sets(conn: &mut Connection, updates: &[SetUpdate]) -> DbResult<usize> {
    if updates.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for update in updates {
        update_set(&tx, update)?;
    }
    tx.commit()?;
    Ok(updates.len())
}

/// Apply one set update inside an open transaction
pub fn update_set(tx: &Transaction<'_>, update: &SetUpdate) -> DbResult<()> {
    let mut stmt = tx.prepare_cached(
        "UPDATE sets SET code = ?2, name = ?3, updated_at = ?4 WHERE scryfall_id = ?1",
    )?;
    stmt.execute(params![
        update.scryfall_id.to_string(),
        &update.code,
        &update.name,
        update.updated_at.to_rfc3339(),
    ])?;
    Ok(())
}

/// Apply a batch of card updates in one transaction
///
/// Any single failure aborts and rolls back the whole batch. Returns the
/// number of rows updated. An empty batch is a no-op.
pub fn update_cards(conn: &mut Connection, updates: &[CardUpdate]) -> DbResult<usize> {
    if updates.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for update in updates {
        update_card(&tx, update)?;
    }
    tx.commit()?;
    Ok(updates.len())
}

/// Apply one card update inside an open transaction
pub fn update_card(tx: &Transaction<'_>, update: &CardUpdate) -> DbResult<()> {
    let mut stmt = tx.prepare_cached(
        "UPDATE cards
         SET oracle_id = ?2, set_scryfall_id = ?3, name = ?4, localized_name = ?5,
             collector_number = ?6, type_line = ?7, rarity = ?8, colors = ?9,
             color_identity = ?10, language = ?11, api_uri = ?12, web_uri = ?13,
             updated_at = ?14
         WHERE scryfall_id = ?1",
    )?;
    stmt.execute(params![
        update.scryfall_id.to_string(),
        update.oracle_id.to_string(),
        update.set_scryfall_id.to_string(),
        &update.name,
        &update.localized_name,
        &update.collector_number,
        &update.type_line,
        &update.rarity,
        &update.colors,
        &update.color_identity,
        &update.language,
        &update.api_uri,
        &update.web_uri,
        update.updated_at.to_rfc3339(),
    ])?;
    Ok(())
}

/// Get total count of persisted sets
pub fn set_count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM sets", [], |row| row.get(0))
}

/// Get total count of persisted cards
pub fn card_count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))
}
