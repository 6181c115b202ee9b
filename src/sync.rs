//! Reconciliation of a bulk snapshot against the persisted catalog.
//!
//! Classification is pure: source entities are partitioned into insert and
//! update requests by comparing them field-by-field against the persisted
//! rows, keyed by the vendor identifier. Write-back then runs in dependency
//! order: sets are fully reconciled (insert batch, then update transaction)
//! before any card is touched, since cards reference their set. Persisted
//! rows absent from the snapshot are left alone; nothing is ever deleted.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::catalog::{CardPrinting, Set};
use crate::database::{self, CardInsert, CardRow, CardUpdate, SetInsert, SetRow, SetUpdate};
use crate::error::Result;
use crate::scryfall::Snapshot;

/// Partition source sets into insert and update requests.
///
/// A source set with no persisted counterpart becomes an insert; one whose
/// counterpart differs in any field becomes an update; the rest produce
/// nothing. Emission order follows map iteration and carries no meaning.
pub fn classify_sets(
    source: &HashMap<Uuid, Set>,
    stored: &[SetRow],
    now: DateTime<Utc>,
) -> (Vec<SetInsert>, Vec<SetUpdate>) {
    let stored_by_id: HashMap<&str, &SetRow> = stored
        .iter()
        .map(|row| (row.scryfall_id.as_str(), row))
        .collect();

    let mut to_insert = Vec::new();
    let mut to_update = Vec::new();

    for set in source.values() {
        let id = set.scryfall_id.to_string();
        match stored_by_id.get(id.as_str()) {
            None => to_insert.push(set.to_insert(now)),
            Some(row) if !set.matches(row) => to_update.push(set.to_update(now)),
            Some(_) => {}
        }
    }

    (to_insert, to_update)
}

/// Partition source printings into insert and update requests.
pub fn classify_cards(
    source: &HashMap<Uuid, CardPrinting>,
    stored: &[CardRow],
    now: DateTime<Utc>,
) -> (Vec<CardInsert>, Vec<CardUpdate>) {
    let stored_by_id: HashMap<&str, &CardRow> = stored
        .iter()
        .map(|row| (row.scryfall_id.as_str(), row))
        .collect();

    let mut to_insert = Vec::new();
    let mut to_update = Vec::new();

    for printing in source.values() {
        let id = printing.scryfall_id.to_string();
        match stored_by_id.get(id.as_str()) {
            None => to_insert.push(printing.to_insert(now)),
            Some(row) if !printing.matches(row) => to_update.push(printing.to_update(now)),
            Some(_) => {}
        }
    }

    (to_insert, to_update)
}

/// Reconcile the full snapshot against the store.
///
/// The single entry point for a run. Sets first, cards second; if set
/// reconciliation fails, card reconciliation never begins. The first error
/// terminates the run with no retries and no partial recovery.
pub fn reconcile_all(conn: &mut Connection, snapshot: &Snapshot) -> Result<()> {
    let now = Utc::now();

    reconcile_sets(conn, &snapshot.sets, now)?;
    reconcile_cards(conn, &snapshot.printings, now)?;

    Ok(())
}

fn reconcile_sets(
    conn: &mut Connection,
    source: &HashMap<Uuid, Set>,
    now: DateTime<Utc>,
) -> Result<()> {
    let read_start = Instant::now();
    let stored = database::all_sets(conn)?;
    log::info!(
        "Read {} sets from db in {:.3}s",
        stored.len(),
        read_start.elapsed().as_secs_f64()
    );

    let (to_insert, to_update) = classify_sets(source, &stored, now);
    log::info!("{} sets to be inserted in db", to_insert.len());
    log::info!("{} sets to be updated in db", to_update.len());

    let insert_start = Instant::now();
    let inserted = database::insert_sets(conn, &to_insert)?;
    if inserted > 0 {
        log::info!(
            "Inserted {} sets into db in {:.3}s",
            inserted,
            insert_start.elapsed().as_secs_f64()
        );
    }

    let update_start = Instant::now();
    let updated = database::update_sets(conn, &to_update)?;
    if updated > 0 {
        log::info!(
            "Updated {} sets in db in {:.3}s",
            updated,
            update_start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

fn reconcile_cards(
    conn: &mut Connection,
    source: &HashMap<Uuid, CardPrinting>,
    now: DateTime<Utc>,
) -> Result<()> {
    let read_start = Instant::now();
    let stored = database::all_cards(conn)?;
    log::info!(
        "Read {} cards from db in {:.3}s",
        stored.len(),
        read_start.elapsed().as_secs_f64()
    );

    let (to_insert, to_update) = classify_cards(source, &stored, now);
    log::info!("{} cards to be inserted in db", to_insert.len());
    log::info!("{} cards to be updated in db", to_update.len());

    let insert_start = Instant::now();
    let inserted = database::insert_cards(conn, &to_insert)?;
    if inserted > 0 {
        log::info!(
            "Inserted {} cards into db in {:.3}s",
            inserted,
            insert_start.elapsed().as_secs_f64()
        );
    }

    let update_start = Instant::now();
    let updated = database::update_cards(conn, &to_update)?;
    if updated > 0 {
        log::info!(
            "Updated {} cards in db in {:.3}s",
            updated,
            update_start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
