//! Bulk snapshot loading.
//!
//! The source feed is Scryfall's "all cards" bulk dump: one JSON array of raw
//! card records. A [`Snapshot`] is the run's canonical view of that feed,
//! filtered down to paper printings in the accepted languages and keyed by
//! the vendor identifiers.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use super::card::ScryfallCard;
use crate::catalog::{CardPrinting, Set};
use crate::error::{Result, SyncError};

/// Scryfall bulk-data descriptor for the "all cards" dump
const BULK_DATA_URL: &str = "https://api.scryfall.com/bulk-data/all-cards";

const USER_AGENT: &str = "catalog_sync/1.0";

/// Bulk-data descriptor returned by the Scryfall API
#[derive(Debug, Deserialize)]
struct BulkDataInfo {
    download_uri: String,
}

/// One run's canonical view of the source feed
#[derive(Debug, Default)]
pub struct Snapshot {
    pub sets: HashMap<Uuid, Set>,
    pub printings: HashMap<Uuid, CardPrinting>,
}

impl Snapshot {
    /// Read and normalize a pre-downloaded bulk dump.
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Reading bulk card data from {}", path.display());

        let file = File::open(path)?;
        let cards: Vec<ScryfallCard> = serde_json::from_reader(BufReader::new(file))?;
        log::info!("Parsed {} raw card records", cards.len());

        Ok(Self::from_cards(&cards))
    }

    /// Download and normalize the bulk dump from Scryfall.
    ///
    /// Two round trips: the bulk-data descriptor first, then the actual dump
    /// from the `download_uri` it names.
    pub async fn fetch() -> Result<Self> {
        let client = reqwest::Client::new();

        log::info!("Resolving bulk data download from Scryfall...");
        let response = client
            .get(BULK_DATA_URL)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SyncError::HttpStatus(response.status()));
        }
        let info: BulkDataInfo = response.json().await?;

        log::info!("Downloading bulk card data...");
        let response = client
            .get(&info.download_uri)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SyncError::HttpStatus(response.status()));
        }
        let cards: Vec<ScryfallCard> = response.json().await?;
        log::info!("Fetched {} raw card records", cards.len());

        Ok(Self::from_cards(&cards))
    }

    /// Filter and normalize raw records into the two canonical maps.
    ///
    /// Records outside the sync scope (non-paper, unsupported language) are
    /// discarded here, before normalization. Later records win on duplicate
    /// identifiers, matching map semantics in the source feed.
    pub fn from_cards(cards: &[ScryfallCard]) -> Self {
        let mut sets = HashMap::new();
        let mut printings = HashMap::new();

        for card in cards {
            if !card.is_syncable() {
                continue;
            }
            let (set, printing) = card.unpack();
            sets.insert(set.scryfall_id, set);
            printings.insert(printing.scryfall_id, printing);
        }

        Self { sets, printings }
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub fn printing_count(&self) -> usize {
        self.printings.len()
    }
}
