//! Typed records decoded from log event payloads

use crate::error::{AssistantError, Result};
use crate::log_scanner::{EventKind, LogEvent};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::BTreeMap;

/// Context tag of inventory updates caused by opening a booster pack
pub const BOOSTER_OPEN_CONTEXT: &str = "Booster.Open";

/// Owned copies per card id. A missing id means no copies owned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSnapshot {
    cards: BTreeMap<u64, u32>,
}

impl CollectionSnapshot {
    pub fn from_counts(cards: BTreeMap<u64, u32>) -> Self {
        Self { cards }
    }

    /// Copies owned of `card_id`, zero when absent
    pub fn count(&self, card_id: u64) -> u32 {
        self.cards.get(&card_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over `(card_id, count)` in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.cards.iter().map(|(id, count)| (*id, *count))
    }
}

/// Collection counts appear both as JSON numbers and as decimal strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(u32),
    Text(String),
}

/// Wildcard and currency balances of the player
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventorySnapshot {
    pub player_id: String,
    pub wc_common: u32,
    pub wc_uncommon: u32,
    pub wc_rare: u32,
    pub wc_mythic: u32,
    pub gold: i64,
    pub gems: i64,
    pub vault_progress: f64,
}

/// Contents of one opened booster: wildcards gained and cards granted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoosterOpenRecord {
    pub common_wildcards: u32,
    pub uncommon_wildcards: u32,
    pub rare_wildcards: u32,
    pub mythic_wildcards: u32,
    pub gems_delta: i64,
    pub gold_delta: i64,
    /// Granted card ids, in the order the log lists them
    pub card_ids: Vec<u64>,
}

/// Envelope of an inventory update. `updates` stays raw until the context is known.
#[derive(Debug, Deserialize)]
struct InventoryUpdateMsg {
    #[serde(default)]
    context: String,
    #[serde(default)]
    updates: Option<Box<RawValue>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InventorySubUpdate {
    delta: InventoryDelta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InventoryDelta {
    wc_common_delta: u32,
    wc_uncommon_delta: u32,
    wc_rare_delta: u32,
    wc_mythic_delta: u32,
    gems_delta: i64,
    gold_delta: i64,
    cards_added: Vec<u64>,
}

/// A decoded log event
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Collection(CollectionSnapshot),
    Inventory(InventorySnapshot),
    BoosterOpened(BoosterOpenRecord),
}

/// Decode a scanned event into its typed record.
///
/// Inventory updates that did not come from opening a booster decode to `None`.
pub fn decode_event(event: &LogEvent) -> Result<Option<GameEvent>> {
    decode_payload(event.kind, event.payload())
}

/// Decode a raw JSON payload as an event of the given kind
pub fn decode_payload(kind: EventKind, payload: &str) -> Result<Option<GameEvent>> {
    match kind {
        EventKind::Collection => decode_collection(payload).map(|c| Some(GameEvent::Collection(c))),
        EventKind::InventorySnapshot => {
            let inventory: InventorySnapshot = serde_json::from_str(payload)
                .map_err(|source| AssistantError::Schema { kind, source })?;
            Ok(Some(GameEvent::Inventory(inventory)))
        }
        EventKind::InventoryUpdate => {
            Ok(decode_inventory_update(payload)?.map(GameEvent::BoosterOpened))
        }
    }
}

/// Decode a collection payload. Every key must be a card id.
pub fn decode_collection(payload: &str) -> Result<CollectionSnapshot> {
    let raw: BTreeMap<String, RawCount> =
        serde_json::from_str(payload).map_err(|source| AssistantError::Schema {
            kind: EventKind::Collection,
            source,
        })?;

    let mut cards = BTreeMap::new();
    for (key, count) in raw {
        let card_id: u64 = key
            .parse()
            .map_err(|_| AssistantError::InvalidIdentifier(key.clone()))?;
        let count = match count {
            RawCount::Number(n) => n,
            RawCount::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| AssistantError::InvalidCount {
                        card_id,
                        count: text.clone(),
                    })?
            }
        };
        cards.insert(card_id, count);
    }

    log::info!("Found {} cards!", cards.len());
    Ok(CollectionSnapshot { cards })
}

/// Integer types a booster delta can be summed in
trait CheckedSum: Sized {
    fn checked_sum(self, other: Self) -> Option<Self>;
}

impl CheckedSum for u32 {
    fn checked_sum(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

impl CheckedSum for i64 {
    fn checked_sum(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

fn sum_delta<T: CheckedSum>(total: T, delta: T, field: &'static str) -> Result<T> {
    total
        .checked_sum(delta)
        .ok_or(AssistantError::DeltaOverflow { field })
}

/// Decode an inventory update, keeping it only when it comes from a booster being opened
pub fn decode_inventory_update(payload: &str) -> Result<Option<BoosterOpenRecord>> {
    let msg: InventoryUpdateMsg =
        serde_json::from_str(payload).map_err(|source| AssistantError::Schema {
            kind: EventKind::InventoryUpdate,
            source,
        })?;

    if msg.context != BOOSTER_OPEN_CONTEXT {
        log::debug!("Skipping inventory update with context {:?}", msg.context);
        return Ok(None);
    }

    let updates: Vec<InventorySubUpdate> = match msg.updates {
        Some(raw) => serde_json::from_str(raw.get()).map_err(|source| AssistantError::Schema {
            kind: EventKind::InventoryUpdate,
            source,
        })?,
        None => Vec::new(),
    };

    let mut record = BoosterOpenRecord::default();
    for InventorySubUpdate { delta } in updates {
        let r = &mut record;
        r.common_wildcards = sum_delta(r.common_wildcards, delta.wc_common_delta, "wcCommonDelta")?;
        r.uncommon_wildcards =
            sum_delta(r.uncommon_wildcards, delta.wc_uncommon_delta, "wcUncommonDelta")?;
        r.rare_wildcards = sum_delta(r.rare_wildcards, delta.wc_rare_delta, "wcRareDelta")?;
        r.mythic_wildcards = sum_delta(r.mythic_wildcards, delta.wc_mythic_delta, "wcMythicDelta")?;
        r.gems_delta = sum_delta(r.gems_delta, delta.gems_delta, "gemsDelta")?;
        r.gold_delta = sum_delta(r.gold_delta, delta.gold_delta, "goldDelta")?;
        r.card_ids.extend(delta.cards_added);
    }

    Ok(Some(record))
}
