//! Drivers that scan a whole log and collect decoded events

use crate::error::Result;
use crate::events::{decode_event, BoosterOpenRecord, CollectionSnapshot, GameEvent, InventorySnapshot};
use crate::log_scanner::{EventKind, EventPrefixes, MessageScanner};
use std::io::BufRead;

/// Scan `reader` and decode every recognized event, in log order.
///
/// Inventory updates that are not booster openings are dropped.
pub fn extract_events<R: BufRead>(reader: R, prefixes: &EventPrefixes) -> Result<Vec<GameEvent>> {
    let mut events = Vec::new();
    for event in MessageScanner::new(reader, prefixes) {
        let event = event?;
        if let Some(decoded) = decode_event(&event)? {
            events.push(decoded);
        }
    }
    Ok(events)
}

/// Returns every collection snapshot in the log, oldest first
pub fn find_collections<R: BufRead>(reader: R) -> Result<Vec<CollectionSnapshot>> {
    let prefixes = EventPrefixes::only(&[EventKind::Collection]);
    let collections: Vec<CollectionSnapshot> = extract_events(reader, &prefixes)?
        .into_iter()
        .filter_map(|event| match event {
            GameEvent::Collection(c) => Some(c),
            _ => None,
        })
        .collect();
    log::info!("Found {} collection snapshots", collections.len());
    Ok(collections)
}

/// Returns every inventory snapshot in the log, oldest first
pub fn find_inventories<R: BufRead>(reader: R) -> Result<Vec<InventorySnapshot>> {
    let prefixes = EventPrefixes::only(&[EventKind::InventorySnapshot]);
    Ok(extract_events(reader, &prefixes)?
        .into_iter()
        .filter_map(|event| match event {
            GameEvent::Inventory(i) => Some(i),
            _ => None,
        })
        .collect())
}

/// Returns the contents of every booster opened in the log, oldest first
pub fn find_boosters<R: BufRead>(reader: R) -> Result<Vec<BoosterOpenRecord>> {
    let prefixes = EventPrefixes::only(&[EventKind::InventoryUpdate]);
    let boosters: Vec<BoosterOpenRecord> = extract_events(reader, &prefixes)?
        .into_iter()
        .filter_map(|event| match event {
            GameEvent::BoosterOpened(b) => Some(b),
            _ => None,
        })
        .collect();
    log::info!("Found {} opened boosters", boosters.len());
    Ok(boosters)
}
