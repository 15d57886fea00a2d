//! MTG Arena Assistant - collection and booster tracking from the client log
//!
//! Extracts collection, inventory and booster-opening events from the MTG
//! Arena client log and resolves the card ids they mention against the card
//! tables shipped with the client.

pub mod catalog;
pub mod deck;
pub mod error;
pub mod events;
pub mod expansions;
pub mod extraction;
pub mod log_scanner;
pub mod reports;
pub mod web;

pub use catalog::{open_catalog, Card, CatalogIndex, Rarity};
pub use error::{AssistantError, Result};
pub use events::{decode_event, BoosterOpenRecord, CollectionSnapshot, GameEvent, InventorySnapshot};
pub use extraction::{extract_events, find_boosters, find_collections, find_inventories};
pub use log_scanner::{EventKind, EventPrefixes, LogEvent, MessageScanner};
