//! Text and JSON reports over decoded log events and the card catalog

use crate::catalog::{Card, CatalogIndex, Rarity};
use crate::events::{BoosterOpenRecord, CollectionSnapshot};
use serde::Serialize;
use std::collections::BTreeMap;

/// Copies needed to complete a playset
const PLAYSET: u32 = 4;

fn card_line(count: u32, card: &Card) -> String {
    format!(
        "{} {} ({}) {}",
        count,
        card.name,
        card.set(),
        card.collector_number()
    )
}

fn booster_card_line(catalog: &CatalogIndex, card_id: u64) -> String {
    match catalog.get(card_id) {
        Some(card) => card_line(1, card),
        None => {
            log::warn!("Booster card {} not found in the catalog", card_id);
            format!("1 Unknown card #{}", card_id)
        }
    }
}

/// One line per collected card: `{count} {name} ({set}) {collector number}`
pub fn format_collection(collection: &CollectionSnapshot, catalog: &CatalogIndex) -> String {
    let mut output = String::new();
    for (card_id, count) in collection.iter() {
        match catalog.get(card_id) {
            Some(card) => {
                output.push_str(&card_line(count, card));
                output.push('\n');
            }
            None => log::warn!("Card {} not found in the catalog, skipping", card_id),
        }
    }
    output
}

/// Rares and mythics still missing to own a playset of every card in a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetCompletion {
    pub set: String,
    pub missing_rares: u32,
    pub missing_mythics: u32,
}

pub fn set_completion(catalog: &CatalogIndex, collection: &CollectionSnapshot, set: &str) -> SetCompletion {
    let mut missing_rares = 0;
    let mut missing_mythics = 0;

    for card in catalog.filter(|c| c.set() == set && matches!(c.rarity(), Rarity::Rare | Rarity::Mythic)) {
        let missing = PLAYSET - collection.count(card.id()).min(PLAYSET);
        match card.rarity() {
            Rarity::Mythic => missing_mythics += missing,
            _ => missing_rares += missing,
        }
    }

    SetCompletion {
        set: set.to_string(),
        missing_rares,
        missing_mythics,
    }
}

pub fn format_set_completion(completion: &SetCompletion) -> String {
    format!(
        "Missing Rares: {}\nMissing Mythics: {}\n",
        completion.missing_rares, completion.missing_mythics
    )
}

/// Cards to craft for a deck, grouped by rarity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CraftSummary {
    /// `(count, name, rarity)` per missing card
    pub cards: Vec<(u32, String, Rarity)>,
    pub total: u32,
    pub by_rarity: BTreeMap<Rarity, u32>,
}

pub fn craft_summary(missing: &BTreeMap<u64, u32>, catalog: &CatalogIndex) -> CraftSummary {
    let mut summary = CraftSummary::default();
    for (&card_id, &count) in missing {
        let Some(card) = catalog.get(card_id) else {
            log::warn!("Card {} not found in the catalog, skipping", card_id);
            continue;
        };
        summary.cards.push((count, card.name.clone(), card.rarity()));
        *summary.by_rarity.entry(card.rarity()).or_insert(0) += count;
        summary.total += count;
    }
    summary
}

pub fn format_craft_summary(summary: &CraftSummary) -> String {
    let mut output = String::new();
    for (count, name, rarity) in &summary.cards {
        output.push_str(&format!("{} {} ({})\n", count, name, rarity.label()));
    }
    output.push_str(&format!("Need to craft {} cards\n", summary.total));
    for (rarity, count) in &summary.by_rarity {
        output.push_str(&format!("{}: {}\n", rarity.label(), count));
    }
    output
}

/// Booster as served to the booster tracking page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoosterContents {
    #[serde(rename = "wcc")]
    pub wc_common: u32,
    #[serde(rename = "wcu")]
    pub wc_uncommon: u32,
    #[serde(rename = "wcr")]
    pub wc_rare: u32,
    #[serde(rename = "wcm")]
    pub wc_mythic: u32,
    pub cards: Vec<String>,
}

pub fn booster_contents(boosters: &[BoosterOpenRecord], catalog: &CatalogIndex) -> Vec<BoosterContents> {
    boosters
        .iter()
        .map(|booster| BoosterContents {
            wc_common: booster.common_wildcards,
            wc_uncommon: booster.uncommon_wildcards,
            wc_rare: booster.rare_wildcards,
            wc_mythic: booster.mythic_wildcards,
            cards: booster
                .card_ids
                .iter()
                .map(|&id| booster_card_line(catalog, id))
                .collect(),
        })
        .collect()
}

pub fn format_boosters(boosters: &[BoosterOpenRecord], catalog: &CatalogIndex) -> String {
    let mut output = String::new();
    for (i, booster) in boosters.iter().enumerate() {
        output.push_str(&format!("Booster #{}\n", i));
        for &card_id in &booster.card_ids {
            output.push_str(&booster_card_line(catalog, card_id));
            output.push('\n');
        }
        output.push_str(&format!(
            "\nCommon Wildcards: {}\nUncommon Wildcards: {}\nRare Wildcards: {}\nMythic Wildcards: {}\n",
            booster.common_wildcards,
            booster.uncommon_wildcards,
            booster.rare_wildcards,
            booster.mythic_wildcards
        ));
    }
    output
}
