//! Deck lists in the MTG Arena export format and how far a collection is from them
//!
//! An exported deck line reads `[copies] [name] ([set]) [collector number]`,
//! for example `4 Llanowar Elves (M19) 314`.

use crate::catalog::{Card, CatalogIndex};
use crate::error::{AssistantError, Result};
use crate::events::CollectionSnapshot;
use crate::expansions::EnabledSets;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::io::BufRead;

const DECK_LINE_PATTERN: &str = r"^([1-9][0-9]*) (.*) \(([A-Z0-9]{3})\) ?(.*)?$";

/// Section headers the client writes between card lines
const IGNORED_LINES: &[&str] = &["Deck", "Sideboard", "Commander", ""];

/// One card line of a deck list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub count: u32,
    pub name: String,
    pub set: String,
    pub collector_number: String,
}

/// Names of the basic lands, which every player owns without limit
#[derive(Debug, Clone)]
pub struct BasicLands {
    names: HashSet<String>,
}

impl BasicLands {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl Default for BasicLands {
    fn default() -> Self {
        Self {
            names: ["Swamp", "Plains", "Island", "Forest", "Mountain"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Parser for exported deck lists
#[derive(Debug, Clone)]
pub struct DeckParser {
    line_pattern: Regex,
    basic_lands: BasicLands,
}

impl DeckParser {
    pub fn new(basic_lands: BasicLands) -> Result<Self> {
        Ok(Self {
            line_pattern: Regex::new(DECK_LINE_PATTERN)?,
            basic_lands,
        })
    }

    /// Parse a deck list, skipping section headers and basic lands
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<DeckEntry>> {
        let mut entries = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if IGNORED_LINES.contains(&line) {
                continue;
            }

            let line_error = || AssistantError::DeckLine {
                line: index + 1,
                text: line.to_string(),
            };
            let captures = self.line_pattern.captures(line).ok_or_else(line_error)?;

            let count: u32 = captures[1].parse().map_err(|_| line_error())?;
            let name = &captures[2];
            if self.basic_lands.contains(name) {
                continue;
            }

            entries.push(DeckEntry {
                count,
                name: name.to_string(),
                set: captures[3].to_string(),
                collector_number: captures
                    .get(4)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            });
        }

        Ok(entries)
    }
}

/// Copies still missing from `collection` to build `deck`, keyed by card id.
///
/// Owned copies of any enabled printing count toward a deck card. Missing
/// copies are attributed to the first enabled printing in catalog order.
pub fn deck_distance(
    deck: &[DeckEntry],
    catalog: &CatalogIndex,
    collection: &CollectionSnapshot,
    enabled: &EnabledSets,
) -> Result<BTreeMap<u64, u32>> {
    let mut missing = BTreeMap::new();

    for entry in deck {
        let candidates: Vec<&Card> = catalog
            .by_name(&entry.name)
            .into_iter()
            .filter(|card| enabled.contains(card.set()))
            .collect();

        let Some(first) = candidates.first() else {
            return Err(AssistantError::CardNotInEnabledSets(entry.name.clone()));
        };

        let mut needed = entry.count;
        for candidate in &candidates {
            needed = needed.saturating_sub(collection.count(candidate.id()));
            if needed == 0 {
                break;
            }
        }

        if needed > 0 {
            *missing.entry(first.id()).or_insert(0) += needed;
        }
    }

    Ok(missing)
}

#[cfg(test)]
#[path = "deck_tests.rs"]
mod tests;
