//! Known expansions and the enabled-set filter used by the deck helper

use crate::error::{AssistantError, Result};
use std::collections::HashSet;

const ALL_SETS: &[&str] = &[
    "RNA", "PLS", "9ED", "NPH", "C13", "MOR", "WWK", "M11", "AVR", "CHK", "WTH", "LRW", "M10", "XLN",
    "SCG", "8ED", "SOK", "DIS", "RTR", "GTC", "ORI", "BFZ", "EMN", "M19", "MH1", "10E", "ME4", "RIX",
    "WAR", "MIR", "RAV", "ROE", "DAR", "G18", "GRN", "M20", "ELD", "DST", "5DN", "ME2", "AKH", "ANA",
    "INV", "CMD", "ZEN", "THB",
];

const STANDARD_SETS: &[&str] = &["ELD", "M20", "WAR", "GRN", "RNA", "THB"];

/// Known set codes and the subset legal in Standard
#[derive(Debug, Clone)]
pub struct SetRegistry {
    all: Vec<String>,
    standard: Vec<String>,
}

impl SetRegistry {
    pub fn new(all: Vec<String>, standard: Vec<String>) -> Self {
        Self { all, standard }
    }

    pub fn is_known(&self, set: &str) -> bool {
        self.all.iter().any(|s| s == set)
    }

    /// Parse a comma separated list of set codes.
    ///
    /// `STD` enables every Standard set, `ALL` enables every known set.
    pub fn parse_enabled(&self, list: &str) -> Result<EnabledSets> {
        let mut enabled = HashSet::new();
        for token in list.split(',').map(str::trim) {
            match token {
                "ALL" => {
                    enabled.extend(self.all.iter().cloned());
                    break;
                }
                "STD" => enabled.extend(self.standard.iter().cloned()),
                set if self.is_known(set) => {
                    enabled.insert(set.to_string());
                }
                other => return Err(AssistantError::InvalidSet(other.to_string())),
            }
        }
        Ok(EnabledSets { sets: enabled })
    }
}

impl Default for SetRegistry {
    fn default() -> Self {
        Self::new(
            ALL_SETS.iter().map(|s| s.to_string()).collect(),
            STANDARD_SETS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

/// Sets a deck is allowed to draw printings from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledSets {
    sets: HashSet<String>,
}

impl EnabledSets {
    pub fn contains(&self, set: &str) -> bool {
        self.sets.contains(set)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
