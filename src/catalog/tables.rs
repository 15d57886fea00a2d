//! Raw card tables shipped with the MTG Arena client
//!
//! `data_cards_*.mtga` is a JSON array of card attribute rows, and
//! `data_loc_*.mtga` is a JSON array of per-language text blocks. A card row
//! carries a `titleId` that points into the text blocks; it does not carry the
//! card name itself.

use crate::error::{AssistantError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Card rarity tier as encoded in the cards table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum Rarity {
    #[default]
    Token,
    BasicLand,
    Common,
    Uncommon,
    Rare,
    Mythic,
    /// A code this version does not know about
    Unknown(u8),
}

impl Rarity {
    /// Human readable rarity label
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Token => "Token",
            Rarity::BasicLand => "Basic Land",
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Mythic => "Mythic Rare",
            Rarity::Unknown(_) => "Unknown",
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Rarity::Token => 0,
            Rarity::BasicLand => 1,
            Rarity::Common => 2,
            Rarity::Uncommon => 3,
            Rarity::Rare => 4,
            Rarity::Mythic => 5,
            Rarity::Unknown(code) => *code,
        }
    }
}

impl From<u8> for Rarity {
    fn from(code: u8) -> Self {
        match code {
            0 => Rarity::Token,
            1 => Rarity::BasicLand,
            2 => Rarity::Common,
            3 => Rarity::Uncommon,
            4 => Rarity::Rare,
            5 => Rarity::Mythic,
            other => Rarity::Unknown(other),
        }
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> u8 {
        rarity.code()
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the cards table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CardAttributes {
    #[serde(rename = "grpid")]
    pub id: u64,
    /// Text id of the card name
    #[serde(rename = "titleId")]
    pub title_id: u64,
    #[serde(rename = "CollectorNumber", default)]
    pub collector_number: String,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(rename = "colorIdentity", default)]
    pub color_identity: Vec<u64>,
    #[serde(rename = "castingcost", default)]
    pub casting_cost: String,
    #[serde(default)]
    pub types: Vec<u64>,
    #[serde(default)]
    pub subtypes: Vec<u64>,
    #[serde(default)]
    pub supertypes: Vec<u64>,
    #[serde(rename = "cardTypeTextId", default)]
    pub card_type_text_id: u64,
    #[serde(rename = "subtypeTextId", default)]
    pub subtype_text_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextEntry {
    pub id: u64,
    pub text: String,
}

/// All localized strings for one language
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageBlock {
    #[serde(rename = "langkey", alias = "isoCode")]
    pub language: String,
    #[serde(rename = "keys")]
    pub entries: Vec<TextEntry>,
}

/// Parse the cards table
pub fn parse_cards<R: Read>(reader: R) -> Result<Vec<CardAttributes>> {
    serde_json::from_reader(reader).map_err(|source| AssistantError::ResourceParse {
        table: "cards",
        source,
    })
}

/// Parse the localized texts table
pub fn parse_texts<R: Read>(reader: R) -> Result<Vec<LanguageBlock>> {
    serde_json::from_reader(reader).map_err(|source| AssistantError::ResourceParse {
        table: "texts",
        source,
    })
}

/// Text id to string mapping for `language`, taken from the first block in that language.
///
/// Fails when no block (or only an empty one) exists for the language.
pub fn texts_for_language(blocks: &[LanguageBlock], language: &str) -> Result<HashMap<u64, String>> {
    let block = blocks.iter().find(|block| {
        if block.language == language {
            return true;
        }
        log::debug!("Skipping language {:?}", block.language);
        false
    });

    let texts: HashMap<u64, String> = block
        .map(|block| {
            block
                .entries
                .iter()
                .map(|entry| (entry.id, entry.text.clone()))
                .collect()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        return Err(AssistantError::MissingLanguage(language.to_string()));
    }
    Ok(texts)
}
