//! Immutable card index joining card rows with their localized names

use super::tables::{parse_cards, parse_texts, texts_for_language, CardAttributes, LanguageBlock, Rarity};
use crate::error::{AssistantError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;

/// A card row with its resolved name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub name: String,
    #[serde(flatten)]
    pub attributes: CardAttributes,
}

impl Card {
    pub fn id(&self) -> u64 {
        self.attributes.id
    }

    pub fn set(&self) -> &str {
        &self.attributes.set
    }

    pub fn rarity(&self) -> Rarity {
        self.attributes.rarity
    }

    pub fn collector_number(&self) -> &str {
        &self.attributes.collector_number
    }
}

/// Lookup of cards by id and by name, in a single language.
///
/// Several printings share a name, so a name maps to every card carrying it,
/// in table order.
#[derive(Debug)]
pub struct CatalogIndex {
    cards: Vec<Card>,
    by_id: HashMap<u64, usize>,
    by_name: HashMap<String, Vec<usize>>,
    language: String,
}

impl CatalogIndex {
    /// Join `rows` with the `language` block of `texts`.
    ///
    /// Fails without producing an index when the language is missing or any
    /// row's title id has no text. A repeated card id keeps the last row in
    /// the id lookup while both rows stay listed under their name.
    pub fn build(rows: Vec<CardAttributes>, texts: &[LanguageBlock], language: &str) -> Result<Self> {
        let texts = texts_for_language(texts, language)?;

        let mut cards = Vec::with_capacity(rows.len());
        let mut by_id = HashMap::with_capacity(rows.len());
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for attributes in rows {
            let name = texts
                .get(&attributes.title_id)
                .ok_or_else(|| AssistantError::MissingText {
                    card_id: attributes.id,
                    title_id: attributes.title_id,
                })?
                .clone();

            let position = cards.len();
            if by_id.insert(attributes.id, position).is_some() {
                log::warn!("Duplicate card id {} in cards table", attributes.id);
            }
            by_name.entry(name.clone()).or_default().push(position);
            cards.push(Card { name, attributes });
        }

        log::info!("Loaded {} cards ({} distinct names)", cards.len(), by_name.len());

        Ok(Self {
            cards,
            by_id,
            by_name,
            language: language.to_string(),
        })
    }

    /// Parse the cards and texts tables and build the index
    pub fn from_readers<C: Read, T: Read>(cards: C, texts: T, language: &str) -> Result<Self> {
        let rows = parse_cards(cards)?;
        let blocks = parse_texts(texts)?;
        Self::build(rows, &blocks, language)
    }

    /// Look up a card by its id
    pub fn get(&self, id: u64) -> Option<&Card> {
        self.by_id.get(&id).map(|&i| &self.cards[i])
    }

    /// All cards with the given name, in table order. Empty when unknown.
    pub fn by_name(&self, name: &str) -> Vec<&Card> {
        self.by_name
            .get(name)
            .map(|positions| positions.iter().map(|&i| &self.cards[i]).collect())
            .unwrap_or_default()
    }

    /// All cards matching `predicate`, in table order
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Card>
    where
        P: FnMut(&Card) -> bool,
    {
        self.cards.iter().filter(|&card| predicate(card)).collect()
    }

    /// Iterate over all cards in table order
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Language of the card names
    pub fn language(&self) -> &str {
        &self.language
    }
}
