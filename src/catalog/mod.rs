//! Card catalog built from the MTG Arena resource files

mod files;
mod index;
mod tables;

pub use files::{find_resource_files, open_catalog, ResourceFiles};
pub use index::{Card, CatalogIndex};
pub use tables::{parse_cards, parse_texts, texts_for_language, CardAttributes, LanguageBlock, Rarity, TextEntry};
