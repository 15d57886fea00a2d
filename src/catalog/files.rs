//! Locating and loading the resource files inside the MTG Arena data folder
//!
//! The client stores the tables as `data_cards_<hash>.mtga` and
//! `data_loc_<hash>.mtga` in `MTGA_Data/Downloads/Data`. The hash changes with
//! every client update, so the files are found by pattern.

use super::index::CatalogIndex;
use crate::error::{AssistantError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const CARDS_FILE_PATTERN: &str = "data_cards_*.mtga";
const TEXTS_FILE_PATTERN: &str = "data_loc_*.mtga";

/// Paths of the two resource tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFiles {
    pub cards: PathBuf,
    pub texts: PathBuf,
}

/// Find the single file in `dir` matching `file_pattern`
fn find_single(dir: &Path, file_pattern: &str, what: &str) -> Result<PathBuf> {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped_dir).join(file_pattern);

    let mut matches = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        matches.push(entry.map_err(|e| AssistantError::Io(e.into_error()))?);
    }

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(AssistantError::ResourceFiles(format!(
            "no {} file found in {}",
            what,
            dir.display()
        ))),
        _ => Err(AssistantError::ResourceFiles(format!(
            "more than one {} file found: {:?}",
            what, matches
        ))),
    }
}

/// Locate the cards and texts tables inside the MTG Arena data directory
pub fn find_resource_files(data_dir: &Path) -> Result<ResourceFiles> {
    let texts = find_single(data_dir, TEXTS_FILE_PATTERN, "texts")?;
    let cards = find_single(data_dir, CARDS_FILE_PATTERN, "cards")?;
    Ok(ResourceFiles { cards, texts })
}

/// Find, open and index the resource files of `data_dir`, naming cards in `language`
pub fn open_catalog(data_dir: &Path, language: &str) -> Result<CatalogIndex> {
    let files = find_resource_files(data_dir)?;
    log::info!("Cards file: {}", files.cards.display());
    log::info!("Texts file: {}", files.texts.display());

    let cards = BufReader::new(File::open(&files.cards)?);
    let texts = BufReader::new(File::open(&files.texts)?);
    CatalogIndex::from_readers(cards, texts, language)
}
