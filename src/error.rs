//! Error types for mtga_assistant

use crate::log_scanner::EventKind;

/// Unified error type for log extraction, catalog building and the tools built on them
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Reading the log or a resource stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON document following a recognized log line is not valid JSON
    #[error("malformed {kind} payload at byte {offset}: {source}")]
    MalformedPayload {
        kind: EventKind,
        offset: u64,
        #[source]
        source: serde_json::Error,
    },

    /// A recognized log line was not followed by any JSON object
    #[error("{kind} event at byte {offset} has no payload before end of input")]
    MissingPayload { kind: EventKind, offset: u64 },

    /// The payload is valid JSON but does not have the shape expected for its event kind
    #[error("{kind} payload does not match the expected schema: {source}")]
    Schema {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },

    /// Summing the deltas of a booster's sub-updates overflowed
    #[error("Inventory update {field} total overflows")]
    DeltaOverflow { field: &'static str },

    /// A collection snapshot key is not a card id
    #[error("found non-numeric card id {0:?} in collection snapshot")]
    InvalidIdentifier(String),

    /// A collection snapshot count is not a number
    #[error("invalid count {count:?} for card {card_id} in collection snapshot")]
    InvalidCount { card_id: u64, count: String },

    /// A resource table could not be decoded
    #[error("failed to parse {table} file: {source}")]
    ResourceParse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The texts table has no block for the requested language
    #[error("no card texts found for language {0:?}")]
    MissingLanguage(String),

    /// An attribute row references a text id absent from the texts table
    #[error("missing card text for card {card_id} (title id {title_id})")]
    MissingText { card_id: u64, title_id: u64 },

    /// Resource files could not be located in the data directory
    #[error("resource files: {0}")]
    ResourceFiles(String),

    /// Resource file glob pattern is invalid
    #[error("invalid resource file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A deck list line does not follow the MTGA export format
    #[error("[{line}] could not parse deck line {text:?}")]
    DeckLine { line: usize, text: String },

    /// Deck line pattern failed to compile
    #[error("invalid deck line pattern: {0}")]
    Regex(#[from] regex::Error),

    /// No printing of a deck card exists in the enabled sets
    #[error("card {0:?} not found in enabled sets")]
    CardNotInEnabledSets(String),

    /// An enabled-set token names no known set
    #[error("invalid set: {0}")]
    InvalidSet(String),

    /// The log holds no collection snapshot
    #[error("no collection found in the mtga logs, make sure detailed logs are enabled in the Arena client")]
    NoCollection,
}

/// Result alias for mtga_assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;
