//! Scanner for JSON event payloads embedded in the MTG Arena client log
//!
//! The client announces an event with a recognizable line (for example
//! `<== PlayerInventory.GetPlayerCardsV3(12)`) and writes the JSON document
//! either on the rest of that line or on the lines that follow. The scanner
//! reads lines until one starts with a known prefix, positions the stream on
//! the next `{` and lets serde_json consume exactly one object from there.
//!
//! Line reads and the JSON parser share a single cursor: whatever the parser
//! did not consume, including the tail of a line it stopped in, is where the
//! next line read begins.

use crate::error::{AssistantError, Result};
use serde::Deserialize;
use serde_json::value::RawValue;
use std::fmt;
use std::io::{self, BufRead, Read};

/// Log line announcing the player's card collection
pub const COLLECTION_PREFIX: &str = "<== PlayerInventory.GetPlayerCardsV3";
/// Log line announcing the player's wildcard and currency balances
pub const INVENTORY_PREFIX: &str = "<== PlayerInventory.GetPlayerInventory";
/// Log line announcing a change to the inventory (booster opened, reward, purchase...)
pub const INVENTORY_UPDATE_PREFIX: &str = "[UnityCrossThreadLogger]Incoming Inventory.Updated";

/// Category of a recognized log message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Collection,
    InventorySnapshot,
    InventoryUpdate,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Collection => "collection",
            EventKind::InventorySnapshot => "inventory",
            EventKind::InventoryUpdate => "inventory update",
        }
    }

    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::Collection,
            EventKind::InventorySnapshot,
            EventKind::InventoryUpdate,
        ]
    }

    fn default_prefix(&self) -> &'static str {
        match self {
            EventKind::Collection => COLLECTION_PREFIX,
            EventKind::InventorySnapshot => INVENTORY_PREFIX,
            EventKind::InventoryUpdate => INVENTORY_UPDATE_PREFIX,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line prefixes recognized by the scanner, one per event kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPrefixes {
    entries: Vec<(EventKind, String)>,
}

impl EventPrefixes {
    /// A table that recognizes nothing
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Default prefixes restricted to the given kinds
    pub fn only(kinds: &[EventKind]) -> Self {
        kinds.iter().fold(Self::empty(), |table, kind| {
            table.with(*kind, kind.default_prefix())
        })
    }

    /// Set the prefix for `kind`, replacing any previous one
    pub fn with(mut self, kind: EventKind, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = prefix,
            None => self.entries.push((kind, prefix)),
        }
        self
    }

    pub fn prefix(&self, kind: EventKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, p)| p.as_str())
    }

    /// Find the kind whose prefix starts `line`, returning it with the prefix length.
    /// The longest matching prefix wins.
    pub fn match_line(&self, line: &[u8]) -> Option<(EventKind, usize)> {
        self.entries
            .iter()
            .filter(|(_, prefix)| !prefix.is_empty() && line.starts_with(prefix.as_bytes()))
            .max_by_key(|(_, prefix)| prefix.len())
            .map(|(kind, prefix)| (*kind, prefix.len()))
    }
}

impl Default for EventPrefixes {
    fn default() -> Self {
        Self::only(EventKind::all())
    }
}

/// A raw JSON payload tagged with the kind of line that announced it
#[derive(Debug)]
pub struct LogEvent {
    pub kind: EventKind,
    /// Byte offset of the payload's opening brace in the log
    pub offset: u64,
    pub payload: Box<RawValue>,
}

impl LogEvent {
    /// The payload text, exactly as it appeared in the log
    pub fn payload(&self) -> &str {
        self.payload.get()
    }
}

/// Reader shared by the line scanner and the JSON parser.
///
/// Bytes handed back with `unread` are served before the inner reader.
struct ScanCursor<R> {
    pending: Vec<u8>,
    pos: usize,
    inner: R,
    offset: u64,
}

impl<R: BufRead> ScanCursor<R> {
    fn new(inner: R) -> Self {
        Self {
            pending: Vec::new(),
            pos: 0,
            inner,
            offset: 0,
        }
    }

    /// Push `bytes` back in front of the unread input.
    fn unread(&mut self, bytes: &[u8]) {
        let mut pending = Vec::with_capacity(bytes.len() + self.pending.len() - self.pos);
        pending.extend_from_slice(bytes);
        pending.extend_from_slice(&self.pending[self.pos..]);
        self.pending = pending;
        self.pos = 0;
        self.offset -= bytes.len() as u64;
    }

    /// Advance up to the next `{` without consuming it. Returns false at end of input.
    fn seek_object_start(&mut self) -> io::Result<bool> {
        loop {
            let (found, used) = {
                let available = match self.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if available.is_empty() {
                    return Ok(false);
                }
                match available.iter().position(|&b| b == b'{') {
                    Some(i) => (true, i),
                    None => (false, available.len()),
                }
            };
            self.consume(used);
            if found {
                return Ok(true);
            }
        }
    }
}

impl<R: BufRead> Read for ScanCursor<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = {
            let available = self.fill_buf()?;
            let n = available.len().min(out.len());
            out[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl<R: BufRead> BufRead for ScanCursor<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos < self.pending.len() {
            return Ok(&self.pending[self.pos..]);
        }
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.offset += amt as u64;
        if self.pos < self.pending.len() {
            self.pos += amt;
            if self.pos >= self.pending.len() {
                self.pending.clear();
                self.pos = 0;
            }
        } else {
            self.inner.consume(amt);
        }
    }
}

/// Produces, in log order, the payloads of every line starting with a recognized prefix
pub struct MessageScanner<'p, R> {
    cursor: ScanCursor<R>,
    prefixes: &'p EventPrefixes,
    line: Vec<u8>,
    failed: bool,
}

impl<'p, R: BufRead> MessageScanner<'p, R> {
    pub fn new(reader: R, prefixes: &'p EventPrefixes) -> Self {
        Self {
            cursor: ScanCursor::new(reader),
            prefixes,
            line: Vec::new(),
            failed: false,
        }
    }

    /// Bytes consumed from the log so far
    pub fn offset(&self) -> u64 {
        self.cursor.offset
    }

    /// Scan forward to the next recognized event. `Ok(None)` at end of input.
    pub fn next_event(&mut self) -> Result<Option<LogEvent>> {
        loop {
            self.line.clear();
            if self.cursor.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }

            let Some((kind, prefix_len)) = self.prefixes.match_line(&self.line) else {
                continue;
            };
            let line_start = self.cursor.offset - self.line.len() as u64;
            log::debug!("Found {} message at byte {}", kind, line_start);

            match self.line[prefix_len..].iter().position(|&b| b == b'{') {
                Some(i) => self.cursor.unread(&self.line[prefix_len + i..]),
                None => {
                    if !self.cursor.seek_object_start()? {
                        return Err(AssistantError::MissingPayload {
                            kind,
                            offset: line_start,
                        });
                    }
                }
            }

            let offset = self.cursor.offset;
            let mut de = serde_json::Deserializer::from_reader(&mut self.cursor);
            let payload = Box::<RawValue>::deserialize(&mut de).map_err(|source| {
                if source.is_io() {
                    AssistantError::Io(source.into())
                } else {
                    AssistantError::MalformedPayload {
                        kind,
                        offset,
                        source,
                    }
                }
            })?;

            return Ok(Some(LogEvent {
                kind,
                offset,
                payload,
            }));
        }
    }
}

impl<R: BufRead> Iterator for MessageScanner<'_, R> {
    type Item = Result<LogEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_event() {
            Ok(event) => event.map(Ok),
            Err(e) => {
                // stream position is no longer trustworthy
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
#[path = "log_scanner_tests.rs"]
mod tests;
