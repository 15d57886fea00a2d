//! Tests for the log message scanner

use super::*;
use serde_json::Value;
use std::io::Cursor;

fn scan_all(log: &str) -> Vec<LogEvent> {
    let prefixes = EventPrefixes::default();
    MessageScanner::new(Cursor::new(log.as_bytes()), &prefixes)
        .collect::<Result<Vec<_>>>()
        .unwrap()
}

fn parsed(event: &LogEvent) -> Value {
    serde_json::from_str(event.payload()).unwrap()
}

/// Reader that returns its data and then fails instead of reporting end of input
struct FailingReader {
    data: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "disk gone"));
        }
        Ok(n)
    }
}

#[test]
fn test_unrelated_lines_produce_nothing() {
    let log = "[UnityCrossThreadLogger]Connecting to matchmaking\n\
               {\"not\": \"an event\"}\n\
               PlayerInventory.GetPlayerCardsV3 {\"1\": 1}\n\
               <==PlayerInventory.GetPlayerCardsV3 {\"1\": 1}\n";
    assert!(scan_all(log).is_empty());
}

#[test]
fn test_prefix_match_is_case_sensitive() {
    let log = "<== playerinventory.getplayercardsv3 {\"1\": 1}\n";
    assert!(scan_all(log).is_empty());
}

#[test]
fn test_payload_on_same_line() {
    let log = "noise\n<== PlayerInventory.GetPlayerCardsV3(7) {\"100\": 5, \"101\": 0}\nmore noise\n";
    let events = scan_all(log);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Collection);
    assert_eq!(events[0].payload(), r#"{"100": 5, "101": 0}"#);
}

#[test]
fn test_payload_on_following_line() {
    let log = "<== PlayerInventory.GetPlayerCardsV3(7)\n{\"100\": 5, \"101\": 0}\n";
    let events = scan_all(log);

    assert_eq!(events.len(), 1);
    assert_eq!(parsed(&events[0]), serde_json::json!({"100": 5, "101": 0}));
}

#[test]
fn test_split_document_matches_single_line_document() {
    let single = "<== PlayerInventory.GetPlayerInventory {\"playerId\": \"P1\", \"wcRare\": 3}\n";
    let split = "<== PlayerInventory.GetPlayerInventory {\n  \"playerId\":\n   \"P1\",\n\n  \"wcRare\": 3\n}\n";

    let a = scan_all(single);
    let b = scan_all(split);

    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_eq!(parsed(&a[0]), parsed(&b[0]));
}

#[test]
fn test_object_start_searched_past_blank_lines() {
    let log = "<== PlayerInventory.GetPlayerCardsV3(3)\n\n   \n  {\"5\": 1}\n";
    let events = scan_all(log);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].payload(), r#"{"5": 1}"#);
}

#[test]
fn test_scanning_resumes_mid_line_after_payload() {
    // The second event starts right where the first document ends
    let log = "<== PlayerInventory.GetPlayerCardsV3 {\"1\": 2}<== PlayerInventory.GetPlayerInventory {\"wcRare\": 3}\n";
    let events = scan_all(log);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventKind::Collection);
    assert_eq!(events[0].payload(), r#"{"1": 2}"#);
    assert_eq!(events[1].kind, EventKind::InventorySnapshot);
    assert_eq!(events[1].payload(), r#"{"wcRare": 3}"#);
}

#[test]
fn test_trailing_text_after_payload_is_not_an_event() {
    let log = "<== PlayerInventory.GetPlayerCardsV3 {\"1\": 2} trailing words\n\
               <== PlayerInventory.GetPlayerCardsV3 {\"1\": 3}\n";
    let events = scan_all(log);

    assert_eq!(events.len(), 2);
    assert_eq!(events[1].payload(), r#"{"1": 3}"#);
}

#[test]
fn test_consecutive_events_without_duplicates() {
    let log = "<== PlayerInventory.GetPlayerCardsV3\n{\"1\": 1}\n\
               <== PlayerInventory.GetPlayerCardsV3\n{\n\"1\": 2\n}\n\
               [UnityCrossThreadLogger]Incoming Inventory.Updated {\"context\": \"Booster.Open\", \"updates\": []}\n";
    let events = scan_all(log);

    let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Collection,
            EventKind::Collection,
            EventKind::InventoryUpdate
        ]
    );
    assert_eq!(parsed(&events[1]), serde_json::json!({"1": 2}));
}

#[test]
fn test_last_line_without_newline() {
    let log = "noise\n<== PlayerInventory.GetPlayerCardsV3 {\"9\": 4}";
    let events = scan_all(log);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].payload(), r#"{"9": 4}"#);
}

#[test]
fn test_offset_points_at_opening_brace() {
    let log = "abc\n<== PlayerInventory.GetPlayerCardsV3 {\"9\": 4}\n";
    let events = scan_all(log);

    let expected = log.find('{').unwrap() as u64;
    assert_eq!(events[0].offset, expected);
}

#[test]
fn test_malformed_payload_stops_scan() {
    let log = "<== PlayerInventory.GetPlayerCardsV3 {\"1\": ]\n\
               <== PlayerInventory.GetPlayerCardsV3 {\"1\": 1}\n";
    let prefixes = EventPrefixes::default();
    let mut scanner = MessageScanner::new(Cursor::new(log.as_bytes()), &prefixes);

    match scanner.next() {
        Some(Err(AssistantError::MalformedPayload { kind, offset, .. })) => {
            assert_eq!(kind, EventKind::Collection);
            assert_eq!(offset, log.find('{').unwrap() as u64);
        }
        other => panic!("expected malformed payload error, got {:?}", other),
    }
    assert!(scanner.next().is_none());
}

#[test]
fn test_truncated_payload_is_malformed() {
    let log = "<== PlayerInventory.GetPlayerCardsV3 {\"1\": 1,\n\"2\":";
    let prefixes = EventPrefixes::default();
    let result: Result<Vec<_>> =
        MessageScanner::new(Cursor::new(log.as_bytes()), &prefixes).collect();

    assert!(matches!(
        result,
        Err(AssistantError::MalformedPayload { .. })
    ));
}

#[test]
fn test_missing_payload_at_end_of_input() {
    let log = "x\n<== PlayerInventory.GetPlayerCardsV3(1)\nno json here\n";
    let prefixes = EventPrefixes::default();
    let result: Result<Vec<_>> =
        MessageScanner::new(Cursor::new(log.as_bytes()), &prefixes).collect();

    match result {
        Err(AssistantError::MissingPayload { kind, offset }) => {
            assert_eq!(kind, EventKind::Collection);
            assert_eq!(offset, 2);
        }
        other => panic!("expected missing payload error, got {:?}", other),
    }
}

#[test]
fn test_read_error_is_propagated() {
    let reader = io::BufReader::new(FailingReader {
        data: Cursor::new(b"line one\nline two".to_vec()),
    });
    let prefixes = EventPrefixes::default();
    let result: Result<Vec<_>> = MessageScanner::new(reader, &prefixes).collect();

    match result {
        Err(AssistantError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_read_error_inside_payload_is_io_error() {
    let reader = io::BufReader::new(FailingReader {
        data: Cursor::new(b"<== PlayerInventory.GetPlayerCardsV3 {\"1\":\n 2".to_vec()),
    });
    let prefixes = EventPrefixes::default();
    let result: Result<Vec<_>> = MessageScanner::new(reader, &prefixes).collect();

    assert!(matches!(result, Err(AssistantError::Io(_))));
}

#[test]
fn test_restricted_prefixes_ignore_other_kinds() {
    let log = "<== PlayerInventory.GetPlayerInventory {\"wcRare\": 3}\n\
               <== PlayerInventory.GetPlayerCardsV3 {\"1\": 1}\n";
    let prefixes = EventPrefixes::only(&[EventKind::Collection]);
    let events: Vec<LogEvent> = MessageScanner::new(Cursor::new(log.as_bytes()), &prefixes)
        .collect::<Result<_>>()
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Collection);
}

#[test]
fn test_custom_prefix_longest_match_wins() {
    let prefixes = EventPrefixes::empty()
        .with(EventKind::InventorySnapshot, "EVT")
        .with(EventKind::InventoryUpdate, "EVT.Update");

    assert_eq!(
        prefixes.match_line(b"EVT.Update {}"),
        Some((EventKind::InventoryUpdate, 10))
    );
    assert_eq!(
        prefixes.match_line(b"EVT {}"),
        Some((EventKind::InventorySnapshot, 3))
    );
    assert_eq!(prefixes.match_line(b"OTHER {}"), None);
}

#[test]
fn test_with_replaces_prefix_for_kind() {
    let prefixes = EventPrefixes::default().with(EventKind::Collection, "CARDS");

    assert_eq!(prefixes.prefix(EventKind::Collection), Some("CARDS"));
    assert_eq!(
        prefixes.prefix(EventKind::InventorySnapshot),
        Some(INVENTORY_PREFIX)
    );
    assert_eq!(prefixes.match_line(COLLECTION_PREFIX.as_bytes()), None);
}

#[test]
fn test_brace_in_prefix_tail_before_payload() {
    // Only text after the prefix is searched, and the first brace starts the document
    let prefixes = EventPrefixes::empty().with(EventKind::Collection, "{cards}");
    let log = "{cards} {\"3\": 1}\n";
    let events: Vec<LogEvent> = MessageScanner::new(Cursor::new(log.as_bytes()), &prefixes)
        .collect::<Result<_>>()
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].payload(), r#"{"3": 1}"#);
}
