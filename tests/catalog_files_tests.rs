use mtga_assistant::catalog::{find_resource_files, open_catalog};
use mtga_assistant::{AssistantError, Rarity};
use std::fs;
use tempfile::TempDir;

// Test fixtures - resource files as shipped in MTGA_Data/Downloads/Data

fn create_cards_content() -> &'static str {
    r#"[
        {"grpid": 69012, "titleId": 100, "CollectorNumber": "97", "set": "ELD", "rarity": 5, "castingcost": "o3oGoG", "types": [2], "subtypes": [55]},
        {"grpid": 70001, "titleId": 101, "CollectorNumber": "15", "set": "THB", "rarity": 2, "castingcost": "oU", "types": [1]},
        {"grpid": 70002, "titleId": 101, "CollectorNumber": "15", "set": "THB", "rarity": 2, "castingcost": "oU", "types": [1]}
    ]"#
}

fn create_texts_content() -> &'static str {
    r#"[
        {"langkey": "EN", "keys": [
            {"id": 100, "text": "Questing Beast"},
            {"id": 101, "text": "Omen of the Sea"}
        ]},
        {"langkey": "DE", "keys": [
            {"id": 100, "text": "Questbestie"},
            {"id": 101, "text": "Omen des Meeres"}
        ]}
    ]"#
}

fn create_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("data_cards_4f1c2e.mtga"), create_cards_content()).unwrap();
    fs::write(dir.path().join("data_loc_9a8b7c.mtga"), create_texts_content()).unwrap();
    fs::write(dir.path().join("data_abilities_123.mtga"), "[]").unwrap();
    dir
}

#[test]
fn test_find_resource_files() {
    let dir = create_data_dir();
    let files = find_resource_files(dir.path()).unwrap();

    assert_eq!(files.cards, dir.path().join("data_cards_4f1c2e.mtga"));
    assert_eq!(files.texts, dir.path().join("data_loc_9a8b7c.mtga"));
}

#[test]
fn test_open_catalog() {
    let dir = create_data_dir();
    let catalog = open_catalog(dir.path(), "EN").unwrap();

    assert_eq!(catalog.len(), 3);
    let beast = catalog.get(69012).unwrap();
    assert_eq!(beast.name, "Questing Beast");
    assert_eq!(beast.rarity(), Rarity::Mythic);
    assert_eq!(catalog.by_name("Omen of the Sea").len(), 2);
}

#[test]
fn test_open_catalog_other_language() {
    let dir = create_data_dir();
    let catalog = open_catalog(dir.path(), "DE").unwrap();

    assert_eq!(catalog.get(69012).unwrap().name, "Questbestie");
    assert!(catalog.by_name("Questing Beast").is_empty());
}

#[test]
fn test_missing_resource_files() {
    let dir = TempDir::new().unwrap();
    let result = find_resource_files(dir.path());

    assert!(matches!(result, Err(AssistantError::ResourceFiles(_))));
}

#[test]
fn test_multiple_cards_files() {
    let dir = create_data_dir();
    fs::write(dir.path().join("data_cards_000000.mtga"), "[]").unwrap();

    let result = find_resource_files(dir.path());
    assert!(matches!(result, Err(AssistantError::ResourceFiles(ref msg)) if msg.contains("more than one")));
}

#[test]
fn test_corrupt_cards_file() {
    let dir = create_data_dir();
    fs::write(dir.path().join("data_cards_4f1c2e.mtga"), "{ not json").unwrap();

    let result = open_catalog(dir.path(), "EN");
    assert!(matches!(
        result,
        Err(AssistantError::ResourceParse { table: "cards", .. })
    ));
}
