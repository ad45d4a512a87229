//! Loading and saving fixed-column catalog files.

use partdex::catalog::{load_catalog, save_catalog, LoadReport, PAYLOAD_MAX, PAYLOAD_OFFSET};
use partdex::{PartIndex, Record};

fn line(key: &str, payload: &str) -> String {
    format!("{key:<7}        {payload}")
}

#[test]
fn load_parses_fixed_columns_and_skips_junk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parts.txt");
    let contents = [
        line("A-100", "hex bolt M6"),
        String::new(),
        line("A-200", "washer, flat"),
        "       ".to_string(),
        line("A-100", "duplicate of the first line"),
        line("A-300", "cotter pin"),
    ]
    .join("\n");
    std::fs::write(&path, contents).unwrap();

    let mut index = PartIndex::new();
    let report = load_catalog(&path, &mut index).unwrap();

    assert_eq!(report, LoadReport { loaded: 3, skipped: 3 });
    assert_eq!(index.record_count(), 3);
    assert_eq!(index.search("A-100").unwrap().payload, "hex bolt M6");
    assert_eq!(index.search("A-200").unwrap().payload, "washer, flat");
    assert_eq!(index.search("A-300").unwrap().payload, "cotter pin");
}

#[test]
fn save_then_load_round_trips_every_record() {
    let mut index = PartIndex::new();
    for i in 0..120 {
        index
            .insert(Record::new(format!("P-{i:04}"), format!("part number {i}")))
            .unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let written = save_catalog(&path, &index).unwrap();
    assert_eq!(written, 120);

    let mut reloaded = PartIndex::new();
    let report = load_catalog(&path, &mut reloaded).unwrap();
    assert_eq!(report, LoadReport { loaded: 120, skipped: 0 });

    let original: Vec<_> = index.records().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    let round_tripped: Vec<_> = reloaded
        .records()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(original, round_tripped);
}

#[test]
fn saved_lines_are_uniform_width() {
    let mut index = PartIndex::new();
    index.insert(Record::new("X", "short")).unwrap();
    index
        .insert(Record::new("Y-9999", "z".repeat(PAYLOAD_MAX * 2)))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    save_catalog(&path, &index).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    for l in text.lines() {
        assert_eq!(l.len(), PAYLOAD_OFFSET + PAYLOAD_MAX);
    }
}

#[test]
fn loading_into_a_populated_index_skips_existing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parts.txt");
    std::fs::write(&path, [line("A-100", "new"), line("A-200", "new")].join("\n")).unwrap();

    let mut index = PartIndex::new();
    index.insert(Record::new("A-100", "existing")).unwrap();

    let report = load_catalog(&path, &mut index).unwrap();
    assert_eq!(report, LoadReport { loaded: 1, skipped: 1 });
    assert_eq!(index.search("A-100").unwrap().payload, "existing");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut index = PartIndex::new();
    assert!(load_catalog(&dir.path().join("absent.txt"), &mut index).is_err());
}
