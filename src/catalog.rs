//! Fixed-column catalog files.
//!
//! A catalog line carries the part key in the first seven columns and
//! the description starting at column 15; the gap is padding. Loading
//! is tolerant: blank lines, lines with an empty key field, and keys
//! already present in the index are counted and skipped rather than
//! aborting the whole file.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::IndexError;
use crate::types::{PartIndex, Record};

/// Width of the key field.
pub const KEY_FIELD_WIDTH: usize = 7;
/// Column where the payload field begins.
pub const PAYLOAD_OFFSET: usize = 15;
/// Payloads are clipped to this many characters on save.
pub const PAYLOAD_MAX: usize = 65;

/// Failures while reading or writing a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of a load: how many lines became records, how many were
/// skipped as blank, keyless, or duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Read a catalog file into the index.
pub fn load_catalog(path: &Path, index: &mut PartIndex) -> Result<LoadReport, CatalogError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut report = LoadReport::default();
    for line in reader.lines() {
        let line = line?;
        // Short lines still yield a key if the field is non-empty.
        let key = line
            .get(..KEY_FIELD_WIDTH)
            .unwrap_or(&line)
            .trim()
            .to_string();
        let payload = line.get(PAYLOAD_OFFSET..).unwrap_or("").trim().to_string();

        if key.is_empty() {
            report.skipped += 1;
            continue;
        }
        match index.insert(Record::new(key, payload)) {
            Ok(()) => report.loaded += 1,
            Err(IndexError::DuplicateKey(_)) | Err(IndexError::InvalidKey) => report.skipped += 1,
            Err(IndexError::NotFound(_)) => unreachable!("insert never reports a missing key"),
        }
    }
    Ok(report)
}

/// Write every record to `path` in catalog format, ascending by key.
/// Returns the number of lines written.
pub fn save_catalog(path: &Path, index: &PartIndex) -> Result<usize, CatalogError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let mut written = 0;
    for (key, payload) in index.records() {
        let clipped: String = payload.chars().take(PAYLOAD_MAX).collect();
        writeln!(
            writer,
            "{key:<key_w$}{:pad$}{clipped:<payload_w$}",
            "",
            key_w = KEY_FIELD_WIDTH,
            pad = PAYLOAD_OFFSET - KEY_FIELD_WIDTH,
            payload_w = PAYLOAD_MAX,
        )?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_line_yields_key_and_empty_payload() {
        let mut index = PartIndex::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.txt");
        std::fs::write(&path, "P-1\n").unwrap();

        let report = load_catalog(&path, &mut index).unwrap();
        assert_eq!(report, LoadReport { loaded: 1, skipped: 0 });
        assert_eq!(index.search("P-1").unwrap().payload, "");
    }

    #[test]
    fn saved_lines_have_fixed_columns() {
        let mut index = PartIndex::new();
        index.insert(Record::new("P-1", "washer")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        save_catalog(&path, &index).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let line = text.lines().next().unwrap();
        assert_eq!(line.len(), PAYLOAD_OFFSET + PAYLOAD_MAX);
        assert!(line.starts_with("P-1    "));
        assert_eq!(&line[PAYLOAD_OFFSET..PAYLOAD_OFFSET + 6], "washer");
    }

    #[test]
    fn long_payloads_are_clipped_on_save() {
        let mut index = PartIndex::new();
        index
            .insert(Record::new("P-1", "x".repeat(PAYLOAD_MAX + 20)))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        save_catalog(&path, &index).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let line = text.lines().next().unwrap();
        assert_eq!(&line[PAYLOAD_OFFSET..], "x".repeat(PAYLOAD_MAX));
    }
}
