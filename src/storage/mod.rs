// src/storage/mod.rs
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::extractors::section::SectionRecord;
use crate::utils::error::StorageError;

/// Append-only newline-delimited JSON writer for section records.
///
/// Every append is flushed immediately, so a crash partway through a walk
/// loses nothing already written; the partial file up to the last flushed
/// record is valid downstream input.
pub struct RecordWriter {
    path: PathBuf,
    writer: BufWriter<fs::File>,
}

impl RecordWriter {
    /// Creates the output file, truncating a previous run's output.
    /// Missing parent directories are created first.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Serializes one record as a single JSON line and flushes it.
    pub fn append(&mut self, record: &SectionRecord) -> Result<(), StorageError> {
        let line = serde_json::to_string(record)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::section::SectionKind;

    fn sample_record() -> SectionRecord {
        SectionRecord {
            ticker: "MSFT".to_string(),
            section: SectionKind::RiskFactors,
            text: "We face intense competition.".to_string(),
            source_path: "raw/MSFT/10-K/0002/full-submission.txt".to_string(),
        }
    }

    #[test]
    fn test_create_makes_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let nested = dir.path().join("processed/nested/sections.jsonl");

        let writer = RecordWriter::create(&nested).expect("create writer");
        assert_eq!(writer.path(), nested.as_path());
        assert!(nested.exists());
    }

    #[test]
    fn test_appended_lines_parse_back_to_identical_records() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("sections.jsonl");
        let record = sample_record();

        let mut writer = RecordWriter::create(&path).expect("create writer");
        writer.append(&record).expect("append record");
        writer.append(&record).expect("append record");

        let contents = fs::read_to_string(&path).expect("read output");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: SectionRecord = serde_json::from_str(line).expect("parse line");
            assert_eq!(parsed, record);
        }
    }
}
