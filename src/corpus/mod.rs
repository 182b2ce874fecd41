// src/corpus/mod.rs

// --- Imports ---
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::extractors::boundary::MatchSet;
use crate::extractors::section::{SectionRecord, SectionResolver};
use crate::normalize;
use crate::storage::RecordWriter;
use crate::utils::error::{AppError, NormalizeError};

// --- Constants ---
/// Ticker used when a path is too shallow to carry one. The document's
/// text is still extracted; only its provenance is unattributed.
pub const UNKNOWN_TICKER: &str = "UNKNOWN";

/// Totals reported as the single end-of-run summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    /// Candidate filings found under the root.
    pub candidates: usize,
    /// Candidates that normalized successfully.
    pub processed: usize,
    /// Section records appended to the output stream.
    pub records: usize,
}

/// Walks the downloaded filings tree and runs the per-document pipeline
/// (normalize, locate boundaries, resolve sections) over every candidate.
pub struct CorpusWalker {
    root: PathBuf,
    resolver: SectionResolver,
}

impl CorpusWalker {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            resolver: SectionResolver::new(),
        }
    }

    /// Processes every candidate filing under the root, appending each
    /// resolved section to `writer`.
    ///
    /// Documents are independent, so they are fanned out across the rayon
    /// pool; the output writer is the one shared resource and serializes
    /// appends behind a mutex. Per-file failures are logged and skipped.
    /// A failure to write the output stream aborts the whole walk.
    pub fn run(&self, writer: RecordWriter) -> Result<WalkSummary, AppError> {
        let candidates = self.collect_candidates();
        tracing::info!(
            "Found {} candidate filings under {}",
            candidates.len(),
            self.root.display()
        );

        let progress = ProgressBar::new(candidates.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
                .expect("Failed to compile progress bar template")
                .progress_chars("#>-"),
        );

        let writer = Mutex::new(writer);
        let processed = AtomicUsize::new(0);
        let records = AtomicUsize::new(0);

        candidates
            .par_iter()
            .try_for_each(|path| -> Result<(), AppError> {
                match self.process_document(path) {
                    Ok(found) => {
                        if !found.is_empty() {
                            let mut writer =
                                writer.lock().expect("record writer lock poisoned");
                            for record in &found {
                                writer.append(record)?;
                            }
                        }
                        records.fetch_add(found.len(), Ordering::Relaxed);
                        processed.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", path.display(), e);
                    }
                }
                progress.inc(1);
                Ok(())
            })?;

        progress.finish_and_clear();

        Ok(WalkSummary {
            candidates: candidates.len(),
            processed: processed.into_inner(),
            records: records.into_inner(),
        })
    }

    /// Enumerates candidate filings up front so progress can report
    /// processed vs. total.
    fn collect_candidates(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_candidate(entry.path()))
            .map(|entry| entry.into_path())
            .collect()
    }

    /// Normalize -> locate -> resolve for one filing.
    fn process_document(&self, path: &Path) -> Result<Vec<SectionRecord>, NormalizeError> {
        let ticker = derive_ticker(path);
        let text = normalize::normalize_file(path)?;
        let matches = MatchSet::scan(&text);
        Ok(self
            .resolver
            .resolve_all(&text, &matches, &ticker, &path.display().to_string()))
    }
}

/// A candidate filing is any file with a `.txt` or `.html` extension.
fn is_candidate(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("txt") | Some("html")
    )
}

/// Derives the issuer ticker from the expected
/// `.../{ticker}/{filing-type}/{accession}/{file}` layout: the 4th path
/// component from the end. Shallower paths fall back to [`UNKNOWN_TICKER`]
/// so their text is not silently lost.
fn derive_ticker(path: &Path) -> String {
    let components: Vec<&str> = path.iter().filter_map(|part| part.to_str()).collect();
    if components.len() >= 4 {
        components[components.len() - 4].to_string()
    } else {
        tracing::warn!(
            "Path too shallow to derive a ticker, using {}: {}",
            UNKNOWN_TICKER,
            path.display()
        );
        UNKNOWN_TICKER.to_string()
    }
}
