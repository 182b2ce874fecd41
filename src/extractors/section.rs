// src/extractors/section.rs

// --- Imports ---
use crate::extractors::boundary::{BoundaryPattern, MatchSet};
use crate::normalize;
use serde::{Deserialize, Serialize};

/// The two canonical 10-K sections this pipeline recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    #[serde(rename = "Item 1A")]
    RiskFactors,
    #[serde(rename = "Item 7")]
    Mda,
}

impl SectionKind {
    pub const ALL: [SectionKind; 2] = [SectionKind::RiskFactors, SectionKind::Mda];

    /// The start/end boundary markers delimiting this section.
    fn boundaries(self) -> (BoundaryPattern, BoundaryPattern) {
        match self {
            SectionKind::RiskFactors => (
                BoundaryPattern::RiskFactorsStart,
                BoundaryPattern::UnresolvedStaffCommentsStart,
            ),
            SectionKind::Mda => (
                BoundaryPattern::MdaStart,
                BoundaryPattern::QuantitativeDisclosuresStart,
            ),
        }
    }

    /// The item label used in output records and diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::RiskFactors => "Item 1A",
            SectionKind::Mda => "Item 7",
        }
    }
}

/// One extracted section. Serialized as a single line of the JSONL
/// output stream; immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub ticker: String,
    pub section: SectionKind,
    pub text: String,
    pub source_path: String,
}

// --- Resolver ---
pub struct SectionResolver;

impl SectionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolves every target section of one document, yielding zero, one,
    /// or two records. A section whose markers are missing or out of
    /// order contributes no record; that is a structural property of the
    /// filing, not an error.
    pub fn resolve_all(
        &self,
        text: &str,
        matches: &MatchSet,
        ticker: &str,
        source_path: &str,
    ) -> Vec<SectionRecord> {
        SectionKind::ALL
            .iter()
            .filter_map(|&kind| {
                self.resolve(kind, text, matches).map(|body| SectionRecord {
                    ticker: ticker.to_string(),
                    section: kind,
                    text: body,
                    source_path: source_path.to_string(),
                })
            })
            .collect()
    }

    /// Applies the last-match policy for one section kind.
    ///
    /// The table of contents repeats every section header near the top of
    /// the document, so the *last* occurrence of each marker is taken as
    /// the real one: section start = end of the last start-marker match,
    /// section end = start of the last end-marker match. Behavioral
    /// compatibility requires exactly these semantics, not first-match
    /// and not nearest-pair.
    fn resolve(&self, kind: SectionKind, text: &str, matches: &MatchSet) -> Option<String> {
        let (start_pattern, end_pattern) = kind.boundaries();
        let start = matches.last(start_pattern)?.end;
        let end = matches.last(end_pattern)?.start;

        if start >= end {
            tracing::debug!(
                "Markers for {} out of order (start {} >= end {}), skipping section",
                kind.label(),
                start,
                end
            );
            return None;
        }

        // Slicing can leave a space on either edge; collapsing is
        // idempotent on already-normalized text.
        let body = normalize::collapse_whitespace(&text[start..end]);
        if body.is_empty() {
            return None;
        }
        Some(body)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> Vec<SectionRecord> {
        let matches = MatchSet::scan(text);
        SectionResolver::new().resolve_all(text, &matches, "TST", "a/b/c/filing.txt")
    }

    #[test]
    fn test_last_match_skips_table_of_contents_reference() {
        // The first Item 1A occurrence is a ToC entry; the real section
        // body follows the last one.
        let text = "Table of Contents Item 1A. Risk Factors ... body ... \
                    Item 1A Risk Factors We face risks X. \
                    Item 1B. Unresolved Staff Comments None.";
        let records = resolve(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].section, SectionKind::RiskFactors);
        assert_eq!(records[0].text, "We face risks X.");
        assert_eq!(records[0].ticker, "TST");
    }

    #[test]
    fn test_missing_end_marker_emits_nothing() {
        let text = "Item 1A. Risk Factors We face risks but nothing ends the section.";
        assert!(resolve(text).is_empty());
        // Re-running resolution is idempotent: still zero records.
        assert!(resolve(text).is_empty());
    }

    #[test]
    fn test_out_of_order_markers_emit_nothing() {
        let text = "Item 1B. Unresolved Staff Comments None. Item 1A. Risk Factors trailing.";
        assert!(resolve(text).is_empty());
    }

    #[test]
    fn test_mda_resolution_is_symmetric() {
        let text = "Item 7. Management Discussion follows here. \
                    Item 7A. Quantitative and Qualitative Disclosures";
        let records = resolve(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].section, SectionKind::Mda);
        assert_eq!(records[0].text, "Discussion follows here.");
    }

    #[test]
    fn test_both_sections_resolve_independently() {
        let text = "Item 1A. Risk Factors Risks here. \
                    Item 1B. Unresolved Staff Comments None. \
                    Item 7. Management narrative here. \
                    Item 7A. Quantitative disclosures.";
        let records = resolve(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].section, SectionKind::RiskFactors);
        assert!(records[0].text.starts_with("Risks here."));
        assert_eq!(records[1].section, SectionKind::Mda);
        assert_eq!(records[1].text, "narrative here.");
    }

    #[test]
    fn test_section_kind_serializes_as_item_label() {
        assert_eq!(
            serde_json::to_string(&SectionKind::RiskFactors).unwrap(),
            "\"Item 1A\""
        );
        assert_eq!(serde_json::to_string(&SectionKind::Mda).unwrap(), "\"Item 7\"");
    }

    #[test]
    fn test_record_round_trips_through_jsonl() {
        let record = SectionRecord {
            ticker: "AAPL".to_string(),
            section: SectionKind::Mda,
            text: "Net sales increased.".to_string(),
            source_path: "data/raw/sec-edgar-filings/AAPL/10-K/0001/full-submission.txt"
                .to_string(),
        };

        let line = serde_json::to_string(&record).unwrap();
        let parsed: SectionRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }
}
