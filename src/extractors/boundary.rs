// src/extractors/boundary.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns for Boundary Matching (Lazy Static) ---
// Case-insensitive, tolerant of an optional period after the item number
// and of variable whitespace between tokens. Compiled once at process
// start and shared read-only across workers.
static ITEM_1A_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Item\s+1A\.?\s+Risk\s+Factors").expect("Failed to compile ITEM_1A_START_RE")
});

static ITEM_1B_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Item\s+1B\.?\s+Unresolved").expect("Failed to compile ITEM_1B_START_RE")
});

static ITEM_7_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Item\s+7\.?\s+Management").expect("Failed to compile ITEM_7_START_RE")
});

static ITEM_7A_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Item\s+7A\.?\s+Quantitative").expect("Failed to compile ITEM_7A_START_RE")
});

/// The section-start markers recognized in a flattened 10-K.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPattern {
    /// "Item 1A. Risk Factors"
    RiskFactorsStart,
    /// "Item 1B. Unresolved Staff Comments"
    UnresolvedStaffCommentsStart,
    /// "Item 7. Management's Discussion and Analysis..."
    MdaStart,
    /// "Item 7A. Quantitative and Qualitative Disclosures..."
    QuantitativeDisclosuresStart,
}

impl BoundaryPattern {
    /// Every pattern, in scan order.
    pub const ALL: [BoundaryPattern; 4] = [
        BoundaryPattern::RiskFactorsStart,
        BoundaryPattern::UnresolvedStaffCommentsStart,
        BoundaryPattern::MdaStart,
        BoundaryPattern::QuantitativeDisclosuresStart,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            BoundaryPattern::RiskFactorsStart => &ITEM_1A_START_RE,
            BoundaryPattern::UnresolvedStaffCommentsStart => &ITEM_1B_START_RE,
            BoundaryPattern::MdaStart => &ITEM_7_START_RE,
            BoundaryPattern::QuantitativeDisclosuresStart => &ITEM_7A_START_RE,
        }
    }
}

/// One boundary occurrence: the matched byte range in the flattened text.
///
/// Match boundaries come from the regex engine, so they are always valid
/// slice positions in the string that was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryMatch {
    pub start: usize,
    pub end: usize,
}

/// Every occurrence of every boundary pattern in one document, in
/// position order per pattern. Built fresh per document.
///
/// Filings routinely repeat each section header in a table of contents
/// near the top, so keeping every occurrence (not just the first) is what
/// lets the resolver pick the real section body later.
#[derive(Debug, Default)]
pub struct MatchSet {
    risk_factors_start: Vec<BoundaryMatch>,
    unresolved_staff_comments_start: Vec<BoundaryMatch>,
    mda_start: Vec<BoundaryMatch>,
    quantitative_disclosures_start: Vec<BoundaryMatch>,
}

impl MatchSet {
    /// Scans the flattened text for every occurrence of every pattern.
    pub fn scan(text: &str) -> Self {
        let mut set = MatchSet::default();
        for pattern in BoundaryPattern::ALL {
            *set.slot_mut(pattern) = pattern
                .regex()
                .find_iter(text)
                .map(|m| BoundaryMatch {
                    start: m.start(),
                    end: m.end(),
                })
                .collect();
        }
        set
    }

    /// All occurrences of one pattern, ordered by position.
    pub fn matches(&self, pattern: BoundaryPattern) -> &[BoundaryMatch] {
        match pattern {
            BoundaryPattern::RiskFactorsStart => &self.risk_factors_start,
            BoundaryPattern::UnresolvedStaffCommentsStart => &self.unresolved_staff_comments_start,
            BoundaryPattern::MdaStart => &self.mda_start,
            BoundaryPattern::QuantitativeDisclosuresStart => &self.quantitative_disclosures_start,
        }
    }

    /// The final occurrence of one pattern, if any.
    pub fn last(&self, pattern: BoundaryPattern) -> Option<BoundaryMatch> {
        self.matches(pattern).last().copied()
    }

    fn slot_mut(&mut self, pattern: BoundaryPattern) -> &mut Vec<BoundaryMatch> {
        match pattern {
            BoundaryPattern::RiskFactorsStart => &mut self.risk_factors_start,
            BoundaryPattern::UnresolvedStaffCommentsStart => {
                &mut self.unresolved_staff_comments_start
            }
            BoundaryPattern::MdaStart => &mut self.mda_start,
            BoundaryPattern::QuantitativeDisclosuresStart => {
                &mut self.quantitative_disclosures_start
            }
        }
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive() {
        let set = MatchSet::scan("ITEM 1A. RISK FACTORS and item 7. management's discussion");
        assert_eq!(set.matches(BoundaryPattern::RiskFactorsStart).len(), 1);
        assert_eq!(set.matches(BoundaryPattern::MdaStart).len(), 1);
    }

    #[test]
    fn test_period_after_item_number_is_optional() {
        let with_period = MatchSet::scan("Item 1A. Risk Factors");
        let without_period = MatchSet::scan("Item 1A Risk Factors");
        assert_eq!(with_period.matches(BoundaryPattern::RiskFactorsStart).len(), 1);
        assert_eq!(without_period.matches(BoundaryPattern::RiskFactorsStart).len(), 1);
    }

    #[test]
    fn test_every_occurrence_is_kept_in_order() {
        let text = "Item 1A. Risk Factors (see page 12) ... Item 1A. Risk Factors We face risks.";
        let set = MatchSet::scan(text);
        let found = set.matches(BoundaryPattern::RiskFactorsStart);
        assert_eq!(found.len(), 2);
        assert!(found[0].start < found[1].start);
        assert_eq!(set.last(BoundaryPattern::RiskFactorsStart), Some(found[1]));
    }

    #[test]
    fn test_item_7a_does_not_match_item_7() {
        let set = MatchSet::scan("Item 7A. Quantitative and Qualitative Disclosures About Market Risk");
        assert_eq!(set.matches(BoundaryPattern::MdaStart).len(), 0);
        assert_eq!(set.matches(BoundaryPattern::QuantitativeDisclosuresStart).len(), 1);
    }

    #[test]
    fn test_absent_patterns_yield_empty_match_lists() {
        let set = MatchSet::scan("No item headers in this text at all.");
        for pattern in BoundaryPattern::ALL {
            assert!(set.matches(pattern).is_empty());
            assert_eq!(set.last(pattern), None);
        }
    }
}
