// src/extractors/mod.rs
pub mod boundary;
pub mod section;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use boundary::{BoundaryMatch, BoundaryPattern, MatchSet};
#[allow(unused_imports)]
pub use section::{SectionKind, SectionRecord, SectionResolver};
