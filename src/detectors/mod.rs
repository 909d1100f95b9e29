/*!
# Duplicate Detectors

Three independent passes over the same split document:

- [`ExactDuplicateDetector`] - identical lines after trim + lowercase
- [`SimilarityDetector`] - Levenshtein near-duplicates
- [`RedundancyDetector`] - repeated Markdown headers / YAML keys

Each detector is a pure function of its input lines.
*/

pub mod exact;
pub mod redundancy;
pub mod similarity;

pub use exact::{ExactDuplicateDetector, MIN_EXACT_LENGTH};
pub use redundancy::RedundancyDetector;
pub use similarity::{levenshtein, SimilarityDetector, MIN_SIMILARITY_LENGTH};

use crate::analyzer::{DuplicateEntry, DuplicateKind};
use crate::core::SourceLines;

/// A single detection pass
pub trait Detector {
    /// Kind of entries this detector emits
    fn kind(&self) -> DuplicateKind;

    /// Runs the pass; entry ids are numbered from 1 within the pass
    fn detect(&self, lines: &SourceLines<'_>) -> Vec<DuplicateEntry>;
}
