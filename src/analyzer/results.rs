/*!
# Analysis Results

Structures produced by one analysis run. They are plain data: built once by
[`DuplicateAnalyzer`](super::DuplicateAnalyzer), consumed by reporters and by
the deduplication applier, never mutated in between.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{FileType, LineNumber, SimilarityThreshold};

/// Kind of a detected duplicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKind {
    /// Lines identical after trim and case folding
    Exact,
    /// Lines within the similarity threshold
    Similar,
    /// Repeated Markdown header text or YAML key
    Redundant,
}

impl DuplicateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateKind::Exact => "exact",
            DuplicateKind::Similar => "similar",
            DuplicateKind::Redundant => "redundant",
        }
    }
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected duplicate, similar or redundant unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    /// Unique within one analysis run, `<kind>-<n>`
    pub id: String,
    /// Normalized text of the representative line or key
    pub content: String,
    pub occurrences: usize,
    /// Lines where the content (or a similar variant) appears
    pub locations: Vec<LineNumber>,
    pub kind: DuplicateKind,
    /// Reported certainty, 0-100
    pub confidence: u8,
}

impl DuplicateEntry {
    /// Builds an entry; `ordinal` is the 1-based position among entries of the same kind.
    pub fn new(
        kind: DuplicateKind,
        ordinal: usize,
        content: impl Into<String>,
        locations: Vec<LineNumber>,
        confidence: u8,
    ) -> Self {
        Self {
            id: format!("{}-{}", kind, ordinal),
            content: content.into(),
            occurrences: locations.len(),
            locations,
            kind,
            confidence,
        }
    }

    /// Lines that would be dropped when this entry is applied.
    pub fn redundant_occurrences(&self) -> usize {
        self.occurrences.saturating_sub(1)
    }

    /// Locations rendered as `Line N` labels
    pub fn location_labels(&self) -> Vec<String> {
        self.locations.iter().map(|l| l.to_string()).collect()
    }
}

impl fmt::Display for DuplicateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} x{} ({}%): {}",
            self.id,
            self.kind,
            self.occurrences,
            self.confidence,
            self.content
        )
    }
}

/// Full report for one input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_type: FileType,
    pub similarity_threshold: SimilarityThreshold,
    /// Non-blank lines in the input
    pub total_lines: usize,
    /// `total_lines - duplicate_lines`; negative when overlapping groups overcount
    pub unique_lines: i64,
    pub duplicate_lines: usize,
    pub redundant_sections: usize,
    /// Exact entries first, then similar, then redundant
    pub duplicates: Vec<DuplicateEntry>,
    pub suggestions: Vec<String>,
    /// Percentage of lines that deduplication would remove
    pub estimated_reduction: u32,
}

impl AnalysisResult {
    /// Result for input with no non-blank lines.
    pub fn empty(file_type: FileType, similarity_threshold: SimilarityThreshold) -> Self {
        Self {
            file_type,
            similarity_threshold,
            total_lines: 0,
            unique_lines: 0,
            duplicate_lines: 0,
            redundant_sections: 0,
            duplicates: Vec::new(),
            suggestions: Vec::new(),
            estimated_reduction: 0,
        }
    }

    /// Derives the summary counters from the entry list.
    pub fn from_entries(
        file_type: FileType,
        similarity_threshold: SimilarityThreshold,
        total_lines: usize,
        duplicates: Vec<DuplicateEntry>,
        suggestions: Vec<String>,
    ) -> Self {
        let duplicate_lines: usize = duplicates
            .iter()
            .map(DuplicateEntry::redundant_occurrences)
            .sum();
        let redundant_sections = duplicates
            .iter()
            .filter(|d| d.kind == DuplicateKind::Redundant)
            .count();
        let estimated_reduction = if total_lines > 0 {
            (duplicate_lines as f64 / total_lines as f64 * 100.0).round() as u32
        } else {
            0
        };

        Self {
            file_type,
            similarity_threshold,
            total_lines,
            unique_lines: total_lines as i64 - duplicate_lines as i64,
            duplicate_lines,
            redundant_sections,
            duplicates,
            suggestions,
            estimated_reduction,
        }
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    pub fn entries_of(&self, kind: DuplicateKind) -> impl Iterator<Item = &DuplicateEntry> {
        self.duplicates.iter().filter(move |d| d.kind == kind)
    }

    pub fn count_of(&self, kind: DuplicateKind) -> usize {
        self.entries_of(kind).count()
    }

    pub fn find(&self, id: &str) -> Option<&DuplicateEntry> {
        self.duplicates.iter().find(|d| d.id == id)
    }
}
