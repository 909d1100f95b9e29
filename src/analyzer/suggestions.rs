/*!
# Suggestions Engine

Generates remediation hints from the detected entries. Output depends only
on the per-kind counts and the file type, so it is stable across runs.
*/

use super::{DuplicateEntry, DuplicateKind};
use crate::core::FileType;

/// Entry count above which a restructuring hint is added
pub const RESTRUCTURE_THRESHOLD: usize = 10;

/// Engine for generating remediation suggestions
pub struct SuggestionEngine {
    restructure_threshold: usize,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self {
            restructure_threshold: RESTRUCTURE_THRESHOLD,
        }
    }

    pub fn with_restructure_threshold(restructure_threshold: usize) -> Self {
        Self {
            restructure_threshold,
        }
    }

    /// Generate suggestions for the combined entry list
    pub fn generate_suggestions(
        &self,
        duplicates: &[DuplicateEntry],
        file_type: FileType,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        let count = |kind: DuplicateKind| duplicates.iter().filter(|d| d.kind == kind).count();
        let exact = count(DuplicateKind::Exact);
        let similar = count(DuplicateKind::Similar);
        let redundant = count(DuplicateKind::Redundant);

        if exact > 0 {
            suggestions.push(format!(
                "Remove {} exact duplicate line group(s) to eliminate repeated content",
                exact
            ));
        }

        if similar > 0 {
            suggestions.push(format!(
                "Review {} group(s) of similar lines and consolidate near-duplicate wording",
                similar
            ));
        }

        if redundant > 0 {
            let hint = match file_type {
                FileType::Markdown => format!(
                    "Merge {} repeated header(s) into single sections",
                    redundant
                ),
                FileType::Yaml => format!(
                    "Check {} repeated key(s) - duplicate keys may override earlier values",
                    redundant
                ),
            };
            suggestions.push(hint);
        }

        if duplicates.len() > self.restructure_threshold {
            suggestions.push(
                "Consider restructuring the document to move shared content into reusable sections"
                    .to_string(),
            );
        }

        suggestions.push(format!(
            "Validate {} syntax after cleanup",
            file_type
        ));
        suggestions.push(
            "Review consolidated sections to make sure the meaning is preserved".to_string(),
        );

        suggestions
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}
