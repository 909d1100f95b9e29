/*!
# Deduplication

Builds a deduplicated document from an analysis. For every selected entry
the first location is kept and the other locations are dropped; all other
lines are emitted unchanged, in their original order.

Removal uses set semantics. When a line belongs to several entries the
first entry that lists it as a non-first location removes it, even if another
entry would have kept it.
*/

pub mod validation;

pub use validation::validate_structure;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::analyzer::{AnalysisResult, DuplicateEntry};
use crate::core::{FileType, LineNumber, SourceLines};

/// Output of [`apply_deduplication`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeduplicationOutcome {
    pub output: String,
    /// Non-fatal structural warnings about `output`
    pub warnings: Vec<String>,
    pub removed_lines: Vec<LineNumber>,
}

impl DeduplicationOutcome {
    pub fn removed_count(&self) -> usize {
        self.removed_lines.len()
    }
}

/// Lines that applying `selected_ids` would drop.
///
/// An empty selection applies every entry; unknown ids are ignored.
pub fn lines_to_remove(
    duplicates: &[DuplicateEntry],
    selected_ids: &HashSet<String>,
) -> BTreeSet<LineNumber> {
    duplicates
        .iter()
        .filter(|entry| selected_ids.is_empty() || selected_ids.contains(&entry.id))
        .flat_map(|entry| entry.locations.iter().skip(1).copied())
        .collect()
}

/// Removes duplicate lines from `content` and validates the result.
pub fn apply_deduplication(
    content: &str,
    duplicates: &[DuplicateEntry],
    selected_ids: &HashSet<String>,
    file_type: FileType,
) -> DeduplicationOutcome {
    let unknown = selected_ids
        .iter()
        .filter(|id| !duplicates.iter().any(|d| &d.id == *id))
        .count();
    if unknown > 0 {
        tracing::debug!("Ignoring {} unknown entry id(s)", unknown);
    }

    let removed = lines_to_remove(duplicates, selected_ids);
    let lines = SourceLines::new(content);

    let output = lines
        .iter()
        .filter(|(line_no, _)| !removed.contains(line_no))
        .map(|(_, raw)| raw)
        .collect::<Vec<_>>()
        .join("\n");

    let warnings = validate_structure(&output, file_type);
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    // Entries may reference lines past the end if they came from another text
    let removed_lines: Vec<LineNumber> = removed
        .into_iter()
        .filter(|line| matches!(line.index(), Some(i) if i < lines.len()))
        .collect();

    tracing::debug!(
        "Removed {} of {} lines, {} warning(s)",
        removed_lines.len(),
        lines.len(),
        warnings.len()
    );

    DeduplicationOutcome {
        output,
        warnings,
        removed_lines,
    }
}

/// Applies the entries of `result` to the text it was computed from.
pub fn apply_result(
    content: &str,
    result: &AnalysisResult,
    selected_ids: &HashSet<String>,
) -> DeduplicationOutcome {
    apply_deduplication(content, &result.duplicates, selected_ids, result.file_type)
}
