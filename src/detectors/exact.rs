/*!
# Exact Duplicate Detection

Groups lines that are identical after trimming and case folding.
*/

use std::collections::HashMap;

use super::Detector;
use crate::analyzer::{DuplicateEntry, DuplicateKind};
use crate::core::{char_len, normalize_line, LineNumber, SourceLines};

/// Default minimum trimmed length for a line to take part in exact matching
pub const MIN_EXACT_LENGTH: usize = 10;

/// Detector for lines repeated verbatim (modulo whitespace and case)
pub struct ExactDuplicateDetector {
    min_length: usize,
}

impl ExactDuplicateDetector {
    pub fn new() -> Self {
        Self {
            min_length: MIN_EXACT_LENGTH,
        }
    }

    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for ExactDuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ExactDuplicateDetector {
    fn kind(&self) -> DuplicateKind {
        DuplicateKind::Exact
    }

    fn detect(&self, lines: &SourceLines<'_>) -> Vec<DuplicateEntry> {
        // Groups keep first-appearance order so ids are stable across runs
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<LineNumber>> = HashMap::new();

        for (line_no, raw) in lines.iter() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || char_len(trimmed) < self.min_length {
                continue;
            }
            let normalized = normalize_line(trimmed);
            groups
                .entry(normalized)
                .or_insert_with_key(|key| {
                    order.push(key.clone());
                    Vec::new()
                })
                .push(line_no);
        }

        order
            .into_iter()
            .filter_map(|content| {
                let locations = groups.remove(&content)?;
                (locations.len() > 1).then_some((content, locations))
            })
            .enumerate()
            .map(|(i, (content, locations))| {
                DuplicateEntry::new(DuplicateKind::Exact, i + 1, content, locations, 100)
            })
            .collect()
    }
}
