/*!
# Redundant Structure Detection

Format-aware detection of repeated structural elements:

- **Markdown**: header text repeated across `#`..`######` headers (confidence 95)
- **YAML**: key names repeated anywhere in the document (confidence 90)

YAML keys are tracked in one flat namespace, nesting is ignored. Two
unrelated mappings that both carry a `name:` key are reported together.
*/

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::Detector;
use crate::analyzer::{DuplicateEntry, DuplicateKind};
use crate::core::{FileType, LineNumber, SourceLines};

pub const HEADER_CONFIDENCE: u8 = 95;
pub const KEY_CONFIDENCE: u8 = 90;

static MARKDOWN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,6}\s+(.+)$").expect("valid header regex"));

static YAML_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_-]*)\s*:").expect("valid key regex"));

/// Detector for repeated headers / keys
pub struct RedundancyDetector {
    file_type: FileType,
}

impl RedundancyDetector {
    pub fn new(file_type: FileType) -> Self {
        Self { file_type }
    }

    fn structural_key(&self, line: &str) -> Option<String> {
        let line = line.trim_end_matches('\r');
        match self.file_type {
            FileType::Markdown => MARKDOWN_HEADER
                .captures(line)
                .map(|caps| caps[0].trim_start_matches('#').trim().to_lowercase()),
            FileType::Yaml => YAML_KEY.captures(line).map(|caps| caps[1].to_lowercase()),
        }
    }

    fn confidence(&self) -> u8 {
        match self.file_type {
            FileType::Markdown => HEADER_CONFIDENCE,
            FileType::Yaml => KEY_CONFIDENCE,
        }
    }
}

impl Detector for RedundancyDetector {
    fn kind(&self) -> DuplicateKind {
        DuplicateKind::Redundant
    }

    fn detect(&self, lines: &SourceLines<'_>) -> Vec<DuplicateEntry> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<LineNumber>> = HashMap::new();

        for (line_no, raw) in lines.iter() {
            let Some(key) = self.structural_key(raw) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            groups
                .entry(key)
                .or_insert_with_key(|k| {
                    order.push(k.clone());
                    Vec::new()
                })
                .push(line_no);
        }

        let confidence = self.confidence();
        order
            .into_iter()
            .filter_map(|key| {
                let locations = groups.remove(&key)?;
                (locations.len() > 1).then_some((key, locations))
            })
            .enumerate()
            .map(|(i, (key, locations))| {
                DuplicateEntry::new(DuplicateKind::Redundant, i + 1, key, locations, confidence)
            })
            .collect()
    }
}
