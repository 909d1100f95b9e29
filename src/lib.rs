/*!
# Dedup Analyzer v1.0

Duplicate and near-duplicate line analyzer for Markdown and YAML
documents, with a deduplication applier that keeps the first occurrence
of every selected group.

## Core Features

- **Exact duplicates** - case-insensitive, whitespace-trimmed line grouping
- **Similar lines** - Levenshtein similarity against a configurable threshold
- **Redundant structure** - repeated Markdown headers and YAML keys
- **Suggestions** - deterministic remediation hints per analysis
- **Deduplication** - removes selected duplicates and validates the result
- **Batch analysis** - parallel processing of whole directory trees

## Architecture

```text
Dedup Analyzer
├── Core        - Errors, file types, thresholds, line numbering
├── Detectors   - Exact, similarity and redundancy passes
├── Analyzer    - Pass orchestration, results, suggestions, batch mode
├── Dedup       - Applier and post-validation
├── Config      - TOML/YAML analyzer settings
├── Reports     - Text and JSON output
└── CLI common  - Logging, output writer, progress
```

## Usage

### CLI
```bash
# Analyze one document
dedup-analyzer analyze README.md

# Analyze a docs tree as JSON
dedup-analyzer analyze ./docs --recursive --format json --output report.json

# Remove the duplicates found in a file
dedup-analyzer apply config.yaml --output config.dedup.yaml

# Write an example configuration
dedup-analyzer init-config --output .dedup-analyzer.toml
```

### Library
```rust
use dedup_analyzer::{analyze, apply_deduplication, FileType, SimilarityThreshold};
use std::collections::HashSet;

let text = "hello world foo\nhello world foo\nunique line here";
let result = analyze(text, FileType::Markdown, SimilarityThreshold::default());
assert_eq!(result.duplicate_lines, 1);

let outcome = apply_deduplication(text, &result.duplicates, &HashSet::new(), FileType::Markdown);
assert_eq!(outcome.output, "hello world foo\nunique line here");
```
*/

pub mod analyzer;
pub mod cli_common;
pub mod config;
pub mod core;
pub mod dedup;
pub mod detectors;
pub mod reports;

// Re-export main types for convenience
pub use analyzer::{
    analyze, analyze_paths, AnalysisPhase, AnalysisResult, BatchReport, DuplicateAnalyzer,
    DuplicateEntry, DuplicateKind, FileAnalysis,
};
pub use config::AnalyzerConfig;
pub use core::{DedupError, DedupResult, FileType, LineNumber, SimilarityThreshold};
pub use dedup::{apply_deduplication, apply_result, DeduplicationOutcome};
pub use reports::{ReportConfig, ReportFormat, ReportManager};

use std::path::Path;

/// Analyze a single document on disk.
///
/// The file type is inferred from the extension.
pub fn analyze_file<P: AsRef<Path>>(
    file_path: P,
    config: &AnalyzerConfig,
) -> DedupResult<AnalysisResult> {
    let path = file_path.as_ref();
    let file_type = FileType::from_path(path)?;
    let content = core::read_document(path)?;
    Ok(DuplicateAnalyzer::from_config(file_type, config).analyze(&content))
}
