/*!
# Batch Analysis

Analyzes many independent documents in parallel. Documents share nothing
but the read-only configuration, so each one runs on its own rayon task.
*/

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use super::{AnalysisResult, DuplicateAnalyzer};
use crate::config::AnalyzerConfig;
use crate::core::{is_supported_document, read_document, FileType};

/// Analysis of one file in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub result: AnalysisResult,
}

/// Results for a batch of files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub files: Vec<FileAnalysis>,
    /// Files that could not be read, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total_entries(&self) -> usize {
        self.files.iter().map(|f| f.result.duplicates.len()).sum()
    }

    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.result.total_lines).sum()
    }

    pub fn duplicate_lines(&self) -> usize {
        self.files.iter().map(|f| f.result.duplicate_lines).sum()
    }

    pub fn files_with_duplicates(&self) -> usize {
        self.files.iter().filter(|f| f.result.has_duplicates()).count()
    }
}

/// Collects supported documents under `root`.
///
/// A file path is returned as-is when it has a supported extension.
pub fn collect_documents(root: &Path, recursive: bool) -> Vec<PathBuf> {
    if root.is_file() {
        return if is_supported_document(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let walker = if recursive {
        WalkDir::new(root)
    } else {
        WalkDir::new(root).max_depth(1)
    };

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_supported_document(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Analyzes every path in parallel.
///
/// The file type comes from `forced_type` when given, otherwise from each
/// file's extension. Output order matches input order.
pub fn analyze_paths(
    paths: &[PathBuf],
    config: &AnalyzerConfig,
    forced_type: Option<FileType>,
) -> BatchReport {
    let started = Instant::now();

    let outcomes: Vec<Result<FileAnalysis, (PathBuf, String)>> = paths
        .par_iter()
        .map(|path| -> Result<FileAnalysis, (PathBuf, String)> {
            let file_type = match forced_type {
                Some(ft) => ft,
                None => FileType::from_path(path).map_err(|e| (path.clone(), e.to_string()))?,
            };
            let content = read_document(path).map_err(|e| (path.clone(), e.to_string()))?;
            let result = DuplicateAnalyzer::from_config(file_type, config).analyze(&content);
            Ok(FileAnalysis {
                path: path.clone(),
                result,
            })
        })
        .collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(analysis) => report.files.push(analysis),
            Err((path, reason)) => {
                tracing::warn!("Skipping {}: {}", path.display(), reason);
                report.skipped.push((path, reason));
            }
        }
    }

    tracing::info!(
        "Analyzed {} files ({} skipped) in {:.2?}",
        report.files.len(),
        report.skipped.len(),
        started.elapsed()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_documents_filters_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "x").unwrap();
        fs::write(dir.path().join("b.yaml"), "x").unwrap();
        fs::write(dir.path().join("c.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/d.yml"), "x").unwrap();

        let flat = collect_documents(dir.path(), false);
        assert_eq!(flat.len(), 2);

        let deep = collect_documents(dir.path(), true);
        assert_eq!(deep.len(), 3);
        assert!(deep.iter().any(|p| p.ends_with("nested/d.yml")));
    }

    #[test]
    fn test_analyze_paths_preserves_order_and_skips_missing() {
        let dir = TempDir::new().unwrap();
        let md = dir.path().join("doc.md");
        let yaml = dir.path().join("conf.yaml");
        fs::write(&md, "# Title\n\n# Title\n").unwrap();
        fs::write(&yaml, "name: a\nname: b\n").unwrap();
        let missing = dir.path().join("missing.md");

        let report = analyze_paths(
            &[md.clone(), missing.clone(), yaml.clone()],
            &AnalyzerConfig::default(),
            None,
        );

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[0].path, md);
        assert_eq!(report.files[1].path, yaml);
        assert_eq!(report.files[1].result.file_type, FileType::Yaml);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, missing);
        assert_eq!(report.files_with_duplicates(), 2);
    }
}
