/*!
# Duplicate Analyzer

Runs the detection passes over one document and assembles an
[`AnalysisResult`].

```text
read input ─▶ exact pass ─▶ similarity pass ─▶ redundancy pass ─▶ suggestions
```

The analyzer holds only configuration; every call works on its own
borrowed input, so one analyzer can be shared across threads (see
[`batch`]).
*/

pub mod batch;
pub mod results;
pub mod suggestions;

pub use batch::{analyze_paths, BatchReport, FileAnalysis};
pub use results::{AnalysisResult, DuplicateEntry, DuplicateKind};
pub use suggestions::SuggestionEngine;

use std::fmt;
use std::time::Instant;

use crate::config::AnalyzerConfig;
use crate::core::{FileType, SimilarityThreshold, SourceLines};
use crate::detectors::{
    Detector, ExactDuplicateDetector, RedundancyDetector, SimilarityDetector, MIN_EXACT_LENGTH,
    MIN_SIMILARITY_LENGTH,
};

/// Stage of an analysis, reported to progress callbacks before it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    ReadInput,
    ExactPass,
    SimilarityPass,
    RedundancyPass,
    Suggestions,
}

impl AnalysisPhase {
    pub const ALL: [AnalysisPhase; 5] = [
        AnalysisPhase::ReadInput,
        AnalysisPhase::ExactPass,
        AnalysisPhase::SimilarityPass,
        AnalysisPhase::RedundancyPass,
        AnalysisPhase::Suggestions,
    ];
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnalysisPhase::ReadInput => "Reading input",
            AnalysisPhase::ExactPass => "Finding exact duplicates",
            AnalysisPhase::SimilarityPass => "Finding similar lines",
            AnalysisPhase::RedundancyPass => "Checking structure",
            AnalysisPhase::Suggestions => "Generating suggestions",
        };
        f.write_str(label)
    }
}

/// Duplicate analyzer for a single document format
#[derive(Debug, Clone)]
pub struct DuplicateAnalyzer {
    file_type: FileType,
    threshold: SimilarityThreshold,
    min_exact_length: usize,
    min_similarity_length: usize,
    enable_similarity: bool,
    restructure_threshold: usize,
}

impl DuplicateAnalyzer {
    /// Analyzer with default length gates
    pub fn new(file_type: FileType, threshold: SimilarityThreshold) -> Self {
        Self {
            file_type,
            threshold,
            min_exact_length: MIN_EXACT_LENGTH,
            min_similarity_length: MIN_SIMILARITY_LENGTH,
            enable_similarity: true,
            restructure_threshold: suggestions::RESTRUCTURE_THRESHOLD,
        }
    }

    /// Analyzer configured from an [`AnalyzerConfig`]
    pub fn from_config(file_type: FileType, config: &AnalyzerConfig) -> Self {
        Self {
            file_type,
            threshold: config.similarity_threshold,
            min_exact_length: config.min_exact_length,
            min_similarity_length: config.min_similarity_length,
            enable_similarity: config.enable_similarity,
            restructure_threshold: config.restructure_threshold,
        }
    }

    pub fn with_similarity(mut self, enabled: bool) -> Self {
        self.enable_similarity = enabled;
        self
    }

    /// Analyze content
    pub fn analyze(&self, content: &str) -> AnalysisResult {
        self.analyze_with_progress(content, |_| {})
    }

    /// Analyze content, calling `on_phase` before each stage starts
    pub fn analyze_with_progress<F>(&self, content: &str, mut on_phase: F) -> AnalysisResult
    where
        F: FnMut(AnalysisPhase),
    {
        let started = Instant::now();

        on_phase(AnalysisPhase::ReadInput);
        let lines = SourceLines::new(content);
        let total_lines = lines.non_blank_count();
        if total_lines == 0 {
            tracing::debug!("Empty input, nothing to analyze");
            return AnalysisResult::empty(self.file_type, self.threshold);
        }

        let mut duplicates = Vec::new();

        on_phase(AnalysisPhase::ExactPass);
        let exact = ExactDuplicateDetector::with_min_length(self.min_exact_length);
        duplicates.extend(self.run_pass(&exact, &lines));

        on_phase(AnalysisPhase::SimilarityPass);
        if self.enable_similarity {
            let similar = SimilarityDetector::new(self.threshold)
                .with_min_length(self.min_similarity_length);
            duplicates.extend(self.run_pass(&similar, &lines));
        } else {
            tracing::debug!("Similarity pass disabled");
        }

        on_phase(AnalysisPhase::RedundancyPass);
        let redundancy = RedundancyDetector::new(self.file_type);
        duplicates.extend(self.run_pass(&redundancy, &lines));

        on_phase(AnalysisPhase::Suggestions);
        let suggestions = SuggestionEngine::with_restructure_threshold(self.restructure_threshold)
            .generate_suggestions(&duplicates, self.file_type);

        let result = AnalysisResult::from_entries(
            self.file_type,
            self.threshold,
            total_lines,
            duplicates,
            suggestions,
        );

        tracing::debug!(
            total_lines = result.total_lines,
            duplicate_lines = result.duplicate_lines,
            entries = result.duplicates.len(),
            "Analysis finished in {:.2?}",
            started.elapsed()
        );

        result
    }

    fn run_pass(&self, detector: &dyn Detector, lines: &SourceLines<'_>) -> Vec<DuplicateEntry> {
        let started = Instant::now();
        let entries = detector.detect(lines);
        tracing::debug!(
            "{} pass: {} entries in {:.2?}",
            detector.kind(),
            entries.len(),
            started.elapsed()
        );
        entries
    }
}

/// Analyze `content` with default length gates
pub fn analyze(
    content: &str,
    file_type: FileType,
    similarity_threshold: SimilarityThreshold,
) -> AnalysisResult {
    DuplicateAnalyzer::new(file_type, similarity_threshold).analyze(content)
}
