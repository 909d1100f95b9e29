/*!
# Integration Tests for Dedup Analyzer

End-to-end checks of the analyze / apply pipeline through the public API.
*/

use dedup_analyzer::{
    analyze, analyze_paths, apply_deduplication, apply_result, AnalysisResult, AnalyzerConfig,
    DuplicateAnalyzer, DuplicateKind, FileType, LineNumber, SimilarityThreshold,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn run(text: &str, file_type: FileType) -> AnalysisResult {
    analyze(text, file_type, SimilarityThreshold::default())
}

fn lines(ns: &[usize]) -> Vec<LineNumber> {
    ns.iter().map(|&n| LineNumber::new(n)).collect()
}

#[test]
fn test_exact_duplicate_example() {
    let result = run(
        "hello world foo\nhello world foo\nunique line here",
        FileType::Markdown,
    );

    assert_eq!(result.duplicates.len(), 1);
    let entry = &result.duplicates[0];
    assert_eq!(entry.kind, DuplicateKind::Exact);
    assert_eq!(entry.content, "hello world foo");
    assert_eq!(entry.occurrences, 2);
    assert_eq!(entry.locations, lines(&[1, 2]));
    assert_eq!(entry.location_labels(), vec!["Line 1", "Line 2"]);
    assert_eq!(entry.confidence, 100);

    assert_eq!(result.total_lines, 3);
    assert_eq!(result.duplicate_lines, 1);
    assert_eq!(result.unique_lines, 2);
    assert_eq!(result.estimated_reduction, 33);
    assert_eq!(
        result.suggestions,
        vec![
            "Remove 1 exact duplicate line group(s) to eliminate repeated content".to_string(),
            "Validate Markdown syntax after cleanup".to_string(),
            "Review consolidated sections to make sure the meaning is preserved".to_string(),
        ]
    );
}

#[test]
fn test_markdown_header_example() {
    let result = run(
        "# Intro\n\nSome text\n\n# Intro\n\nMore text",
        FileType::Markdown,
    );

    assert_eq!(result.total_lines, 4);
    assert_eq!(result.duplicates.len(), 1);
    let entry = &result.duplicates[0];
    assert_eq!(entry.kind, DuplicateKind::Redundant);
    assert_eq!(entry.content, "intro");
    assert_eq!(entry.occurrences, 2);
    assert_eq!(entry.locations, lines(&[1, 5]));
    assert_eq!(entry.confidence, 95);
    assert_eq!(result.redundant_sections, 1);
}

#[test]
fn test_yaml_key_example() {
    let result = run("name: foo\nvalue: 1\nname: bar", FileType::Yaml);

    assert_eq!(result.duplicates.len(), 1);
    let entry = &result.duplicates[0];
    assert_eq!(entry.kind, DuplicateKind::Redundant);
    assert_eq!(entry.content, "name");
    assert_eq!(entry.occurrences, 2);
    assert_eq!(entry.locations, lines(&[1, 3]));
    assert_eq!(entry.confidence, 90);
    assert!(result
        .suggestions
        .iter()
        .any(|s| s.starts_with("Check 1 repeated key(s)")));
}

#[test]
fn test_line_accounting_identity() {
    let inputs = [
        ("hello world foo\nhello world foo\nunique line here", FileType::Markdown),
        ("# A\n## A\n# A\ntext text text\ntext text text", FileType::Markdown),
        ("a:\n  b: 1\n  a: 2\nb: 3\n", FileType::Yaml),
        (
            "The quick brown fox jumps over the lazy dog\n\
             The quick brown fox jumped over the lazy dog\n\
             The quick brown fox jumps over the lazy cat",
            FileType::Markdown,
        ),
    ];

    for (text, file_type) in inputs {
        let result = run(text, file_type);
        assert_eq!(
            result.unique_lines + result.duplicate_lines as i64,
            result.total_lines as i64,
            "identity broken for {:?}",
            text
        );
        for entry in &result.duplicates {
            assert_eq!(entry.occurrences, entry.locations.len());
            assert!(entry.occurrences >= 2);
        }
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let text = "# Setup\n\nInstall the package with cargo\nInstall the package with cargo\n\
                # Setup\n\nInstall the packages with cargo\n";
    assert_eq!(run(text, FileType::Markdown), run(text, FileType::Markdown));
}

#[test]
fn test_entries_are_ordered_by_kind() {
    let text = "# Setup\nInstall the package with cargo\nInstall the package with cargo\n\
                Install the packages with cargo\n# Setup";
    let result = run(text, FileType::Markdown);

    let kinds: Vec<DuplicateKind> = result.duplicates.iter().map(|d| d.kind).collect();
    assert!(kinds.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(kinds.first(), Some(&DuplicateKind::Exact));
    assert_eq!(kinds.last(), Some(&DuplicateKind::Redundant));
    // lines 2 and 3 each anchor a group with line 4
    assert_eq!(result.count_of(DuplicateKind::Similar), 2);
}

#[test]
fn test_similar_lines_use_threshold_as_confidence() {
    let text = "The quick brown fox jumps over the lazy dog\n\
                The quick brown fox jumped over the lazy dog";
    let result = run(text, FileType::Markdown);

    assert_eq!(result.duplicates.len(), 1);
    let entry = &result.duplicates[0];
    assert_eq!(entry.kind, DuplicateKind::Similar);
    assert_eq!(entry.content, "the quick brown fox jumps over the lazy dog");
    assert_eq!(entry.locations, lines(&[1, 2]));
    assert_eq!(entry.confidence, 85);
}

#[test]
fn test_threshold_boundary_is_inclusive() {
    // 25 characters, 5 substitutions: exactly 80% similar
    let text = "abcdefghijklmnopqrstuvwxy\nabcdefghijklmnopqrst12345";

    let at = analyze(text, FileType::Markdown, SimilarityThreshold::new(80).unwrap());
    assert_eq!(at.count_of(DuplicateKind::Similar), 1);

    let above = analyze(text, FileType::Markdown, SimilarityThreshold::new(81).unwrap());
    assert_eq!(above.count_of(DuplicateKind::Similar), 0);
}

#[test]
fn test_identical_lines_are_not_similar() {
    let text = "This Line Is Long Enough Yes\nthis line is long enough yes";
    let result = run(text, FileType::Markdown);

    assert_eq!(result.count_of(DuplicateKind::Exact), 1);
    assert_eq!(result.count_of(DuplicateKind::Similar), 0);
}

#[test]
fn test_exact_length_boundary() {
    let ten = run("abcdefghij\nabcdefghij", FileType::Markdown);
    assert_eq!(ten.count_of(DuplicateKind::Exact), 1);

    let nine = run("abcdefghi\nabcdefghi", FileType::Markdown);
    assert!(nine.duplicates.is_empty());
}

#[test]
fn test_empty_input_is_not_an_error() {
    for text in ["", "   \n\t\n"] {
        let result = run(text, FileType::Yaml);
        assert_eq!(result.total_lines, 0);
        assert!(result.duplicates.is_empty());
        assert!(result.suggestions.is_empty());
        assert_eq!(result.estimated_reduction, 0);
    }
}

#[test]
fn test_apply_all_on_exact_only_document() {
    let text = "first repeated line\nanother line here\nfirst repeated line\n\
                first repeated line\nanother line here\nclosing text";
    let result = run(text, FileType::Markdown);
    assert!(result
        .duplicates
        .iter()
        .all(|d| d.kind == DuplicateKind::Exact));

    let outcome = apply_result(text, &result, &HashSet::new());

    let expected_removed: usize = result
        .duplicates
        .iter()
        .map(|d| d.occurrences - 1)
        .sum();
    assert_eq!(outcome.removed_count(), expected_removed);
    assert_eq!(
        outcome.output,
        "first repeated line\nanother line here\nclosing text"
    );

    // remainder is an in-order subsequence of the original
    let mut original = text.split('\n');
    for kept in outcome.output.split('\n') {
        assert!(original.any(|line| line == kept));
    }
}

#[test]
fn test_apply_selected_similar_entry() {
    let text = "The quick brown fox jumps over the lazy dog\n\
                middle\n\
                The quick brown fox jumped over the lazy dog\n";
    let result = run(text, FileType::Markdown);
    let id = result.duplicates[0].id.clone();

    let selected: HashSet<String> = [id].into_iter().collect();
    let outcome = apply_deduplication(text, &result.duplicates, &selected, FileType::Markdown);

    assert_eq!(
        outcome.output,
        "The quick brown fox jumps over the lazy dog\nmiddle\n"
    );
    assert_eq!(outcome.removed_lines, lines(&[3]));
}

#[test]
fn test_apply_yaml_drops_repeated_key() {
    let text = "service:\n  name: api\n   name: api\nport: 80";
    let result = run(text, FileType::Yaml);
    let outcome = apply_result(text, &result, &HashSet::new());

    // the odd-indented repeat is removed, so no warning remains
    assert_eq!(outcome.output, "service:\n  name: api\nport: 80");
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_disabled_similarity_pass() {
    let text = "The quick brown fox jumps over the lazy dog\n\
                The quick brown fox jumped over the lazy dog";
    let config = AnalyzerConfig {
        enable_similarity: false,
        ..AnalyzerConfig::default()
    };
    let result = DuplicateAnalyzer::from_config(FileType::Markdown, &config).analyze(text);
    assert!(result.duplicates.is_empty());
}

#[test]
fn test_batch_analysis_over_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("guide.md"),
        "# Usage\n\nrun the tool twice\n\n# Usage\n\nrun the tool twice\n",
    )
    .unwrap();
    fs::write(dir.path().join("clean.yaml"), "name: api\nport: 80\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored ignored\nignored ignored\n").unwrap();

    let paths = dedup_analyzer::analyzer::batch::collect_documents(dir.path(), false);
    assert_eq!(paths.len(), 2);

    let report = analyze_paths(&paths, &AnalyzerConfig::default(), None);
    assert_eq!(report.files.len(), 2);
    assert!(report.skipped.is_empty());
    assert_eq!(report.files_with_duplicates(), 1);
    assert_eq!(report.duplicate_lines(), 2);

    let guide = report
        .files
        .iter()
        .find(|f| f.path.ends_with("guide.md"))
        .unwrap();
    assert_eq!(guide.result.file_type, FileType::Markdown);
    assert_eq!(guide.result.count_of(DuplicateKind::Exact), 1);
    assert_eq!(guide.result.count_of(DuplicateKind::Redundant), 1);
}
