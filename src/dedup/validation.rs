/*!
# Structural Validation

Heuristic sanity checks run on deduplicated output. They only produce
warnings; nothing here can reject a document.
*/

use crate::core::{FileType, LineNumber, SourceLines};

/// Runs the format-specific check and returns human-readable warnings.
pub fn validate_structure(text: &str, file_type: FileType) -> Vec<String> {
    let lines = SourceLines::new(text);
    match file_type {
        FileType::Markdown => validate_markdown(&lines),
        FileType::Yaml => validate_yaml(&lines),
    }
}

/// Fenced code block balance and headers swallowed by an open fence.
fn validate_markdown(lines: &SourceLines<'_>) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut in_code_block = false;

    for (line_no, raw) in lines.iter() {
        let trimmed = raw.trim_start();
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block && trimmed.starts_with('#') {
            warnings.push(format!(
                "{}: header-like line inside a code block, a fence may have been removed",
                line_no
            ));
        }
    }

    if in_code_block {
        warnings.push("Code block is not closed at the end of the document".to_string());
    }

    warnings
}

/// Odd indentation on content lines.
fn validate_yaml(lines: &SourceLines<'_>) -> Vec<String> {
    lines
        .iter()
        .filter_map(|(line_no, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let indent = leading_whitespace(raw);
            (indent % 2 == 1).then(|| odd_indent_warning(line_no, indent))
        })
        .collect()
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn odd_indent_warning(line_no: LineNumber, indent: usize) -> String {
    format!("{}: odd indentation ({} spaces)", line_no, indent)
}
