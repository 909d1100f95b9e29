/*!
# Line positions

Line numbering shared by the detectors and the deduplication applier.
Both sides split text the same way, so a `LineNumber` produced by analysis
always addresses the same line when the text is rewritten.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::DedupError;

/// 1-based line number in the analyzed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct LineNumber(usize);

impl LineNumber {
    /// Builds a line number from a 0-based line index.
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub fn new(line: usize) -> Self {
        debug_assert!(line > 0, "line numbers are 1-based");
        Self(line)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// 0-based index into the split lines, `None` for the invalid line 0
    pub fn index(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl TryFrom<usize> for LineNumber {
    type Error = DedupError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(DedupError::InvalidLineNumber(value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<LineNumber> for usize {
    fn from(line: LineNumber) -> Self {
        line.0
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}", self.0)
    }
}

/// Document split into lines.
///
/// Splits on `'\n'` only. A trailing `'\r'` stays part of the line, which is
/// harmless for analysis (every comparison trims) and keeps the applier
/// byte-exact on CRLF input.
#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceLines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, line: LineNumber) -> Option<&'a str> {
        line.index().and_then(|i| self.lines.get(i)).copied()
    }

    /// Iterates `(LineNumber, raw line)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (LineNumber, &'a str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (LineNumber::from_index(i), *line))
    }

    /// Number of lines that contain something other than whitespace.
    pub fn non_blank_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.trim().is_empty()).count()
    }
}

/// Trimmed, lowercased form of a line used for every comparison.
pub fn normalize_line(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Length in characters, the unit every length gate is expressed in.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_number_display() {
        assert_eq!(LineNumber::from_index(0).to_string(), "Line 1");
        assert_eq!(LineNumber::new(42).to_string(), "Line 42");
        assert_eq!(LineNumber::new(3).index(), Some(2));
    }

    #[test]
    fn test_line_number_serializes_as_integer() {
        let json = serde_json::to_string(&vec![LineNumber::new(1), LineNumber::new(5)]).unwrap();
        assert_eq!(json, "[1,5]");
    }

    #[test]
    fn test_line_number_rejects_zero() {
        assert!(matches!(
            LineNumber::try_from(0),
            Err(DedupError::InvalidLineNumber(0))
        ));
        assert!(serde_json::from_str::<Vec<LineNumber>>("[1,0]").is_err());

        let lines: Vec<LineNumber> = serde_json::from_str("[2,7]").unwrap();
        assert_eq!(lines, vec![LineNumber::new(2), LineNumber::new(7)]);
    }

    #[test]
    fn test_source_lines_keeps_blank_lines() {
        let text = "first\n\nthird\n";
        let lines = SourceLines::new(text);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines.non_blank_count(), 2);
        assert_eq!(lines.get(LineNumber::new(3)), Some("third"));
        assert_eq!(lines.get(LineNumber::new(9)), None);
    }

    #[test]
    fn test_normalize_line() {
        assert_eq!(normalize_line("  Hello World\r"), "hello world");
        assert_eq!(char_len("привет"), 6);
    }
}
