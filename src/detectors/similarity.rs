/*!
# Near-Duplicate Detection

Pairs up lines whose normalized Levenshtein similarity reaches the active
threshold without being identical. Every eligible line is compared with every
later one, so the pass is O(n² · L²); the length gate is the only pruning.
*/

use super::Detector;
use crate::analyzer::{DuplicateEntry, DuplicateKind};
use crate::core::{normalize_line, LineNumber, SimilarityThreshold, SourceLines};

/// Lines must be strictly longer than this (after trim) to be compared
pub const MIN_SIMILARITY_LENGTH: usize = 20;

/// Edit distance with unit cost for insertion, deletion and substitution.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance(&a, &b)
}

/// Levenshtein distance over pre-split characters.
///
/// Same recurrence as the full `(|b|+1) x (|a|+1)` matrix, kept as two rows.
fn edit_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr = vec![0usize; a.len() + 1];

    for (i, cb) in b.iter().enumerate() {
        curr[0] = i + 1;
        for (j, ca) in a.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let insertion = curr[j] + 1;
            let deletion = prev[j + 1] + 1;
            curr[j + 1] = substitution.min(insertion).min(deletion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}

/// True when `threshold <= similarity < 100`, with
/// `similarity = (max_len - distance) / max_len * 100`.
///
/// Evaluated on integers so a score landing exactly on the threshold is
/// never lost to float rounding.
fn is_similar_match(a: &[char], b: &[char], threshold: SimilarityThreshold) -> bool {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return false;
    }
    let distance = edit_distance(a, b);
    distance > 0 && (max_len - distance) * 100 >= usize::from(threshold.get()) * max_len
}

/// Line taking part in the similarity pass
struct Candidate {
    line: LineNumber,
    text: String,
    chars: Vec<char>,
}

/// Detector for lines that differ by a few edits
pub struct SimilarityDetector {
    threshold: SimilarityThreshold,
    min_length: usize,
}

impl SimilarityDetector {
    pub fn new(threshold: SimilarityThreshold) -> Self {
        Self {
            threshold,
            min_length: MIN_SIMILARITY_LENGTH,
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    fn candidates(&self, lines: &SourceLines<'_>) -> Vec<Candidate> {
        lines
            .iter()
            .filter_map(|(line, raw)| {
                let trimmed = raw.trim();
                (trimmed.chars().count() > self.min_length).then(|| {
                    let text = normalize_line(trimmed);
                    let chars = text.chars().collect();
                    Candidate { line, text, chars }
                })
            })
            .collect()
    }
}

impl Detector for SimilarityDetector {
    fn kind(&self) -> DuplicateKind {
        DuplicateKind::Similar
    }

    fn detect(&self, lines: &SourceLines<'_>) -> Vec<DuplicateEntry> {
        let candidates = self.candidates(lines);

        let mut consumed = vec![false; candidates.len()];
        let mut entries = Vec::new();

        for (i, anchor) in candidates.iter().enumerate() {
            if consumed[i] {
                continue;
            }

            // Later lines are scanned even when already consumed, so one line
            // can show up in several groups.
            let matches: Vec<usize> = candidates
                .iter()
                .enumerate()
                .skip(i + 1)
                .filter(|(_, other)| is_similar_match(&anchor.chars, &other.chars, self.threshold))
                .map(|(j, _)| j)
                .collect();

            if matches.is_empty() {
                continue;
            }

            consumed[i] = true;
            let mut locations = Vec::with_capacity(matches.len() + 1);
            locations.push(anchor.line);
            for &j in &matches {
                consumed[j] = true;
                locations.push(candidates[j].line);
            }

            entries.push(DuplicateEntry::new(
                DuplicateKind::Similar,
                entries.len() + 1,
                anchor.text.clone(),
                locations,
                self.threshold.get(),
            ));
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(v: u8) -> SimilarityThreshold {
        SimilarityThreshold::new(v).unwrap()
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_levenshtein_classic_cases() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("same", "same"), 0);
        assert_eq!(levenshtein("ёжик", "ежик"), 1);
    }

    #[test]
    fn test_empty_lines_never_match() {
        assert!(!is_similar_match(&[], &[], threshold(50)));
        assert_eq!(edit_distance(&[], &chars("abc")), 3);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // 20 chars, one substitution: (20 - 1) / 20 = 95%
        let a = "abcdefghijklmnopqrst";
        let b = "abcdefghijklmnopqrsx";
        assert!(is_similar_match(&chars(a), &chars(b), threshold(95)));
        assert!(!is_similar_match(&chars(a), &chars(b), threshold(96)));
    }

    #[test]
    fn test_identical_lines_are_not_similar() {
        let a = chars("this line is long enough to compare");
        assert!(!is_similar_match(&a, &a, threshold(50)));
    }

    #[test]
    fn test_detects_group_in_discovery_order() {
        let text = "The quick brown fox jumps over the dog\n\
                    something completely different here\n\
                    The quick brown fox jumps over the cat";
        let entries = SimilarityDetector::new(threshold(85)).detect(&SourceLines::new(text));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, DuplicateKind::Similar);
        assert_eq!(entries[0].confidence, 85);
        assert_eq!(entries[0].locations, vec![LineNumber::new(1), LineNumber::new(3)]);
        assert_eq!(entries[0].content, "the quick brown fox jumps over the dog");
    }

    #[test]
    fn test_short_lines_are_ignored() {
        // 20 characters exactly is not long enough
        let text = "abcdefghijklmnopqrst\nabcdefghijklmnopqrsx";
        let entries = SimilarityDetector::new(threshold(50)).detect(&SourceLines::new(text));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_consumed_line_does_not_anchor() {
        // A~B and B~C, but A and C are too far apart.
        let a = "aaaaaaaaaaaaaaaaaaaaaaaa";
        let b = "aaaaaaaaaaaaaaaaaaaabbbb";
        let c = "aaaaaaaaaaaaaaaabbbbbbbb";
        let text = format!("{a}\n{b}\n{c}");
        let entries = SimilarityDetector::new(threshold(80)).detect(&SourceLines::new(&text));

        // A anchors {A, B}; B is consumed and never anchors, so the B~C pair is lost.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].locations, vec![LineNumber::new(1), LineNumber::new(2)]);
    }

    #[test]
    fn test_overlapping_groups() {
        let a = "xxxxxxxxxxxxxxxxxxxxxxxxx";
        let d = "zzzzzzzzzzzzzzzzzzzzzzzzz";
        let b = "xxxxxxxxxxxxxxxxxxxxxxzzz";
        let c = "xxxxxxxxxxxxxxxxxxzzzzzzz";
        // A~B 88%, A~C 72%, C~B 84%: B ends up in both groups.
        let text = format!("{a}\n{c}\n{b}\n{d}");
        let entries = SimilarityDetector::new(threshold(80)).detect(&SourceLines::new(&text));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].locations, vec![LineNumber::new(1), LineNumber::new(3)]);
        assert_eq!(entries[1].locations, vec![LineNumber::new(2), LineNumber::new(3)]);
    }

    #[test]
    fn test_distance_counts_characters_not_bytes() {
        // 25 chars, one substitution of a two-byte letter: 24 / 25 = 96%
        let text = "Ёлка стоит в углу комнаты\nЕлка стоит в углу комнаты";
        let entries = SimilarityDetector::new(threshold(95)).detect(&SourceLines::new(text));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].locations, vec![LineNumber::new(1), LineNumber::new(2)]);
        assert_eq!(entries[0].content, "ёлка стоит в углу комнаты");
    }
}
