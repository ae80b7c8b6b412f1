//! Clause segmentation of extracted contract text
//!
//! Text is whitespace-normalized, then cut before each legal-structure marker.
//! The marker patterns run in a fixed order and every pass re-splits the
//! pieces produced by the previous one. Cuts only ever fall on whitespace, so
//! the word sequence of the input is preserved across the produced units.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::ClauseUnit;
use tracing::debug;

/// Approximate tokens per whitespace-delimited word
pub const TOKENS_PER_WORD: f64 = 1.3;

lazy_static! {
    /// Ordered marker patterns; each cuts at the start of its `start` group
    static ref MARKERS: Vec<Regex> = vec![
        // Numbered clauses: "1. ", "12. "
        Regex::new(r"(?m)(?:^|[.;:]\s)(?P<start>\d{1,3}\.)\s").unwrap(),
        // Lettered sub-clauses: "(a) "
        Regex::new(r"(?m)(?:^|\s)(?P<start>\([a-z]\))\s").unwrap(),
        // "Article 4", "SECTION 2", "Clause 7"
        Regex::new(
            r"(?m)(?:^|[.;:]\s)(?P<start>(?:Article|ARTICLE|Section|SECTION|Clause|CLAUSE)\s+\d+)"
        )
        .unwrap(),
        // Sentence ending a paragraph
        Regex::new(r"[.!?;:]\n(?P<start>\S)").unwrap(),
    ];
    static ref INLINE_WHITESPACE: Regex = Regex::new(r"[^\S\n]+").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n(?:[^\S\n]*\n)+").unwrap();
}

/// Splits raw text into clause-sized units
#[derive(Debug, Clone)]
pub struct ClauseSegmenter {
    target_tokens: usize,
}

impl ClauseSegmenter {
    pub fn new(target_tokens: usize) -> Self {
        Self {
            target_tokens: target_tokens.max(1),
        }
    }

    /// Segment text into ordered clause units; blank input yields no units
    pub fn segment(&self, text: &str) -> Vec<ClauseUnit> {
        let normalized = normalize_whitespace(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut pieces = vec![normalized];
        for marker in MARKERS.iter() {
            pieces = pieces
                .iter()
                .flat_map(|piece| split_before_marker(piece, marker))
                .collect();
        }

        let units: Vec<ClauseUnit> = pieces
            .iter()
            .flat_map(|piece| self.enforce_token_limit(piece))
            .collect();

        debug!(
            units = units.len(),
            target_tokens = self.target_tokens,
            "Segmented document text"
        );
        units
    }

    /// Slice an oversized piece into fixed-size word windows
    fn enforce_token_limit(&self, piece: &str) -> Vec<ClauseUnit> {
        let word_count = piece.split_whitespace().count();
        if estimate_tokens(word_count) <= self.target_tokens {
            return vec![clause_unit(piece.to_string())];
        }

        let window = ((self.target_tokens as f64 / TOKENS_PER_WORD).floor() as usize).max(1);
        let words: Vec<&str> = piece.split_whitespace().collect();
        words
            .chunks(window)
            .map(|chunk| clause_unit(chunk.join(" ")))
            .collect()
    }
}

impl Default for ClauseSegmenter {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Collapse runs of inline whitespace to one space and blank-line runs to one newline
pub fn normalize_whitespace(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = INLINE_WHITESPACE.replace_all(&unified, " ");
    let trimmed_lines: Vec<&str> = collapsed.lines().map(str::trim).collect();
    let joined = trimmed_lines.join("\n");
    BLANK_LINES.replace_all(&joined, "\n").trim().to_string()
}

/// Estimated token count: words * 1.3, rounded up
pub fn estimate_tokens(word_count: usize) -> usize {
    (word_count as f64 * TOKENS_PER_WORD).ceil() as usize
}

fn clause_unit(text: String) -> ClauseUnit {
    let word_count = text.split_whitespace().count();
    ClauseUnit {
        estimated_token_count: estimate_tokens(word_count),
        word_count,
        text,
    }
}

fn split_before_marker(piece: &str, marker: &Regex) -> Vec<String> {
    let mut cuts: Vec<usize> = marker
        .captures_iter(piece)
        .filter_map(|caps| caps.name("start").map(|m| m.start()))
        .filter(|&pos| pos > 0)
        .collect();
    cuts.dedup();

    let mut parts = Vec::with_capacity(cuts.len() + 1);
    let mut last = 0;
    for cut in cuts {
        parts.push(&piece[last..cut]);
        last = cut;
    }
    parts.push(&piece[last..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn texts(units: &[ClauseUnit]) -> Vec<&str> {
        units.iter().map(|u| u.text.as_str()).collect()
    }

    #[test]
    fn test_numbered_clauses_split() {
        let units = ClauseSegmenter::default()
            .segment("1. Rent is Rs. 15,000 per month.\n2. Notice period is 1 month.");
        assert_eq!(
            texts(&units),
            vec!["1. Rent is Rs. 15,000 per month.", "2. Notice period is 1 month."]
        );
        assert_eq!(units[0].word_count, 7);
        assert_eq!(units[0].estimated_token_count, 10);
    }

    #[test]
    fn test_inline_numbered_clauses_split() {
        let units = ClauseSegmenter::default()
            .segment("1. The tenant pays rent. 2. The landlord maintains the roof.");
        assert_eq!(units.len(), 2);
        assert!(units[1].text.starts_with("2."));
    }

    #[test]
    fn test_lettered_and_section_markers_compose() {
        let text = "Section 1 Payment terms apply as follows (a) rent is due monthly (b) late fees apply. Section 2 Maintenance is shared.";
        let units = ClauseSegmenter::default().segment(text);
        assert_eq!(
            texts(&units),
            vec![
                "Section 1 Payment terms apply as follows",
                "(a) rent is due monthly",
                "(b) late fees apply.",
                "Section 2 Maintenance is shared.",
            ]
        );
    }

    #[test]
    fn test_inline_section_reference_not_split() {
        let units = ClauseSegmenter::default()
            .segment("The deposit is governed by Section 4 of this lease and Clause 2(a).");
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_paragraph_boundaries_split() {
        let units = ClauseSegmenter::default()
            .segment("The tenant shall keep the premises clean.\nThe landlord shall repair the roof.");
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_no_units() {
        assert!(ClauseSegmenter::default().segment("").is_empty());
        assert!(ClauseSegmenter::default().segment("  \n\t \r\n ").is_empty());
    }

    #[test]
    fn test_oversized_clause_is_windowed() {
        let text = vec!["word"; 25].join(" ");
        // 10 tokens -> windows of 7 words
        let units = ClauseSegmenter::new(10).segment(&text);
        let counts: Vec<usize> = units.iter().map(|u| u.word_count).collect();
        assert_eq!(counts, vec![7, 7, 7, 4]);
        assert!(units.iter().all(|u| u.estimated_token_count <= 10));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  a \t b\r\n\r\n\n  c  "),
            "a b\nc".to_string()
        );
    }

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    proptest! {
        /// Units concatenated in order carry exactly the words of the input
        #[test]
        fn segmentation_preserves_words(
            text in "(?:[A-Za-z]{1,8}|[0-9]{1,3}\\.|\\([a-e]\\)|Section [0-9]|[.;:]|\\n| ){0,60}",
            target in 1usize..50,
        ) {
            let units = ClauseSegmenter::new(target).segment(&text);
            let joined = units.iter().map(|u| u.text.as_str()).collect::<Vec<_>>().join(" ");
            prop_assert_eq!(words(&joined), words(&normalize_whitespace(&text)));
            prop_assert!(units.iter().all(|u| !u.text.trim().is_empty()));
        }

        #[test]
        fn segmentation_never_panics(text in "\\PC*") {
            let _ = ClauseSegmenter::default().segment(&text);
        }
    }
}
