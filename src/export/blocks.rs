//! Splitting note bodies into blocks.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Block;

/// A line break, optional whitespace, and another line break.
static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern is valid"));

/// Segments `body` into blocks.
///
/// With `split_by_paragraph`, the body is cut at blank lines, every
/// paragraph is trimmed, and empty paragraphs are dropped. Otherwise the
/// whole body, untrimmed, becomes the only block.
pub fn segment(body: &str, split_by_paragraph: bool) -> Vec<Block> {
    if !split_by_paragraph {
        return vec![Block::new(body)];
    }

    PARAGRAPH_BREAK_RE
        .split(body)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(Block::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.content.as_str()).collect()
    }

    #[test]
    fn splits_on_blank_lines() {
        let blocks = segment("A\n\nB\n\n\nC", true);

        assert_eq!(contents(&blocks), vec!["A", "B", "C"]);
        assert_ne!(blocks[0].id, blocks[1].id);
        assert_ne!(blocks[1].id, blocks[2].id);
        assert_ne!(blocks[0].id, blocks[2].id);
    }

    #[test]
    fn single_line_breaks_stay_within_a_paragraph() {
        let blocks = segment("line one\nline two\n\nnext", true);

        assert_eq!(contents(&blocks), vec!["line one\nline two", "next"]);
    }

    #[test]
    fn whitespace_only_lines_separate_paragraphs() {
        let blocks = segment("A\n   \t\nB\r\n\r\nC", true);

        assert_eq!(contents(&blocks), vec!["A", "B", "C"]);
    }

    #[test]
    fn empty_paragraphs_are_dropped() {
        let blocks = segment("\n\n  A  \n\n\n\n", true);

        assert_eq!(contents(&blocks), vec!["A"]);
    }

    #[test]
    fn empty_body_split_yields_no_blocks() {
        assert!(segment("", true).is_empty());
    }

    #[test]
    fn unsplit_body_is_one_untrimmed_block() {
        let blocks = segment("  A\n\nB  ", false);

        assert_eq!(contents(&blocks), vec!["  A\n\nB  "]);
    }

    #[test]
    fn unsplit_empty_body_is_one_empty_block() {
        assert_eq!(contents(&segment("", false)), vec![""]);
    }
}
