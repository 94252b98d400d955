//! Descriptive statistics for a text document.
//!
//! # Counting rules
//!
//! - **Paragraphs**: line endings are normalized (`\r\n` and `\r` become `\n`)
//!   and the text is split wherever a line break is followed, after any amount
//!   of whitespace, by another line break. Blank segments are dropped. Text
//!   with at least one non-whitespace character always has one paragraph.
//! - **Words**: the *original* text is split on [`WORD_DELIMITERS`] and empty
//!   tokens are discarded. There is no Unicode word segmentation.
//! - **Characters**: the number of UTF-16 code units in the original text,
//!   whitespace included. Characters outside the Basic Multilingual Plane
//!   (most emoji, for example) count as two.
//!
//! ```rust
//! use analyzer::compute_statistics;
//!
//! let stats = compute_statistics("One line.\n\nAnother line.");
//! assert_eq!(stats.paragraph_count, 2);
//! assert_eq!(stats.word_count, 4);
//! assert_eq!(stats.character_count, 24);
//! ```

use serde::{Deserialize, Serialize};

/// Characters that separate words. Whitespace beyond these four (for example
/// U+00A0) does not split words.
pub const WORD_DELIMITERS: [char; 18] = [
    ' ', '\r', '\n', '\t', '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'',
];

/// Paragraph, word and character counts for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub paragraph_count: u64,
    pub word_count: u64,
    pub character_count: u64,
}

/// Compute [`TextStatistics`] for `text`. Empty input yields all zeros.
pub fn compute_statistics(text: &str) -> TextStatistics {
    if text.is_empty() {
        return TextStatistics::default();
    }

    let normalized = normalize_line_endings(text);
    let paragraphs = count_paragraphs(&normalized);
    let paragraph_count = if paragraphs > 0 {
        paragraphs
    } else if text.trim().is_empty() {
        0
    } else {
        1
    };

    TextStatistics {
        paragraph_count,
        word_count: count_words(text),
        character_count: text.encode_utf16().count() as u64,
    }
}

/// Rewrite `\r\n` and lone `\r` as `\n`.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Count non-blank paragraphs in line-ending-normalized text.
///
/// A new paragraph starts at the first non-whitespace character, and again at
/// every non-whitespace character whose preceding whitespace run holds two or
/// more line breaks.
fn count_paragraphs(normalized: &str) -> u64 {
    let mut count = 0u64;
    let mut in_paragraph = false;
    let mut breaks_in_gap = 0usize;

    for ch in normalized.chars() {
        if ch.is_whitespace() {
            if ch == '\n' {
                breaks_in_gap += 1;
            }
            continue;
        }
        if !in_paragraph || breaks_in_gap >= 2 {
            count += 1;
            in_paragraph = true;
        }
        breaks_in_gap = 0;
    }

    count
}

fn count_words(text: &str) -> u64 {
    text.split(&WORD_DELIMITERS[..])
        .filter(|token| !token.is_empty())
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_all_zero() {
        assert_eq!(compute_statistics(""), TextStatistics::default());
    }

    #[test]
    fn single_word() {
        let stats = compute_statistics("Hello");
        assert_eq!(stats.word_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.character_count, 5);
    }

    #[test]
    fn simple_sentence() {
        let text = "This is a test.";
        let stats = compute_statistics(text);
        assert_eq!(stats.word_count, 4);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.character_count, text.len() as u64);
    }

    #[test]
    fn whitespace_only_has_no_paragraphs_or_words() {
        let text = "  \n\n   \n ";
        let stats = compute_statistics(text);
        assert_eq!(stats.paragraph_count, 0);
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.character_count, text.len() as u64);
    }

    #[test]
    fn single_line_break_does_not_split_paragraphs() {
        let stats = compute_statistics("line one\nline two\nline three");
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.word_count, 6);
    }

    #[test]
    fn blank_line_with_spaces_still_separates() {
        let stats = compute_statistics("alpha\n   \t \nbeta");
        assert_eq!(stats.paragraph_count, 2);
    }

    #[test]
    fn carriage_returns_are_normalized_for_paragraphs() {
        assert_eq!(compute_statistics("a\r\n\r\nb").paragraph_count, 2);
        assert_eq!(compute_statistics("a\r\rb").paragraph_count, 2);
        assert_eq!(compute_statistics("a\r\nb").paragraph_count, 1);
    }

    #[test]
    fn leading_and_trailing_blank_lines_are_ignored() {
        let stats = compute_statistics("\n\n\nbody text\n\n\n");
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.word_count, 2);
    }

    #[test]
    fn punctuation_runs_do_not_create_words() {
        let stats = compute_statistics("wait... what?! (really) [yes] {no} \"quoted\" 'single'");
        assert_eq!(stats.word_count, 7);
    }

    #[test]
    fn unlisted_characters_stay_inside_words() {
        // Hyphen, slash and non-breaking space are not delimiters.
        let stats = compute_statistics("state-of-the-art and/or a\u{00A0}b");
        assert_eq!(stats.word_count, 3);
    }

    #[test]
    fn character_count_uses_utf16_units() {
        // BMP characters are one unit each, whatever their UTF-8 width.
        let stats = compute_statistics("café ☕");
        assert_eq!(stats.character_count, 6);

        // U+1F600 is a surrogate pair.
        let stats = compute_statistics("hi \u{1F600}");
        assert_eq!(stats.character_count, 5);
        assert_eq!(stats.word_count, 2);
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_value(compute_statistics("Hello")).unwrap();
        assert_eq!(json["paragraphCount"], 1);
        assert_eq!(json["wordCount"], 1);
        assert_eq!(json["characterCount"], 5);
    }
}
