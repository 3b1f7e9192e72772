//! Splitting normalized text into chunks the TTS backend accepts.
//!
//! The backend rejects requests longer than [`MAX_CHUNK_CHARS`] characters, so
//! text is first cut at sentence punctuation and any remaining long piece is
//! cut again at the last space that fits.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of characters the backend accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Marks that carry intonation; kept at the end of their chunk.
const TONE_MARKS: &[char] = &['?', '!', '？', '！', '¡', '¿'];

/// Marks that always end a chunk and are dropped.
const OTHER_PUNCTUATION: &[char] = &[
    '…', '‥', '،', ';', '—', '。', '，', '、', '(', ')', '[', ']', '\n',
];

static HYPHENATED_LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\r?\n").expect("line break pattern is valid"));

static ABBREVIATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(dr|jr|mr|mrs|ms|msgr|prof|sr|st)\.")
        .expect("abbreviation pattern is valid")
});

/// Pre-processes text and splits it into backend-sized chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    max_chars: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            max_chars: MAX_CHUNK_CHARS,
        }
    }

    /// Use a different chunk limit. Values below 1 are raised to 1.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars.max(1);
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Split `text` into trimmed chunks of at most `max_chars` characters.
    ///
    /// Chunks with nothing to pronounce (only punctuation) are dropped, so the
    /// result may be empty.
    pub fn chunks(&self, text: &str) -> Vec<String> {
        let prepared = preprocess(text);
        split_on_punctuation(&prepared)
            .into_iter()
            .flat_map(|token| minimize(token, self.max_chars))
            .map(|chunk| chunk.trim().to_string())
            .filter(|chunk| is_speakable(chunk))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn preprocess(text: &str) -> String {
    let text = HYPHENATED_LINE_BREAK.replace_all(text, "");
    let text = ABBREVIATION.replace_all(&text, "${1}");
    space_after_tone_marks(&text)
}

fn space_after_tone_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if TONE_MARKS.contains(&c) {
            if let Some(next) = chars.peek() {
                if !next.is_whitespace() && !TONE_MARKS.contains(next) {
                    out.push(' ');
                }
            }
        }
    }
    out
}

fn split_on_punctuation(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let end_after = idx + c.len_utf8();

        if TONE_MARKS.contains(&c) {
            if next.map_or(true, |n| !TONE_MARKS.contains(&n)) {
                tokens.push(&text[start..end_after]);
                start = end_after;
            }
            continue;
        }

        let drop_here = match c {
            '.' | ',' => {
                next.map_or(true, char::is_whitespace) && !ends_with_dotted_letter(&text[..idx])
            }
            ':' => !text[..idx].ends_with(|p: char| p.is_ascii_digit()),
            _ => OTHER_PUNCTUATION.contains(&c),
        };
        if drop_here {
            tokens.push(&text[start..idx]);
            start = end_after;
        }
    }
    tokens.push(&text[start..]);
    tokens
}

/// True for `e.g`, `i.e` and the like: a letter right after a period.
fn ends_with_dotted_letter(before: &str) -> bool {
    let mut tail = before.chars().rev();
    matches!((tail.next(), tail.next()), (Some(letter), Some('.')) if letter.is_alphabetic())
}

fn minimize(token: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = token.trim_start();
    while rest.chars().count() > max_chars {
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let cut = match rest[..limit].rfind(' ') {
            Some(i) if i > 0 => i,
            _ => limit,
        };
        out.push(rest[..cut].to_string());
        rest = rest[cut..].trim_start();
    }
    if !rest.is_empty() {
        out.push(rest.to_string());
    }
    out
}

fn is_speakable(chunk: &str) -> bool {
    chunk.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = Tokenizer::new().chunks("Hello world foo");
        assert_eq!(chunks, vec!["Hello world foo"]);
    }

    #[test]
    fn test_splits_on_sentence_punctuation() {
        let chunks = Tokenizer::new().chunks("First sentence. Second one, with a clause; done");
        assert_eq!(
            chunks,
            vec!["First sentence", "Second one", "with a clause", "done"]
        );
    }

    #[test]
    fn test_decimals_and_times_are_not_split() {
        let chunks = Tokenizer::new().chunks("Pay 3.5 percent at 10:30 sharp");
        assert_eq!(chunks, vec!["Pay 3.5 percent at 10:30 sharp"]);
    }

    #[test]
    fn test_dotted_abbreviations_do_not_end_a_chunk() {
        let chunks = Tokenizer::new().chunks("See e.g. the annex and i.e. this. Then stop");
        assert_eq!(chunks, vec!["See e.g. the annex and i.e. this", "Then stop"]);
    }

    #[test]
    fn test_colon_after_digit_is_not_split() {
        let chunks = Tokenizer::new().chunks("Article 5: The controller shall act");
        assert_eq!(chunks, vec!["Article 5: The controller shall act"]);

        let chunks = Tokenizer::new().chunks("Note: the controller shall act");
        assert_eq!(chunks, vec!["Note", "the controller shall act"]);
    }

    #[test]
    fn test_tone_marks_are_kept() {
        let chunks = Tokenizer::new().chunks("Really?Yes! Fine");
        assert_eq!(chunks, vec!["Really?", "Yes!", "Fine"]);
    }

    #[test]
    fn test_abbreviations_do_not_end_a_chunk() {
        let chunks = Tokenizer::new().chunks("Ask Dr. Smith and Mrs. Jones.");
        assert_eq!(chunks, vec!["Ask Dr Smith and Mrs Jones"]);
    }

    #[test]
    fn test_hyphenated_line_break_is_joined() {
        let chunks = Tokenizer::new().chunks("pro-\ncessing");
        assert_eq!(chunks, vec!["processing"]);
    }

    #[test]
    fn test_long_text_respects_limit_and_order() {
        let words: Vec<String> = (0..120).map(|i| format!("word{}", i)).collect();
        let text = words.join(" ");
        let chunks = Tokenizer::new().chunks(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS, "too long: {}", chunk);
        }
        let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.split(' ')).collect();
        assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_word_longer_than_limit_is_hard_split() {
        let chunks = Tokenizer::new().with_max_chars(4).chunks("abcdefghij");
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_multibyte_chars_count_as_one() {
        let text = "é".repeat(150);
        let chunks = Tokenizer::new().chunks(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[1].chars().count(), 50);
    }

    #[test]
    fn test_punctuation_only_yields_nothing() {
        assert!(Tokenizer::new().chunks(" ... ; -- , ").is_empty());
        assert!(Tokenizer::new().chunks("").is_empty());
    }

    #[test]
    fn test_zero_limit_is_raised() {
        assert_eq!(Tokenizer::new().with_max_chars(0).max_chars(), 1);
    }
}
