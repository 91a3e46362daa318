//! Tokenizers that respect a protected vocabulary
//!
//! Provides the `Tokenizer` trait and built-in implementations for turning
//! text into an ordered token sequence. The contract every implementation
//! honors: a string in the supplied `ProtectedVocabulary` is never split
//! across output tokens, and re-tokenizing with the same vocabulary is
//! idempotent.

use crate::annotations::ProtectedVocabulary;

/// A single immutable token with a stable position in its sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text.
    pub text: String,

    /// True if this token matched a protected-vocabulary entry.
    pub protected: bool,

    /// Token index in the sequence.
    pub index: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, protected: bool, index: usize) -> Self {
        Self {
            text: text.into(),
            protected,
            index,
        }
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Trait for tokenizers that split text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text`, treating every entry of `vocabulary` as atomic.
    fn tokenize(&self, text: &str, vocabulary: &ProtectedVocabulary) -> Vec<Token>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &str;

    /// Clone this tokenizer into a Box.
    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// Built-in Tokenizers
// ============================================================================

/// Default tokenizer: greedy longest-match over the protected vocabulary,
/// whitespace-splitting everywhere else.
///
/// At each position the longest protected entry starting there is emitted
/// as one token; otherwise a plain word runs until whitespace or the start
/// of a protected entry.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTokenizer;

impl AnnotationTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for AnnotationTokenizer {
    fn tokenize(&self, text: &str, vocabulary: &ProtectedVocabulary) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut rest = text.trim_start();

        while !rest.is_empty() {
            if let Some(entry) = vocabulary.longest_prefix(rest) {
                let index = tokens.len();
                tokens.push(Token::new(entry, true, index));
                rest = rest[entry.len()..].trim_start();
                continue;
            }

            // Plain word: runs until whitespace or a protected entry begins.
            let mut end = rest.len();
            for (pos, ch) in rest.char_indices() {
                if pos == 0 {
                    continue;
                }
                if ch.is_whitespace() || vocabulary.matches_prefix(&rest[pos..]) {
                    end = pos;
                    break;
                }
            }

            let index = tokens.len();
            tokens.push(Token::new(&rest[..end], false, index));
            rest = rest[end..].trim_start();
        }

        tokens
    }

    fn name(&self) -> &str {
        "annotation"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

/// Character-level tokenizer (one token per char).
///
/// Used for character-granularity distances; every character is already
/// atomic, so only single-character vocabulary entries mark as protected.
#[derive(Debug, Clone, Default)]
pub struct CharacterTokenizer;

impl Tokenizer for CharacterTokenizer {
    fn tokenize(&self, text: &str, vocabulary: &ProtectedVocabulary) -> Vec<Token> {
        text.chars()
            .enumerate()
            .map(|(index, ch)| {
                let text = ch.to_string();
                let protected = vocabulary.contains(&text);
                Token {
                    text,
                    protected,
                    index,
                }
            })
            .collect()
    }

    fn name(&self) -> &str {
        "character"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::AnnotationCatalog;

    fn vocab_for(texts: &[&str]) -> ProtectedVocabulary {
        ProtectedVocabulary::build(&AnnotationCatalog::new(), texts, &[])
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_plain_whitespace_split() {
        let tokens = AnnotationTokenizer.tokenize("hello world", &ProtectedVocabulary::default());
        assert_eq!(texts(&tokens), vec!["hello", "world"]);
        assert!(tokens.iter().all(|t| !t.protected));
        assert_eq!(tokens[1].index, 1);
    }

    #[test]
    fn test_protected_span_stays_atomic() {
        let line = "<I wanted> [/] I wanted to invite Margie .";
        let vocab = vocab_for(&[line]);
        let tokens = AnnotationTokenizer.tokenize(line, &vocab);

        assert!(tokens[0].protected);
        assert_eq!(
            texts(&tokens),
            vec!["<I wanted> [/]", "I", "wanted", "to", "invite", "Margie", "."]
        );
    }

    #[test]
    fn test_protected_entry_after_word_run() {
        let line = "it's &-um complicated";
        let vocab = vocab_for(&[line]);
        let tokens = AnnotationTokenizer.tokenize(line, &vocab);
        assert_eq!(texts(&tokens), vec!["it's", "&-um", "complicated"]);
        assert!(tokens[1].protected);
    }

    #[test]
    fn test_idempotent_for_fixed_vocabulary() {
        let line = "he had two mouses [: mice] today";
        let vocab = vocab_for(&[line]);
        let first = AnnotationTokenizer.tokenize(line, &vocab);
        let second = AnnotationTokenizer.tokenize(line, &vocab);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_text() {
        let tokens = AnnotationTokenizer.tokenize("   ", &ProtectedVocabulary::default());
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_character_tokenizer() {
        let tokens = CharacterTokenizer.tokenize("abc", &ProtectedVocabulary::default());
        assert_eq!(texts(&tokens), vec!["a", "b", "c"]);
        assert_eq!(tokens[2].index, 2);
    }
}
