//! # ChatWER Library
//!
//! An annotation-aware word error rate (WER) library for spoken-language
//! transcripts. Transcripts in CHAT-style formats carry disfluency markers
//! (retracing, fillers, overlaps, non-verbal activity, ...) that naive
//! whitespace tokenization tears apart; this crate keeps them atomic and
//! measures edit distance over the resulting tokens.
//!
//! ## Core Concepts
//!
//! - **AnnotationCatalog**: Extract annotation markers from raw text
//! - **Tokenizers**: Split text into tokens without breaking annotations
//! - **Alignment**: Edit distance, edit scripts, and marked side-by-side views
//! - **WerEngine**: Compute WER under configurable comparison policies
//!
//! ## Example
//!
//! ```rust
//! use chatwer_core::{WerConfig, WerEngine, WerPolicy};
//!
//! let config = WerConfig::default()
//!     .with_policy(WerPolicy::WholeText)
//!     .with_fixed_annotations(vec!["[?]".to_string()]);
//!
//! let engine = WerEngine::new(config);
//! let result = engine.compute(
//!     "<I wanted> [/] I wanted to invite Margie .",
//!     "I wanted to invite Margie .",
//! );
//! assert_eq!(result.edit_distance, 1);
//! ```

pub mod algorithm;
pub mod align;
pub mod annotations;
pub mod config;
pub mod engine;
pub mod error;
pub mod tokenizers;
pub mod wer;

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

// Re-export main types
pub use align::{apply, mark, render, EditOp, MarkTag, MarkedToken};
pub use annotations::{AnnotationCatalog, ProtectedVocabulary};
pub use config::{
    extract_speaker_lines, load_fixed_annotations, load_transcript_lines, strip_time_alignment,
    WerConfig, WerPolicy,
};
pub use engine::{LineWer, WerEngine, WerReport};
pub use error::WerError;
pub use tokenizers::{AnnotationTokenizer, CharacterTokenizer, Token, Tokenizer};
pub use wer::{word_error_rate, WerResult};

/// Process-wide catalog for the free functions below.
static DEFAULT_CATALOG: Lazy<AnnotationCatalog> = Lazy::new(AnnotationCatalog::new);

/// Extract every annotation present in `text`, using the default catalog.
pub fn extract_annotations(text: &str) -> BTreeSet<String> {
    DEFAULT_CATALOG.extract(text)
}

/// Token-level edit distance between two sequences.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    algorithm::edit_distance(a, b)
}

/// The canonical edit script transforming `a` into `b`.
pub fn align<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<EditOp> {
    align::align(a, b)
}

/// Compute the WER between two texts with the default configuration.
pub fn compute_wer(reference: &str, candidate: &str, config: Option<WerConfig>) -> WerResult {
    let engine = WerEngine::new(config.unwrap_or_default());
    engine.compute(reference, candidate)
}

/// Mark paired lines for side-by-side display with the default
/// configuration. Line lists are truncated to the shorter side.
pub fn mark_changes<S: AsRef<str>>(
    reference_lines: &[S],
    candidate_lines: &[S],
) -> (Vec<Vec<MarkedToken>>, Vec<Vec<MarkedToken>>) {
    WerEngine::default().mark_lines(reference_lines, candidate_lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_wer_default_config() {
        let result = compute_wer("this is test b a", "this is a test b", None);
        assert_eq!(result.edit_distance, 2);
        assert!((result.rate() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_compute_wer_with_config() {
        let config = WerConfig::new().with_policy(WerPolicy::LineByLine);
        let result = compute_wer("a b\nc d", "a b\nc e", Some(config));
        assert_eq!(result.edit_distance, 1);
        assert_eq!(result.reference_length, 4);
    }

    #[test]
    fn test_extract_annotations_free_function() {
        let found = extract_annotations("<I wanted> [/] &-um going");
        assert!(found.contains("<I wanted> [/]"));
        assert!(found.contains("&-um"));
    }

    #[test]
    fn test_mark_changes_per_line() {
        let reference = ["the cat sat", "the dog ran", "unpaired"];
        let candidate = ["the cat sat", "the dog walked"];
        let (marked_ref, marked_cand) = mark_changes(&reference, &candidate);

        assert_eq!(marked_ref.len(), 2);
        assert_eq!(marked_cand.len(), 2);
        assert_eq!(render(&marked_ref[1]), "the dog ran");
        assert_eq!(render(&marked_cand[1]), "the dog walked");
        assert_eq!(marked_ref[1].len(), marked_cand[1].len());
    }

    #[test]
    fn test_character_level_wer() {
        let config = WerConfig::new().with_tokenizer(Box::new(CharacterTokenizer));
        let result = compute_wer("smtih", "smith", Some(config));
        assert_eq!(result.edit_distance, 1);
        assert_eq!(result.reference_length, 5);
    }
}
