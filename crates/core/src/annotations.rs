//! Annotation catalog for CHAT-style transcript markup
//!
//! Spoken-language transcripts carry disfluency and convention markers
//! (retracing, fillers, overlaps, omissions, non-verbal activity, ...)
//! that must survive tokenization as atomic units. The catalog holds one
//! compiled pattern per marker family and extracts the union of all family
//! matches from a text. Families are additive: no family's matches are
//! filtered by another family, and the union is deduplicated at the end.

use std::collections::{BTreeSet, HashSet};

use regex::Regex;

/// One named annotation family with its compiled pattern.
struct Family {
    name: &'static str,
    pattern: Regex,
}

impl Family {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("invalid annotation pattern"),
        }
    }
}

/// The fixed set of annotation patterns, compiled once and shared
/// read-only across all comparisons.
pub struct AnnotationCatalog {
    families: Vec<Family>,
    /// `yyy`/`xxx` vocalizations keep only the `[=! ...]` payload.
    vocalization: Regex,
    vocalization_payload: Regex,
    /// Shortened parenthetical forms like `(a)bout` are validated against
    /// whole whitespace-separated words, not free substrings.
    shortened_word: Regex,
}

impl AnnotationCatalog {
    pub fn new() -> Self {
        let families = vec![
            Family::new("retracing", r"<[^>]+> \[//\]|<[^>]+> \[/\]"),
            Family::new("retracing_single_word", r"\b\w+\b \[/\]"),
            Family::new(
                "retracing_with_fillers",
                r"<[^>]+> \[/\] \(.*?\) &-[a-z]+ \[.*?\]",
            ),
            Family::new("interposed_word", r"&\*[A-Z]{3}:[a-zA-Z]+"),
            Family::new("overlap_follows", r"<[a-zA-Z ]+> \[>\]"),
            Family::new("overlap_precedes", r"<[a-zA-Z ]+> \[<\]"),
            Family::new("filler", r"&-[a-zA-Z_]+"),
            Family::new("frozen_phrase", r"\b\w+(?:_\w+)+\b"),
            Family::new("replacement", r"\[: [^\]]+\]"),
            Family::new("omitted_word", r"\b0\w+\b"),
            Family::new("word_fragment", r"&\+\w+"),
            Family::new("nonverbal_activity", r"&=\w+(?::\w+)?"),
        ];

        Self {
            families,
            vocalization: Regex::new(r"\b(?:yyy|xxx)\b \[=! [^\]]+\]")
                .expect("invalid annotation pattern"),
            vocalization_payload: Regex::new(r"\[=! [^\]]+\]")
                .expect("invalid annotation pattern"),
            shortened_word: Regex::new(r"^\(?\w*\(?\w+\)?\w*\)?$")
                .expect("invalid annotation pattern"),
        }
    }

    /// Names of all annotation families, in match order.
    pub fn family_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.families.iter().map(|family| family.name).collect();
        names.push("vocalization");
        names.push("shortened_word");
        names
    }

    /// Extract every annotation substring present in `text`.
    ///
    /// Returns the deduplicated union of all family matches. The set never
    /// contains empty strings; a text with no annotations yields an empty
    /// set. Extraction is deterministic: the same text always produces the
    /// identical set.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let mut matches = BTreeSet::new();

        for family in &self.families {
            for found in family.pattern.find_iter(text) {
                if !found.as_str().is_empty() {
                    matches.insert(found.as_str().to_string());
                }
            }
        }

        // Vocalizations contribute only their bracketed payload.
        for found in self.vocalization.find_iter(text) {
            if let Some(payload) = self.vocalization_payload.find(found.as_str()) {
                matches.insert(payload.as_str().to_string());
            }
        }

        // Shortened forms must cover a whole word and carry a parenthesis.
        for word in text.split_whitespace() {
            if (word.contains('(') || word.contains(')')) && self.shortened_word.is_match(word) {
                matches.insert(word.to_string());
            }
        }

        matches
    }
}

impl Default for AnnotationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// The immutable set of strings a tokenizer must never split.
///
/// Built once per comparison from the extracted annotations of both texts
/// plus the fixed-annotation list, then shared read-only across all line
/// workers. Entries are unique, non-empty, and ordered longest-first so a
/// greedy tokenizer can take the first prefix hit as the longest match.
#[derive(Debug, Clone, Default)]
pub struct ProtectedVocabulary {
    entries: Vec<String>,
    lookup: HashSet<String>,
}

impl ProtectedVocabulary {
    /// Build the vocabulary from one extraction pass over each text plus
    /// the fixed annotations. Duplicates and empty strings are dropped.
    pub fn build(catalog: &AnnotationCatalog, texts: &[&str], fixed: &[String]) -> Self {
        let mut set: BTreeSet<String> = BTreeSet::new();
        for text in texts {
            set.extend(catalog.extract(text));
        }
        set.extend(fixed.iter().filter(|s| !s.is_empty()).cloned());

        let mut entries: Vec<String> = set.into_iter().collect();
        entries.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        let lookup = entries.iter().cloned().collect();

        Self { entries, lookup }
    }

    /// Vocabulary entries, longest-first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn contains(&self, token: &str) -> bool {
        self.lookup.contains(token)
    }

    /// Whether any entry is a prefix of `text`.
    pub fn matches_prefix(&self, text: &str) -> bool {
        self.entries.iter().any(|entry| text.starts_with(entry.as_str()))
    }

    /// The longest entry that is a prefix of `text`, if any.
    pub fn longest_prefix<'a>(&'a self, text: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|entry| text.starts_with(entry.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
