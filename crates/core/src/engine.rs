//! WER engine that orchestrates the comparison process

use std::thread;

use log::debug;
use serde::Serialize;

use crate::align::{mark, MarkedToken};
use crate::annotations::{AnnotationCatalog, ProtectedVocabulary};
use crate::config::WerConfig;
use crate::tokenizers::{AnnotationTokenizer, Token, Tokenizer};
use crate::wer::{word_error_rate, WerResult};

/// WER for one paired line in a line-by-line comparison.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LineWer {
    /// Zero-based line index in the truncated pairing.
    pub index: usize,
    pub result: WerResult,
}

/// Overall and per-line results of one comparison.
#[derive(Debug, Clone, Serialize)]
pub struct WerReport {
    /// Whole-text result over all lines joined with single spaces.
    pub overall: WerResult,
    /// One entry per paired line.
    pub lines: Vec<LineWer>,
    /// Unpaired trailing lines dropped from the longer side.
    pub dropped_lines: usize,
}

/// The main WER engine
pub struct WerEngine {
    config: WerConfig,
    catalog: AnnotationCatalog,
}

impl WerEngine {
    /// Create a new WER engine with the given configuration
    pub fn new(config: WerConfig) -> Self {
        Self {
            config,
            catalog: AnnotationCatalog::new(),
        }
    }

    /// Create a WER engine with the default configuration
    pub fn default_config() -> Self {
        Self::new(WerConfig::default())
    }

    pub fn config(&self) -> &WerConfig {
        &self.config
    }

    /// Compute the WER between a reference and a candidate text under the
    /// configured policy.
    ///
    /// The steps are the same for every policy:
    /// 1. Extract annotations from both texts and build the protected
    ///    vocabulary (one pass, shared read-only afterwards)
    /// 2. Tokenize, keeping protected strings atomic
    /// 3. Compare whole-text or per line pair, per the policy
    pub fn compute(&self, reference: &str, candidate: &str) -> WerResult {
        let vocabulary = self.vocabulary(reference, candidate);
        let tokenizer = self.tokenizer();

        if self.config.policy.is_line_by_line() {
            let (results, _) = self.line_results(reference, candidate, &vocabulary, tokenizer.as_ref());
            aggregate(&results)
        } else {
            let a = self.text_tokens(reference, &vocabulary, tokenizer.as_ref());
            let b = self.text_tokens(candidate, &vocabulary, tokenizer.as_ref());
            word_error_rate(&a, &b)
        }
    }

    /// Compute the whole-text result and every per-line result in one
    /// call, sharing a single vocabulary build.
    pub fn compute_report(&self, reference: &str, candidate: &str) -> WerReport {
        let vocabulary = self.vocabulary(reference, candidate);
        let tokenizer = self.tokenizer();

        let a = self.text_tokens(reference, &vocabulary, tokenizer.as_ref());
        let b = self.text_tokens(candidate, &vocabulary, tokenizer.as_ref());
        let overall = word_error_rate(&a, &b);

        let (results, dropped_lines) =
            self.line_results(reference, candidate, &vocabulary, tokenizer.as_ref());
        let lines = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| LineWer { index, result })
            .collect();

        WerReport {
            overall,
            lines,
            dropped_lines,
        }
    }

    /// Produce the two parallel marked sequences for side-by-side display.
    ///
    /// Marking always shows every token, even under an annotation-only
    /// policy: the rendering exists to explain the texts, not the rate.
    pub fn mark_changes(
        &self,
        reference: &str,
        candidate: &str,
    ) -> (Vec<MarkedToken>, Vec<MarkedToken>) {
        let vocabulary = self.vocabulary(reference, candidate);
        let tokenizer = self.tokenizer();
        let a = tokenizer.tokenize(&join_lines(reference), &vocabulary);
        let b = tokenizer.tokenize(&join_lines(candidate), &vocabulary);
        mark(&a, &b)
    }

    /// Mark paired lines for side-by-side display, truncating to the
    /// shorter side like the line-by-line policies do.
    pub fn mark_lines<S: AsRef<str>>(
        &self,
        reference_lines: &[S],
        candidate_lines: &[S],
    ) -> (Vec<Vec<MarkedToken>>, Vec<Vec<MarkedToken>>) {
        let texts: Vec<&str> = reference_lines
            .iter()
            .chain(candidate_lines.iter())
            .map(AsRef::as_ref)
            .collect();
        let vocabulary = ProtectedVocabulary::build(
            &self.catalog,
            &texts,
            &self.config.fixed_annotations,
        );
        let tokenizer = self.tokenizer();

        let shared = reference_lines.len().min(candidate_lines.len());
        let mut marked_ref = Vec::with_capacity(shared);
        let mut marked_cand = Vec::with_capacity(shared);
        for (r, c) in reference_lines[..shared].iter().zip(&candidate_lines[..shared]) {
            let a = tokenizer.tokenize(r.as_ref(), &vocabulary);
            let b = tokenizer.tokenize(c.as_ref(), &vocabulary);
            let (ma, mb) = mark(&a, &b);
            marked_ref.push(ma);
            marked_cand.push(mb);
        }

        (marked_ref, marked_cand)
    }

    fn vocabulary(&self, reference: &str, candidate: &str) -> ProtectedVocabulary {
        ProtectedVocabulary::build(
            &self.catalog,
            &[reference, candidate],
            &self.config.fixed_annotations,
        )
    }

    fn tokenizer(&self) -> Box<dyn Tokenizer> {
        self.config
            .tokenizer
            .as_ref()
            .map(|t| t.clone_box())
            .unwrap_or_else(|| Box::new(AnnotationTokenizer::new()))
    }

    fn text_tokens(
        &self,
        text: &str,
        vocabulary: &ProtectedVocabulary,
        tokenizer: &dyn Tokenizer,
    ) -> Vec<Token> {
        let mut tokens = tokenizer.tokenize(&join_lines(text), vocabulary);
        if self.config.policy.is_annotation_only() {
            tokens.retain(|token| token.protected);
            // A text with no annotations still needs one comparable token.
            if tokens.is_empty() {
                tokens.push(Token::new(" ", false, 0));
            }
        }
        tokens
    }

    fn line_tokens(
        &self,
        line: &str,
        vocabulary: &ProtectedVocabulary,
        tokenizer: &dyn Tokenizer,
    ) -> Vec<Token> {
        let mut tokens = tokenizer.tokenize(line, vocabulary);
        if self.config.policy.is_annotation_only() {
            tokens.retain(|token| token.protected);
            // A line with no annotations still needs one comparable token.
            if tokens.is_empty() {
                tokens.push(Token::new(" ", false, 0));
            }
        }
        tokens
    }

    /// Compare paired lines, truncating to the shorter side. Above the
    /// configured threshold the pairs fan out across worker threads;
    /// results land in pre-assigned slots, so ordering is preserved.
    fn line_results(
        &self,
        reference: &str,
        candidate: &str,
        vocabulary: &ProtectedVocabulary,
        tokenizer: &dyn Tokenizer,
    ) -> (Vec<WerResult>, usize) {
        let ref_lines: Vec<&str> = reference.lines().map(str::trim).collect();
        let cand_lines: Vec<&str> = candidate.lines().map(str::trim).collect();
        let shared = ref_lines.len().min(cand_lines.len());
        let dropped = ref_lines.len().max(cand_lines.len()) - shared;
        if dropped > 0 {
            debug!("dropping {dropped} unpaired trailing lines");
        }

        let pairs: Vec<(Vec<Token>, Vec<Token>)> = ref_lines[..shared]
            .iter()
            .zip(&cand_lines[..shared])
            .map(|(r, c)| {
                (
                    self.line_tokens(r, vocabulary, tokenizer),
                    self.line_tokens(c, vocabulary, tokenizer),
                )
            })
            .collect();

        let mut results = vec![WerResult::new(0, 0); pairs.len()];
        if pairs.len() < self.config.parallel_line_threshold.max(2) {
            for (slot, (r, c)) in results.iter_mut().zip(&pairs) {
                *slot = word_error_rate(r, c);
            }
        } else {
            let workers = thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(pairs.len());
            let chunk = pairs.len().div_ceil(workers);
            debug!("comparing {} line pairs across {workers} workers", pairs.len());
            thread::scope(|scope| {
                for (out, work) in results.chunks_mut(chunk).zip(pairs.chunks(chunk)) {
                    scope.spawn(move || {
                        for (slot, (r, c)) in out.iter_mut().zip(work) {
                            *slot = word_error_rate(r, c);
                        }
                    });
                }
            });
        }

        (results, dropped)
    }
}

impl Default for WerEngine {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Collapse a multi-line text into one line joined with single spaces.
fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn aggregate(results: &[WerResult]) -> WerResult {
    results.iter().fold(WerResult::new(0, 0), |acc, result| {
        WerResult::new(
            acc.edit_distance + result.edit_distance,
            acc.reference_length + result.reference_length,
        )
    })
}
