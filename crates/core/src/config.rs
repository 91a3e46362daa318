//! Configuration for the WER engine

use std::fs;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::WerError;
use crate::tokenizers::Tokenizer;

/// CHAT time-alignment markers: a NAK byte, two underscore-joined tick
/// counts, a closing NAK.
static TIME_ALIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{15}\\d+_\\d+\u{15}").expect("invalid time-alignment pattern"));

/// Comparison policy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WerPolicy {
    /// Join all lines into one sequence and compare once (default).
    WholeText,
    /// Compare line pairs independently; extra lines on the longer side
    /// are dropped.
    LineByLine,
    /// Whole-text comparison restricted to protected-vocabulary tokens.
    AnnotationOnlyWholeText,
    /// Line-by-line comparison restricted to protected-vocabulary tokens.
    AnnotationOnlyLineByLine,
}

impl Default for WerPolicy {
    fn default() -> Self {
        Self::WholeText
    }
}

impl WerPolicy {
    /// Whether this policy compares per line rather than whole-text.
    pub fn is_line_by_line(&self) -> bool {
        matches!(self, Self::LineByLine | Self::AnnotationOnlyLineByLine)
    }

    /// Whether this policy keeps only protected-vocabulary tokens.
    pub fn is_annotation_only(&self) -> bool {
        matches!(
            self,
            Self::AnnotationOnlyWholeText | Self::AnnotationOnlyLineByLine
        )
    }
}

/// Configuration for WER computation
#[derive(Clone)]
pub struct WerConfig {
    /// Comparison policy to apply
    pub policy: WerPolicy,

    /// Literal tokens always added to the protected vocabulary
    pub fixed_annotations: Vec<String>,

    /// Tokenizer to use (`AnnotationTokenizer` when unset)
    pub tokenizer: Option<Box<dyn Tokenizer>>,

    /// Minimum line count before line-by-line comparison fans out to
    /// worker threads
    pub parallel_line_threshold: usize,
}

impl Default for WerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl WerConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            policy: WerPolicy::default(),
            fixed_annotations: Vec::new(),
            tokenizer: None,
            parallel_line_threshold: 32,
        }
    }

    /// Set the comparison policy
    pub fn with_policy(mut self, policy: WerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the fixed-annotation list
    pub fn with_fixed_annotations(mut self, annotations: Vec<String>) -> Self {
        self.fixed_annotations = annotations;
        self
    }

    /// Load the fixed-annotation list from a file
    pub fn with_fixed_annotations_file(mut self, path: impl AsRef<Path>) -> Result<Self, WerError> {
        self.fixed_annotations = load_fixed_annotations(path)?;
        Ok(self)
    }

    /// Set the tokenizer
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Set the line count above which line pairs are compared in parallel
    pub fn with_parallel_line_threshold(mut self, threshold: usize) -> Self {
        self.parallel_line_threshold = threshold;
        self
    }
}

/// Load a fixed-annotation list: one literal token per line, blank lines
/// skipped. Duplicates are permitted here; the protected vocabulary
/// deduplicates when it is built.
pub fn load_fixed_annotations(path: impl AsRef<Path>) -> Result<Vec<String>, WerError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|source| WerError::io("reading fixed annotations", source))?;

    let annotations: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!(
        "loaded {} fixed annotations from {}",
        annotations.len(),
        path.display()
    );
    Ok(annotations)
}

/// Remove CHAT time-alignment markers from a line.
pub fn strip_time_alignment(line: &str) -> String {
    TIME_ALIGNMENT.replace_all(line, "").trim().to_string()
}

/// Extract utterance lines from CHAT transcript text.
///
/// With `Some(prefix)` (e.g. `"*CHI:"`) only lines starting with that
/// prefix are kept, prefix stripped; with `None` every line is kept.
/// Time-alignment markers are removed either way and blank results are
/// dropped.
pub fn extract_speaker_lines(text: &str, speaker: Option<&str>) -> Vec<String> {
    text.lines()
        .filter_map(|line| match speaker {
            Some(prefix) => line.strip_prefix(prefix),
            None => Some(line),
        })
        .map(strip_time_alignment)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Load a transcript file and extract one speaker's lines.
pub fn load_transcript_lines(
    path: impl AsRef<Path>,
    speaker: Option<&str>,
) -> Result<Vec<String>, WerError> {
    if let Some(prefix) = speaker {
        if prefix.is_empty() {
            return Err(WerError::invalid_input("speaker prefix must be non-empty"));
        }
    }

    let path = path.as_ref();
    let content =
        fs::read_to_string(path).map_err(|source| WerError::io("reading transcript", source))?;
    let lines = extract_speaker_lines(&content, speaker);

    debug!(
        "extracted {} lines for speaker {:?} from {}",
        lines.len(),
        speaker,
        path.display()
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WerConfig::new();
        assert_eq!(config.policy, WerPolicy::WholeText);
        assert!(config.fixed_annotations.is_empty());
        assert!(config.tokenizer.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = WerConfig::new()
            .with_policy(WerPolicy::AnnotationOnlyLineByLine)
            .with_fixed_annotations(vec!["[?]".to_string()])
            .with_parallel_line_threshold(8);

        assert_eq!(config.policy, WerPolicy::AnnotationOnlyLineByLine);
        assert_eq!(config.fixed_annotations, vec!["[?]".to_string()]);
        assert_eq!(config.parallel_line_threshold, 8);
    }

    #[test]
    fn test_policy_predicates() {
        assert!(WerPolicy::LineByLine.is_line_by_line());
        assert!(!WerPolicy::WholeText.is_line_by_line());
        assert!(WerPolicy::AnnotationOnlyWholeText.is_annotation_only());
        assert!(!WerPolicy::LineByLine.is_annotation_only());
    }

    #[test]
    fn test_load_fixed_annotations() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "&-um").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "<I wanted> [/]").unwrap();
        writeln!(file, "&-um").unwrap();

        let annotations = load_fixed_annotations(file.path()).unwrap();
        assert_eq!(annotations, vec!["&-um", "<I wanted> [/]", "&-um"]);
    }

    #[test]
    fn test_load_fixed_annotations_missing_file() {
        let err = load_fixed_annotations("/nonexistent/annotations.txt").unwrap_err();
        assert!(matches!(err, WerError::Io { .. }));
    }

    #[test]
    fn test_strip_time_alignment() {
        let line = format!("now the rabbit can dump . {}1234_5678{}", '\u{15}', '\u{15}');
        assert_eq!(strip_time_alignment(&line), "now the rabbit can dump .");
        assert_eq!(strip_time_alignment("no markers"), "no markers");
    }

    #[test]
    fn test_extract_speaker_lines() {
        let text = "@Begin\n*CHI:\tI wanted to go .\n*INV:\tmhm .\n*CHI:\tand then we left .\n@End";
        let lines = extract_speaker_lines(text, Some("*CHI:"));
        assert_eq!(lines, vec!["I wanted to go .", "and then we left ."]);
    }

    #[test]
    fn test_extract_all_lines_without_speaker() {
        let text = "first line\nsecond line\n";
        let lines = extract_speaker_lines(text, None);
        assert_eq!(lines, vec!["first line", "second line"]);
    }

    #[test]
    fn test_load_transcript_rejects_empty_prefix() {
        let err = load_transcript_lines("/nonexistent.cha", Some("")).unwrap_err();
        assert!(matches!(err, WerError::InvalidInput { .. }));
    }
}
