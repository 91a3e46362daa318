//! Word error rate over aligned token sequences

use serde::Serialize;

use crate::algorithm::edit_distance;

/// The outcome of one reference/candidate comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WerResult {
    /// Token-level edit distance between the two sequences.
    pub edit_distance: usize,
    /// Number of tokens in the reference sequence.
    pub reference_length: usize,
}

impl WerResult {
    pub fn new(edit_distance: usize, reference_length: usize) -> Self {
        Self {
            edit_distance,
            reference_length,
        }
    }

    /// The error rate: distance divided by reference length.
    ///
    /// Two empty sequences compare at `0.0`. An empty reference against a
    /// non-empty candidate yields `f64::INFINITY` rather than a panic or
    /// an arbitrary cap.
    pub fn rate(&self) -> f64 {
        if self.reference_length > 0 {
            self.edit_distance as f64 / self.reference_length as f64
        } else if self.edit_distance == 0 {
            0.0
        } else {
            f64::INFINITY
        }
    }

    /// The rate rounded to `places` decimal places, for reporting.
    pub fn rounded_rate(&self, places: u32) -> f64 {
        let factor = 10f64.powi(places as i32);
        (self.rate() * factor).round() / factor
    }
}

/// Compute the WER between two already-tokenized sequences.
pub fn word_error_rate<S: AsRef<str>>(reference: &[S], candidate: &[S]) -> WerResult {
    let reference: Vec<&str> = reference.iter().map(AsRef::as_ref).collect();
    let candidate: Vec<&str> = candidate.iter().map(AsRef::as_ref).collect();
    WerResult::new(edit_distance(&reference, &candidate), reference.len())
}
