//! Alignment backtracking and marked rendering
//!
//! Recovers one canonical edit script from the cost matrix and turns it
//! into two parallel, length-reconciled token sequences suitable for
//! side-by-side display. The backtrack is deterministic: at every cell
//! the first applicable rule wins, in the fixed order match, substitute,
//! insert, delete, transpose.

use serde::Serialize;

use crate::algorithm::cost_matrix;

/// One step of the edit script transforming the reference into the
/// candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Token present unchanged in both sequences.
    Match(String),
    /// Reference token replaced by a candidate token.
    Substitute { from: String, to: String },
    /// Token present only in the candidate.
    Insert(String),
    /// Token present only in the reference.
    Delete(String),
    /// Adjacent pair swapped; fields are in reference order.
    Transpose(String, String),
}

/// Align `a` (reference) against `b` (candidate).
///
/// Returns the edit script in left-to-right order. The same input pair
/// always yields the same script.
pub fn align<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<EditOp> {
    let a: Vec<&str> = a.iter().map(AsRef::as_ref).collect();
    let b: Vec<&str> = b.iter().map(AsRef::as_ref).collect();
    let matrix = cost_matrix(&a, &b);

    let mut ops = Vec::with_capacity(a.len().max(b.len()));
    let mut i = a.len();
    let mut j = b.len();

    while i > 0 || j > 0 {
        let here = matrix.get(i, j);

        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            ops.push(EditOp::Match(a[i - 1].to_string()));
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && here == matrix.get(i - 1, j - 1) + 1 {
            ops.push(EditOp::Substitute {
                from: a[i - 1].to_string(),
                to: b[j - 1].to_string(),
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && here == matrix.get(i, j - 1) + 1 {
            ops.push(EditOp::Insert(b[j - 1].to_string()));
            j -= 1;
        } else if i > 0 && here == matrix.get(i - 1, j) + 1 {
            ops.push(EditOp::Delete(a[i - 1].to_string()));
            i -= 1;
        } else {
            // Only a transposition cell can reach here.
            debug_assert!(
                i > 1 && j > 1
                    && a[i - 1] == b[j - 2]
                    && a[i - 2] == b[j - 1]
                    && here == matrix.get(i - 2, j - 2) + 1
            );
            ops.push(EditOp::Transpose(
                a[i - 2].to_string(),
                a[i - 1].to_string(),
            ));
            i -= 2;
            j -= 2;
        }
    }

    ops.reverse();
    ops
}

/// Replay an edit script, producing the candidate sequence.
pub fn apply(ops: &[EditOp]) -> Vec<String> {
    let mut out = Vec::with_capacity(ops.len());
    for op in ops {
        match op {
            EditOp::Match(token) | EditOp::Insert(token) => out.push(token.clone()),
            EditOp::Substitute { to, .. } => out.push(to.clone()),
            EditOp::Delete(_) => {}
            EditOp::Transpose(first, second) => {
                out.push(second.clone());
                out.push(first.clone());
            }
        }
    }
    out
}

/// How a display cell relates to its counterpart on the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkTag {
    Match,
    Substitute,
    Insert,
    Delete,
}

/// One cell of a marked sequence: the token text (or a gap placeholder)
/// and its tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkedToken {
    pub text: String,
    pub tag: MarkTag,
}

impl MarkedToken {
    fn new(text: impl Into<String>, tag: MarkTag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }

    /// A gap standing in for `token`, dashed to the same character width
    /// so monospaced columns stay aligned.
    fn gap(token: &str, tag: MarkTag) -> Self {
        Self::new("-".repeat(token.chars().count()), tag)
    }
}

/// Produce two parallel marked sequences for `a` and `b`.
///
/// Both sides have the same length: insertions add a gap on the `a`
/// side, deletions a gap on the `b` side. A transposed pair appears on
/// both sides as two substitute cells, each side in its own order.
pub fn mark<S: AsRef<str>>(a: &[S], b: &[S]) -> (Vec<MarkedToken>, Vec<MarkedToken>) {
    let ops = align(a, b);
    let mut marked_a = Vec::with_capacity(ops.len());
    let mut marked_b = Vec::with_capacity(ops.len());

    for op in &ops {
        match op {
            EditOp::Match(token) => {
                marked_a.push(MarkedToken::new(token, MarkTag::Match));
                marked_b.push(MarkedToken::new(token, MarkTag::Match));
            }
            EditOp::Substitute { from, to } => {
                marked_a.push(MarkedToken::new(from, MarkTag::Substitute));
                marked_b.push(MarkedToken::new(to, MarkTag::Substitute));
            }
            EditOp::Insert(token) => {
                marked_a.push(MarkedToken::gap(token, MarkTag::Insert));
                marked_b.push(MarkedToken::new(token, MarkTag::Insert));
            }
            EditOp::Delete(token) => {
                marked_a.push(MarkedToken::new(token, MarkTag::Delete));
                marked_b.push(MarkedToken::gap(token, MarkTag::Delete));
            }
            EditOp::Transpose(first, second) => {
                marked_a.push(MarkedToken::new(first, MarkTag::Substitute));
                marked_a.push(MarkedToken::new(second, MarkTag::Substitute));
                marked_b.push(MarkedToken::new(second, MarkTag::Substitute));
                marked_b.push(MarkedToken::new(first, MarkTag::Substitute));
            }
        }
    }

    (marked_a, marked_b)
}

/// Render a marked sequence as one space-joined line.
pub fn render(marked: &[MarkedToken]) -> String {
    marked
        .iter()
        .map(|cell| cell.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
