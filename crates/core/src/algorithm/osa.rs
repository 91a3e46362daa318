//! Optimal string alignment distance over token sequences

use super::{trim_common_affixes, CostMatrix};

/// Compute the OSA edit distance between two token sequences.
///
/// Uses three rolling rows, after trimming the common prefix and suffix.
/// Tokens compare by exact equality; each insertion, deletion,
/// substitution, and adjacent transposition costs 1.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (a, b) = trim_common_affixes(a, b);
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let cols = b.len() + 1;
    let mut two_back = vec![0usize; cols];
    let mut prev: Vec<usize> = (0..cols).collect();
    let mut current = vec![0usize; cols];

    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (prev[j] + 1)
                .min(current[j - 1] + 1)
                .min(prev[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(two_back[j - 2] + 1);
            }
            current[j] = best;
        }
        std::mem::swap(&mut two_back, &mut prev);
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}

/// Compute the full cost matrix for `a` -> `b`, for backtracking.
///
/// `cost[i][j]` is the distance between the first `i` tokens of `a` and
/// the first `j` tokens of `b`; `cost[m][n]` is the edit distance. No
/// affix trimming here: the alignment needs every cell.
pub fn cost_matrix<T: PartialEq>(a: &[T], b: &[T]) -> CostMatrix {
    let mut matrix = CostMatrix::with_base_cases(a.len() + 1, b.len() + 1);

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (matrix.get(i - 1, j) + 1)
                .min(matrix.get(i, j - 1) + 1)
                .min(matrix.get(i - 1, j - 1) + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(matrix.get(i - 2, j - 2) + 1);
            }
            matrix.set(i, j, best);
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_identity() {
        let s = words("this is a test");
        assert_eq!(edit_distance(&s, &s), 0);
        assert_eq!(edit_distance::<&str>(&[], &[]), 0);
    }

    #[test]
    fn test_empty_against_non_empty() {
        let b = words("one two three");
        assert_eq!(edit_distance::<&str>(&[], &b), 3);
        assert_eq!(edit_distance(&b, &[]), 3);
    }

    #[test]
    fn test_adjacent_transposition_costs_one() {
        assert_eq!(edit_distance(&["x", "y"], &["y", "x"]), 1);
    }

    #[test]
    fn test_character_granularity() {
        assert_eq!(edit_distance(&chars("smtih"), &chars("smith")), 1);
        assert_eq!(edit_distance(&chars("kitten"), &chars("sitting")), 3);
    }

    #[test]
    fn test_reordered_words() {
        let reference = words("this is test b a");
        let candidate = words("this is a test b");
        assert_eq!(edit_distance(&reference, &candidate), 2);
    }

    #[test]
    fn test_symmetry() {
        let cases = [
            ("this is test b a", "this is a test b"),
            ("now the rabbits can dump", "and now the rabbit is dumping"),
            ("x y", "y x"),
            ("", "a b c"),
        ];
        for (left, right) in cases {
            let a = words(left);
            let b = words(right);
            assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
        }
    }

    #[test]
    fn test_triangle_inequality() {
        let a = words("the cat sat on the mat");
        let b = words("the dog sat on a mat");
        let c = words("a dog stood on a mat");
        let ab = edit_distance(&a, &b);
        let bc = edit_distance(&b, &c);
        let ac = edit_distance(&a, &c);
        assert!(ac <= ab + bc);
    }

    #[test]
    fn test_length_bounds() {
        let a = words("one two three four");
        let b = words("five six");
        let d = edit_distance(&a, &b);
        assert!(d <= a.len().max(b.len()));
        assert!(d >= a.len().abs_diff(b.len()));
    }

    #[test]
    fn test_matrix_agrees_with_rolling_distance() {
        let cases = [
            ("this is test b a", "this is a test b"),
            ("the cat sat", "the cat sat"),
            ("x y", "y x"),
            ("a b c d", ""),
            ("now the rabbits can dump the sand", "and now the rabbit dumped sand"),
        ];
        for (left, right) in cases {
            let a = words(left);
            let b = words(right);
            assert_eq!(cost_matrix(&a, &b).distance(), edit_distance(&a, &b));
        }
    }

    #[test]
    fn test_transcript_example() {
        let reference = words("now the rabbits can dump the sand from the bucket onto the sand castle .");
        let candidate =
            words("and now (.) the rabbit (i)s going to [?] dump the sand from the bucket onto the sand castle .");
        assert_eq!(edit_distance(&reference, &candidate), 7);
    }
}
