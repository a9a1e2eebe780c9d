//! Normalized string similarity for fuzzy label matching.

/// Levenshtein edit distance using the two-row O(min(m,n)) space algorithm.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a = s1.as_bytes();
    let b = s2.as_bytes();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Keep the shorter string in the inner loop to minimise allocation.
    let (a, b, m, n) = if m <= n { (a, b, m, n) } else { (b, a, n, m) };

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Edit-distance similarity on a 0–100 scale: 100 for identical strings,
/// 0 when every character differs. Case-sensitive — callers lowercase first.
pub fn similarity_ratio(s1: &str, s2: &str) -> f64 {
    if s1 == s2 {
        return 100.0;
    }
    let max_len = s1.len().max(s2.len());
    if max_len == 0 {
        return 100.0;
    }
    100.0 * (1.0 - levenshtein_distance(s1, s2) as f64 / max_len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_zero() {
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn empty_string_is_length_of_other() {
        assert_eq!(levenshtein_distance("", "total"), 5);
        assert_eq!(levenshtein_distance("total", ""), 5);
    }

    #[test]
    fn single_edits() {
        assert_eq!(levenshtein_distance("total", "tofal"), 1);
        assert_eq!(levenshtein_distance("total", "totall"), 1);
        assert_eq!(levenshtein_distance("total", "tota"), 1);
    }

    #[test]
    fn commutative() {
        assert_eq!(
            levenshtein_distance("summe", "zwischensumme"),
            levenshtein_distance("zwischensumme", "summe")
        );
    }

    #[test]
    fn ratio_identical_is_100() {
        assert_eq!(similarity_ratio("total", "total"), 100.0);
        assert_eq!(similarity_ratio("", ""), 100.0);
    }

    #[test]
    fn ratio_disjoint_is_0() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        assert_eq!(similarity_ratio("", "total"), 0.0);
    }

    #[test]
    fn ratio_stays_in_range() {
        for (a, b) in [("total", "tutal"), ("summe", "sum"), ("zu zahlen", "zahlen")] {
            let r = similarity_ratio(a, b);
            assert!((0.0..=100.0).contains(&r), "{a} vs {b}: {r}");
        }
    }

    #[test]
    fn ocr_noise_still_scores_high() {
        // One substitution in a five-letter word keeps the score above the
        // 65 label threshold.
        assert!(similarity_ratio("tota1", "total") > 65.0);
        assert!(similarity_ratio("summe:", "summe") > 65.0);
    }
}
