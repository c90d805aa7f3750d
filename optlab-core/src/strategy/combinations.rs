//! Index-tuple generators over a strike ladder.
//!
//! These decide WHICH strike combinations are structurally valid; pricing a
//! combination lives in `builder`. Every generator yields strictly increasing
//! indices in lexicographic order, which is the enumeration order the ranker's
//! stable sort falls back to on ties.

/// Absolute tolerance when comparing butterfly wing widths.
pub const WING_TOLERANCE: f64 = 1e-9;

/// Every `(i, j)` with `i < j < n`.
pub fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Every `(i, j, k)` with `i < j < k < n`.
pub fn triples(n: usize) -> impl Iterator<Item = (usize, usize, usize)> {
    pairs(n).flat_map(move |(i, j)| (j + 1..n).map(move |k| (i, j, k)))
}

/// Every `(i, j, k, l)` with `i < j < k < l < n`.
pub fn quadruples(n: usize) -> impl Iterator<Item = (usize, usize, usize, usize)> {
    triples(n).flat_map(move |(i, j, k)| (k + 1..n).map(move |l| (i, j, k, l)))
}

/// Whether `middle` sits exactly half-way between `lower` and `upper`.
pub fn has_equal_wings(lower: f64, middle: f64, upper: f64) -> bool {
    ((middle - lower) - (upper - middle)).abs() <= WING_TOLERANCE
}

/// Triples over an ascending strike list whose wings are equal width.
/// Asymmetric triples are skipped, not reported.
pub fn butterfly_triples(strikes: &[f64]) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
    triples(strikes.len()).filter(move |&(i, j, k)| has_equal_wings(strikes[i], strikes[j], strikes[k]))
}

/// `n choose k`, used for capacity hints and sanity checks.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
}
