//! Statistical primitives shared by every detector
//!
//! Pearson correlation over series with gaps, gap-tolerant mean, and
//! frequent tag-pair mining. All functions are total: degenerate input
//! yields a neutral value instead of an error or NaN.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum number of paired observations before a correlation is computed
pub const MIN_CORRELATION_PAIRS: usize = 5;

/// Minimum co-occurrences for a tag pair to be reported
pub const MIN_PAIR_COUNT: usize = 3;

/// Pearson correlation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Pearson r, clamped to [-1, 1]
    pub coefficient: f64,
    /// Closed-form approximation of two-tailed significance.
    ///
    /// Advisory only: `exp(-0.717|t| - 0.396t²)` is not a Student's-t CDF.
    pub p_value: f64,
    /// Number of pairs where both sides were present
    pub sample_size: usize,
}

impl Correlation {
    /// "No signal" result for insufficient or degenerate data
    fn no_signal(sample_size: usize) -> Self {
        Self {
            coefficient: 0.0,
            p_value: 1.0,
            sample_size,
        }
    }
}

/// Pearson correlation between two aligned series with missing entries
///
/// Pairs where either side is `None` or NaN are discarded. Fewer than
/// [`MIN_CORRELATION_PAIRS`] remaining pairs gives `{0, 1, n}`. A series with
/// no variance gives coefficient 0. Series of unequal length are compared
/// over their common prefix.
pub fn calculate_correlation(x: &[Option<f64>], y: &[Option<f64>]) -> Correlation {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(xi, yi)| match (xi, yi) {
            (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
            _ => None,
        })
        .collect();

    let n = pairs.len();
    if n < MIN_CORRELATION_PAIRS {
        return Correlation::no_signal(n);
    }

    let nf = n as f64;
    let sum_x: f64 = pairs.iter().map(|p| p.0).sum();
    let sum_y: f64 = pairs.iter().map(|p| p.1).sum();
    let sum_xy: f64 = pairs.iter().map(|p| p.0 * p.1).sum();
    let sum_x2: f64 = pairs.iter().map(|p| p.0 * p.0).sum();
    let sum_y2: f64 = pairs.iter().map(|p| p.1 * p.1).sum();

    let numerator = nf * sum_xy - sum_x * sum_y;
    let denominator = ((nf * sum_x2 - sum_x * sum_x) * (nf * sum_y2 - sum_y * sum_y)).sqrt();

    let raw = if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    };

    // Overflowing sums (inf - inf) surface as NaN; treat as no signal
    let coefficient = if raw.is_finite() {
        raw.clamp(-1.0, 1.0)
    } else {
        0.0
    };

    Correlation {
        coefficient,
        p_value: approximate_p_value(coefficient, n),
        sample_size: n,
    }
}

/// Heuristic significance from the t-statistic of r
///
/// |r| = 1 drives t to infinity and the value to 0.
fn approximate_p_value(r: f64, n: usize) -> f64 {
    let t_stat = r * ((n as f64 - 2.0) / (1.0 - r * r)).sqrt();
    let p = (-0.717 * t_stat.abs() - 0.396 * t_stat * t_stat).exp();
    if p.is_nan() {
        1.0
    } else {
        p
    }
}

/// Mean of the present, non-NaN entries; 0 when there are none
pub fn calculate_average(values: &[Option<f64>]) -> f64 {
    let (sum, count) = values
        .iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Two tags observed together in the same log, and how often
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequentPair {
    /// Lexicographically smaller tag name
    pub first: String,
    pub second: String,
    pub count: usize,
}

/// Count unordered tag pairs co-occurring within each group
///
/// Returns pairs seen at least [`MIN_PAIR_COUNT`] times, most frequent first.
/// Pair names are sorted, so (a, b) and (b, a) are the same pair; equal
/// counts are ordered by pair name, which makes the result independent of
/// tag order and group order.
pub fn find_frequent_pairs<S: AsRef<str>>(groups: &[Vec<S>]) -> Vec<FrequentPair> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();

    for group in groups {
        if group.len() < 2 {
            continue;
        }
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                let (a, b) = (a.as_ref(), b.as_ref());
                let key = if a <= b {
                    (a.to_string(), b.to_string())
                } else {
                    (b.to_string(), a.to_string())
                };
                *counts.entry(key).or_default() += 1;
            }
        }
    }

    let mut pairs: Vec<FrequentPair> = counts
        .into_iter()
        .filter(|(_, count)| *count >= MIN_PAIR_COUNT)
        .map(|((first, second), count)| FrequentPair {
            first,
            second,
            count,
        })
        .collect();

    // Stable: ties keep key order from the BTreeMap
    pairs.sort_by(|a, b| b.count.cmp(&a.count));
    pairs
}
