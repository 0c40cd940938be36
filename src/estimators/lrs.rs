//! Longest repeated substring (LRS) estimate.
//!
//! Grows the tuple length until no tuple repeats, bounding the collision
//! probability of each length from the number of matching pairs.

use super::{
    bound::ConfidenceBound,
    engine::{OccurrenceTable, RoundRule, RoundSummary, TupleSearch},
    log2_alphabet, require_alphabet, EstimateError,
};
use serde::Serialize;

/// Accounting for the LRS estimate: the statistic is the number of
/// ordered pairs of equal tuples, `sum C(C - 1)` over repeated tuples.
pub struct CollisionSum;

impl RoundRule for CollisionSum {
    const THRESHOLD: usize = 2;

    fn statistic<S: Ord>(table: &OccurrenceTable<'_, S>) -> u64 {
        table
            .counts()
            .filter(|&c| c >= 2)
            .map(|c| (c * (c - 1)) as u64)
            .sum()
    }

    fn round_entropy(statistic: u64, sample_len: usize, tuple_length: usize) -> Option<f64> {
        if statistic == 0 {
            return None;
        }
        let n = sample_len as f64;
        let l = tuple_length as f64;
        Some((-(statistic as f64).log2() + (n - l + 1.0).log2() + (n - l).log2()) / l)
    }
}

/// Result of the LRS estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LrsEstimate {
    /// Tuple length the search started at.
    pub u: usize,
    /// Tuple length at which no tuple repeated.
    pub v: usize,
    /// Smallest per-symbol entropy before the confidence bound.
    pub point_entropy: f64,
    /// Final min-entropy estimate in bits per symbol.
    pub min_entropy: f64,
    /// Confidence bound on the per-symbol collision probability.
    pub bound: ConfidenceBound,
    /// Rounds in which some tuple repeated.
    pub rounds: Vec<RoundSummary>,
}

/// Runs the LRS estimate over `sample`, starting at `starting_tuple_length`
/// (values below 1 start at 1).
pub fn lrs_estimate<S: Ord>(
    sample: &[S],
    alphabet_size: u32,
    starting_tuple_length: i64,
) -> Result<LrsEstimate, EstimateError> {
    require_alphabet(alphabet_size)?;

    // 1/k^2 < sum C(C-1) / n(n-1), so the per-symbol value stays below 2 log2(k)
    let ceiling = 2.0 * log2_alphabet(alphabet_size);
    let start = usize::try_from(starting_tuple_length).unwrap_or(0).max(1);

    let outcome = TupleSearch::new(sample, ceiling)
        .starting_at(start)
        .run::<CollisionSum>();
    let bound = ConfidenceBound::from_entropy(outcome.min_entropy, sample.len())?;

    tracing::debug!(
        u = outcome.start_length,
        v = outcome.final_length,
        p_max = bound.p_max,
        p_u = bound.p_upper,
        "LRS estimate"
    );

    Ok(LrsEstimate {
        u: outcome.start_length,
        v: outcome.final_length,
        point_entropy: outcome.min_entropy,
        min_entropy: bound.min_entropy(),
        bound,
        rounds: outcome.rounds,
    })
}
