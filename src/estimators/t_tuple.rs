//! t-Tuple estimate.
//!
//! Finds the most common tuple at each length while it still occurs at
//! least [`MaxCount::THRESHOLD`] times, and takes the smallest per-symbol
//! entropy implied by its frequency.

use super::{
    bound::ConfidenceBound,
    engine::{OccurrenceTable, RoundRule, RoundSummary, TupleSearch},
    log2_alphabet, require_alphabet, EstimateError,
};
use serde::Serialize;

/// Accounting for the t-Tuple estimate: the statistic is the count of the
/// most frequent tuple.
pub struct MaxCount;

impl RoundRule for MaxCount {
    const THRESHOLD: usize = 35;

    fn statistic<S: Ord>(table: &OccurrenceTable<'_, S>) -> u64 {
        table.max_count() as u64
    }

    fn round_entropy(statistic: u64, sample_len: usize, tuple_length: usize) -> Option<f64> {
        let windows = (sample_len - tuple_length + 1) as f64;
        Some(-(statistic as f64 / windows).log2() / tuple_length as f64)
    }
}

/// Result of the t-Tuple estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TupleEstimate {
    /// Tuple length at which the search stopped; seeds the LRS estimate.
    pub u: usize,
    /// Smallest per-symbol entropy before the confidence bound.
    pub point_entropy: f64,
    /// Final min-entropy estimate in bits per symbol.
    pub min_entropy: f64,
    /// Confidence bound on the per-symbol maximum probability.
    pub bound: ConfidenceBound,
    /// Rounds whose most frequent tuple met the threshold.
    pub rounds: Vec<RoundSummary>,
}

/// Runs the t-Tuple estimate over `sample`.
pub fn t_tuple_estimate<S: Ord>(
    sample: &[S],
    alphabet_size: u32,
) -> Result<TupleEstimate, EstimateError> {
    require_alphabet(alphabet_size)?;

    let outcome = TupleSearch::new(sample, log2_alphabet(alphabet_size)).run::<MaxCount>();
    let bound = ConfidenceBound::from_entropy(outcome.min_entropy, sample.len())?;

    tracing::debug!(
        u = outcome.final_length,
        p_max = bound.p_max,
        p_u = bound.p_upper,
        "t-Tuple estimate"
    );

    Ok(TupleEstimate {
        u: outcome.final_length,
        point_entropy: outcome.min_entropy,
        min_entropy: bound.min_entropy(),
        bound,
        rounds: outcome.rounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::bound::upper_bound;
    use rand_chacha::ChaCha8Rng;
    use rand_core::{RngCore, SeedableRng};

    fn symbols(text: &str) -> Vec<u8> {
        text.bytes().map(|b| b - b'A').collect()
    }

    #[test]
    fn test_short_sample_never_tightens() {
        let sample = symbols("AAAAABABABABABABABAB");
        let estimate = t_tuple_estimate(&sample, 2).unwrap();

        assert_eq!(estimate.u, 1);
        assert!(estimate.rounds.is_empty());
        assert_eq!(estimate.point_entropy, 1.0);
        assert_eq!(estimate.bound.p_max, 0.5);

        let expected = -upper_bound(0.5, sample.len()).unwrap().log2();
        assert!((estimate.min_entropy - expected).abs() < 1e-12);
    }

    #[test]
    fn test_constant_sample_is_fully_predictable() {
        let sample = vec![0u8; 200];
        let estimate = t_tuple_estimate(&sample, 2).unwrap();

        // every window matches until fewer than 35 remain
        assert_eq!(estimate.u, 200 - 35 + 2);
        assert_eq!(estimate.point_entropy, 0.0);
        assert_eq!(estimate.min_entropy, 0.0);
    }

    #[test]
    fn test_evenly_spread_sample_stays_near_ceiling() {
        // every byte value 20 times, below the threshold
        let sample: Vec<u8> = (0..256 * 20).map(|i| (i % 256) as u8).collect();
        let estimate = t_tuple_estimate(&sample, 256).unwrap();

        assert_eq!(estimate.u, 1);
        assert_eq!(estimate.point_entropy, 8.0);
        assert!(estimate.min_entropy > 7.0);
        assert!(estimate.min_entropy <= 8.0);
    }

    #[test]
    fn test_skewed_sample_detected_despite_large_alphabet() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x7475706c65);
        let sample: Vec<u8> = (0..1000)
            .map(|_| u8::from(rng.next_u32() % 100 == 0))
            .collect();

        let estimate = t_tuple_estimate(&sample, 256).unwrap();

        assert!(estimate.u > 1);
        assert!(estimate.min_entropy < 0.1);
        assert!(estimate.point_entropy < 0.1);
    }

    #[test]
    fn test_round_entropy_formula() {
        let h = MaxCount::round_entropy(50, 101, 2).unwrap();
        assert!((h - -(0.5f64).log2() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_zero_alphabet() {
        assert!(matches!(
            t_tuple_estimate(&[0u8, 1], 0),
            Err(EstimateError::InvalidAlphabet)
        ));
    }

    #[test]
    fn test_rejects_single_symbol() {
        assert!(matches!(
            t_tuple_estimate(&[0u8], 2),
            Err(EstimateError::SampleTooShort { len: 1, .. })
        ));
    }
}
