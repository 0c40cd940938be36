//! Confidence bound on the most likely outcome.
//!
//! Converts a point estimate of the maximum probability into a one-sided
//! 99% upper bound using the normal approximation to a binomial
//! proportion, then into bits of min-entropy.

use super::EstimateError;
use serde::Serialize;

/// z-score for a one-sided 99% confidence level.
pub const Z_ALPHA: f64 = 2.576;

/// Smallest sample size the bound is defined for.
pub const MIN_SAMPLE_LEN: usize = 2;

/// Upper confidence bound for a maximum-probability estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceBound {
    /// Point estimate of the maximum probability.
    pub p_max: f64,
    /// Upper bound on `p_max`, capped at 1.
    pub p_upper: f64,
}

impl ConfidenceBound {
    /// Computes the bound for `p_max` observed over `sample_len` symbols.
    pub fn new(p_max: f64, sample_len: usize) -> Result<Self, EstimateError> {
        Ok(Self {
            p_max,
            p_upper: upper_bound(p_max, sample_len)?,
        })
    }

    /// Builds the bound from a per-symbol entropy value.
    pub fn from_entropy(entropy: f64, sample_len: usize) -> Result<Self, EstimateError> {
        Self::new(probability(entropy), sample_len)
    }

    /// Min-entropy implied by the upper bound.
    pub fn min_entropy(&self) -> f64 {
        entropy_bits(self.p_upper)
    }
}

/// `min(1, p + z * sqrt(p(1 - p) / (n - 1)))`.
pub fn upper_bound(p_max: f64, sample_len: usize) -> Result<f64, EstimateError> {
    if sample_len < MIN_SAMPLE_LEN {
        return Err(EstimateError::SampleTooShort {
            len: sample_len,
            min: MIN_SAMPLE_LEN,
        });
    }

    let n = sample_len as f64;
    let variance = (p_max * (1.0 - p_max)).max(0.0);
    let spread = Z_ALPHA * (variance / (n - 1.0)).sqrt();
    Ok((p_max + spread).min(1.0))
}

/// Bits of min-entropy for a probability.
#[inline]
pub fn entropy_bits(p: f64) -> f64 {
    // -log2(1) is -0.0; report a clean zero
    let h = -p.log2();
    if h == 0.0 {
        0.0
    } else {
        h
    }
}

/// Probability corresponding to `entropy` bits.
#[inline]
pub fn probability(entropy: f64) -> f64 {
    (-entropy).exp2()
}
