//! Tuple-based min-entropy estimators.
//!
//! Both estimators search for the most frequently repeated tuple at
//! increasing lengths and turn its frequency into a conservative
//! per-symbol min-entropy. The t-Tuple estimate runs first; the tuple
//! length it stops at seeds the LRS estimate.

pub mod bound;
pub mod engine;
mod lrs;
mod t_tuple;

pub use bound::ConfidenceBound;
pub use engine::{OccurrenceTable, RoundRule, RoundSummary, TupleSearch};
pub use lrs::{lrs_estimate, CollisionSum, LrsEstimate};
pub use t_tuple::{t_tuple_estimate, MaxCount, TupleEstimate};

use serde::Serialize;
use thiserror::Error;

/// Contract violations reported by the estimators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("alphabet size must be at least 1")]
    InvalidAlphabet,
    #[error("sample has {len} symbols, at least {min} are required")]
    SampleTooShort { len: usize, min: usize },
}

pub(crate) fn require_alphabet(alphabet_size: u32) -> Result<(), EstimateError> {
    if alphabet_size == 0 {
        return Err(EstimateError::InvalidAlphabet);
    }
    Ok(())
}

pub(crate) fn log2_alphabet(alphabet_size: u32) -> f64 {
    f64::from(alphabet_size).log2()
}

/// Both estimates for one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Number of symbols assessed.
    pub sample_len: usize,
    /// Alphabet size the ceilings were derived from.
    pub alphabet_size: u32,
    /// t-Tuple estimate.
    pub t_tuple: TupleEstimate,
    /// LRS estimate.
    pub lrs: LrsEstimate,
}

impl Assessment {
    /// Smaller of the two estimates.
    pub fn min_entropy(&self) -> f64 {
        self.t_tuple.min_entropy.min(self.lrs.min_entropy)
    }
}

/// Runs the t-Tuple estimate, then the LRS estimate seeded with its `u`.
pub fn assess<S: Ord>(sample: &[S], alphabet_size: u32) -> Result<Assessment, EstimateError> {
    assess_with(sample, alphabet_size, true)
}

/// Like [`assess`], but starts the LRS search at 1 unless `seed_lrs` is set.
pub fn assess_with<S: Ord>(
    sample: &[S],
    alphabet_size: u32,
    seed_lrs: bool,
) -> Result<Assessment, EstimateError> {
    let t_tuple = t_tuple_estimate(sample, alphabet_size)?;
    let start = if seed_lrs {
        i64::try_from(t_tuple.u).unwrap_or(i64::MAX)
    } else {
        1
    };
    let lrs = lrs_estimate(sample, alphabet_size, start)?;

    tracing::info!(
        symbols = sample.len(),
        alphabet_size,
        t_tuple = t_tuple.min_entropy,
        lrs = lrs.min_entropy,
        "Tuple estimates complete"
    );

    Ok(Assessment {
        sample_len: sample.len(),
        alphabet_size,
        t_tuple,
        lrs,
    })
}
