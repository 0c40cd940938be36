//! Tuple-based min-entropy estimation.
//!
//! Lower-bound estimates of the min-entropy per symbol of a noise source,
//! computed from a finite sample with the t-Tuple and longest repeated
//! substring (LRS) estimators.
//!
//! # Architecture
//!
//! ```text
//! sample → t-Tuple estimate ──u──→ LRS estimate
//!               ↓                      ↓
//!          confidence bound      confidence bound
//! ```
//!
//! Both estimators drive the same incremental tuple search
//! ([`estimators::TupleSearch`]): count every tuple of the current length,
//! then extend only the tuples that were frequent enough by one symbol.
//!
//! # Example
//!
//! ```
//! use tuple_entropy::estimators::{lrs_estimate, t_tuple_estimate};
//!
//! let sample: Vec<u8> = (0..300).map(|i| u8::from(i % 7 == 0)).collect();
//!
//! let t_tuple = t_tuple_estimate(&sample, 2).unwrap();
//! let lrs = lrs_estimate(&sample, 2, t_tuple.u as i64).unwrap();
//!
//! assert!(t_tuple.min_entropy <= 1.0);
//! assert!(lrs.min_entropy <= 2.0);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod estimators;
pub mod report;
pub mod sample;

// Re-export commonly used types at crate root
pub use config::{FileConfig, OutputFormat};
pub use estimators::{
    assess, assess_with, lrs_estimate, t_tuple_estimate, Assessment, ConfidenceBound,
    EstimateError, LrsEstimate, TupleEstimate,
};
pub use sample::{SampleError, SymbolSample};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
