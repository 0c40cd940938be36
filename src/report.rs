//! Rendering of assessment results.

use crate::{config::OutputFormat, estimators::Assessment};
use std::fmt::Write as _;

/// Errors that can occur while rendering a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Renders `assessment` in the requested format.
pub fn render(assessment: &Assessment, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Text => Ok(render_text(assessment)),
        OutputFormat::Toml => Ok(toml::to_string_pretty(assessment)?),
    }
}

fn render_text(assessment: &Assessment) -> String {
    let t = &assessment.t_tuple;
    let lrs = &assessment.lrs;
    let mut out = String::new();

    // writing to a String cannot fail
    let _ = writeln!(
        out,
        "symbols = {}, alphabet size = {}",
        assessment.sample_len, assessment.alphabet_size
    );
    let _ = writeln!(
        out,
        "t-Tuple Estimate: u = {}, p_max = {:.17}, p_u = {:.17}, min-entropy = {:.6}",
        t.u, t.bound.p_max, t.bound.p_upper, t.min_entropy
    );
    let _ = writeln!(
        out,
        "LRS Estimate: u = {}, v = {}, p_max = {:.17}, p_u = {:.17}, min-entropy = {:.6}",
        lrs.u, lrs.v, lrs.bound.p_max, lrs.bound.p_upper, lrs.min_entropy
    );
    out
}
