use serde::{Deserialize, Serialize};

use crate::error::EntropyError;

/// Maximum Shannon entropy of 8-bit symbols, `log2(256)`.
pub const MAX_ENTROPY_BITS: f64 = 8.0;

/// Count occurrences of each byte value.
pub fn byte_histogram(bytes: &[u8]) -> [u64; 256] {
    let mut counts = [0u64; 256];
    for &b in bytes {
        counts[b as usize] += 1;
    }
    counts
}

/// Shannon entropy of `bytes` in bits per byte, in `[0, 8]`.
///
/// An empty slice has entropy 0.
pub fn shannon_entropy(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }
    let total = bytes.len() as f64;
    byte_histogram(bytes)
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let count = count as f64;
            (count / total) * (total / count).log2()
        })
        .sum()
}

/// Entropy of each consecutive, non-overlapping window of `bytes`.
///
/// The last window may be shorter than `window_size`; it is scored over its
/// own length. With `normalize` the values are divided by 8 into `[0, 1]`.
pub fn compute_series(
    bytes: &[u8],
    window_size: usize,
    normalize: bool,
) -> Result<Vec<f64>, EntropyError> {
    if bytes.is_empty() {
        return Err(EntropyError::InvalidRange("cannot compute entropy of an empty span".into()));
    }
    if window_size == 0 {
        return Err(EntropyError::InvalidRange("window size must be positive".into()));
    }
    if window_size > bytes.len() {
        return Err(EntropyError::InvalidRange(format!(
            "window size {window_size} exceeds span length {}",
            bytes.len()
        )));
    }

    let scale = if normalize { MAX_ENTROPY_BITS } else { 1.0 };
    Ok(bytes.chunks(window_size).map(|window| shannon_entropy(window) / scale).collect())
}

/// Entropy of `bytes` taken as one window.
pub fn compute_aggregate(bytes: &[u8], normalize: bool) -> Result<f64, EntropyError> {
    let series = compute_series(bytes, bytes.len(), normalize)?;
    single_value(series)
}

/// Unwrap a series that must contain exactly one window.
pub(crate) fn single_value(series: Vec<f64>) -> Result<f64, EntropyError> {
    match series.as_slice() {
        [value] => Ok(*value),
        other => Err(EntropyError::InvariantViolation(format!(
            "aggregate entropy produced {} windows, expected exactly one",
            other.len()
        ))),
    }
}

/// Spread of a running entropy series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub windows: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Min/max/mean over a series; `None` for an empty series.
pub fn summarize(series: &[f64]) -> Option<SeriesSummary> {
    if series.is_empty() {
        return None;
    }
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = series.iter().sum::<f64>() / series.len() as f64;
    Some(SeriesSummary { windows: series.len(), min, max, mean })
}
