//! Entropy engine.
//!
//! Pure functions over byte slices: histogramming, Shannon entropy, windowed
//! series and single aggregates. No I/O and no knowledge of file formats.

pub mod entropy;

pub use entropy::{
    byte_histogram, compute_aggregate, compute_series, shannon_entropy, summarize, SeriesSummary,
    MAX_ENTROPY_BITS,
};
