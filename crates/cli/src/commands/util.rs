use anyhow::{Context, Result};
use entropy_core::FileSession;

use crate::resolve_input_path;

/// Resolve `path` and load it into a session.
pub fn open_session(path: &str) -> Result<FileSession> {
    let abs_path = resolve_input_path(path)?;
    FileSession::open(&abs_path)
        .with_context(|| format!("Failed to load input {}", abs_path.display()))
}

/// Render a series as a compact, fixed-precision line for terminal output.
pub fn format_series(series: &[f64]) -> String {
    series.iter().map(|v| format!("{v:.4}")).collect::<Vec<_>>().join(" ")
}
