use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use entropy_core::config::AnalysisConfig;
use tracing_subscriber::EnvFilter;

pub mod commands;

/// Resolve an input path against the current working directory.
///
/// Existence is not checked here; the core session reports missing inputs.
pub fn resolve_input_path(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(path))
}

/// Load an analysis config from YAML (`.yaml`/`.yml`) or JSON (`.json`).
pub fn load_analysis_config(path: &Path) -> Result<AnalysisConfig> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read analysis config at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let config: AnalysisConfig = match ext {
        "yaml" | "yml" => {
            serde_yaml::from_str(&body).context("Failed to parse analysis config YAML")?
        }
        "json" => serde_json::from_str(&body).context("Failed to parse analysis config JSON")?,
        other => {
            return Err(anyhow!(
                "Unsupported config extension '{}'. Allowed: yaml, yml, json",
                other
            ))
        }
    };
    config.validate()?;
    Ok(config)
}

/// Install the stderr tracing subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("entropy_core={level},entropy_scan={level}")));
    // A subscriber may already be installed when commands run inside tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
