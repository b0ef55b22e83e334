use serde::{Deserialize, Serialize};

use crate::error::EntropyError;

/// Default running-entropy window, in bytes.
pub const DEFAULT_WINDOW_SIZE: usize = 256;

/// Serializable analysis settings.
///
/// Frontends load this from YAML or JSON and let command-line flags override
/// individual fields. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Running-entropy window size in bytes.
    pub window_size: usize,
    /// Divide entropy by 8 so values land in `[0, 1]`.
    pub normalize: bool,
    /// Resolve and analyze structured regions when a resolver exists.
    pub include_regions: bool,
    /// Include the whole-file running series, not just the aggregate.
    pub include_series: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            normalize: true,
            include_regions: true,
            include_series: true,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), EntropyError> {
        if self.window_size == 0 {
            return Err(EntropyError::InvalidRange("window size must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: AnalysisConfig = serde_json::from_str(r#"{"normalize": false}"#).unwrap();
        assert_eq!(cfg.window_size, DEFAULT_WINDOW_SIZE);
        assert!(!cfg.normalize);
        assert!(cfg.include_regions);
    }

    #[test]
    fn zero_window_is_rejected() {
        let cfg = AnalysisConfig { window_size: 0, ..AnalysisConfig::default() };
        assert!(matches!(cfg.validate(), Err(EntropyError::InvalidRange(_))));
    }
}
