use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use entropy_core::analysis::{summarize, SeriesSummary};
use entropy_core::config::AnalysisConfig;
use entropy_core::model::{AnalysisResult, FileIdentity, FileKind, Measurement};
use entropy_core::services::detect::ObjectDetector;
use entropy_core::services::regions::{default_resolver_registry, RegionAnalyzer};
use entropy_core::FileSession;

use crate::commands::open_session;
use crate::{load_analysis_config, resolve_input_path};

/// Full entropy profile of one file.
#[derive(Debug, Serialize)]
pub struct EntropyReport {
    pub generated_at: String,
    pub tool_version: String,
    pub path: String,
    pub identity: FileIdentity,
    pub kind: FileKind,
    pub config: AnalysisConfig,
    pub whole_file: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_summary: Option<SeriesSummary>,
    /// Region results; absent when disabled or when no resolver handles the kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<AnalysisResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,
}

/// Build a report for an already loaded session.
pub fn build_report(session: &FileSession, config: &AnalysisConfig) -> Result<EntropyReport> {
    config.validate()?;
    let normalize = config.normalize;

    let whole_file = AnalysisResult {
        region: None,
        window_size: session.file_size(),
        normalized: normalize,
        measurement: Measurement::Aggregate(session.whole_file_entropy(normalize)?),
    };

    let (series, series_summary) = if config.include_series {
        let values = session.running_entropy(config.window_size, normalize, 0, None)?;
        let summary = summarize(&values);
        let result = AnalysisResult {
            region: None,
            window_size: config.window_size,
            normalized: normalize,
            measurement: Measurement::Series(values),
        };
        (Some(result), summary)
    } else {
        (None, None)
    };

    let (regions, resolver) = if config.include_regions {
        let registry = default_resolver_registry();
        let analyzer = RegionAnalyzer { registry: &registry, detector: &ObjectDetector };
        match analyzer.running_entropy(session, config.window_size, normalize) {
            Ok(report) => (Some(report.results), Some(report.resolver)),
            Err(err) if err.is_unsupported() => (None, None),
            Err(err) => return Err(err.into()),
        }
    } else {
        (None, None)
    };

    Ok(EntropyReport {
        generated_at: Utc::now().to_rfc3339(),
        tool_version: entropy_core::version().to_string(),
        path: session.source().map(|p| p.display().to_string()).unwrap_or_default(),
        identity: session.identity().clone(),
        kind: session.detect(&ObjectDetector),
        config: config.clone(),
        whole_file,
        series,
        series_summary,
        regions,
        resolver,
    })
}

/// Print a JSON report; flags override values from the optional config file.
pub fn report_command(
    path: &str,
    config_path: Option<&str>,
    window_size: Option<usize>,
    raw: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(p) => load_analysis_config(&resolve_input_path(p)?)?,
        None => AnalysisConfig::default(),
    };
    if let Some(window_size) = window_size {
        config.window_size = window_size;
    }
    if raw {
        config.normalize = false;
    }

    let session = open_session(path)?;
    let report = build_report(&session, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
