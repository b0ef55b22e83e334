use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use entropy_core::analysis::{summarize, SeriesSummary};
use entropy_core::model::{AnalysisResult, FileIdentity, FileKind, Measurement};
use entropy_core::services::detect::ObjectDetector;
use entropy_core::services::regions::{default_resolver_registry, RegionAnalyzer};
use entropy_core::{EntropyError, FileSession};

use crate::commands::{format_series, open_session};

#[derive(Debug, Serialize)]
pub struct IdentifyOutput {
    pub path: String,
    pub identity: FileIdentity,
    pub kind: FileKind,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct RunningOutput {
    pub path: String,
    pub offset: usize,
    pub length: usize,
    pub result: AnalysisResult,
    pub summary: Option<SeriesSummary>,
}

#[derive(Debug, Serialize)]
pub struct RegionsOutput {
    pub path: String,
    pub kind: FileKind,
    /// Resolver that produced the regions; `None` when the whole file was used instead.
    pub resolver: Option<String>,
    pub results: Vec<AnalysisResult>,
}

fn display_path(session: &FileSession) -> String {
    session.source().map(|p| p.display().to_string()).unwrap_or_default()
}

/// Print size, digests and detected kind of a file.
pub fn identify_command(path: &str, json: bool) -> Result<()> {
    let session = open_session(path)?;
    let kind = session.detect(&ObjectDetector);
    let output = IdentifyOutput {
        path: display_path(&session),
        identity: session.identity().clone(),
        label: kind.label().to_string(),
        kind,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("File: {}", output.path);
    println!("  Size: {}", output.identity.size);
    println!("  MD5: {}", output.identity.md5);
    println!("  SHA-256: {}", output.identity.sha256);
    println!("  Type: {}", output.label);
    Ok(())
}

/// Print the whole-file aggregate entropy.
pub fn entropy_command(path: &str, normalize: bool, json: bool) -> Result<()> {
    let session = open_session(path)?;
    let value = session.whole_file_entropy(normalize)?;
    let result = AnalysisResult {
        region: None,
        window_size: session.file_size(),
        normalized: normalize,
        measurement: Measurement::Aggregate(value),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("File: {}", display_path(&session));
    println!("  Entropy{}: {value:.6}", if normalize { " (normalized)" } else { "" });
    Ok(())
}

/// Print the running entropy series over a span of the file.
pub fn running_command(
    path: &str,
    window_size: usize,
    offset: usize,
    length: Option<usize>,
    normalize: bool,
    json: bool,
) -> Result<()> {
    let session = open_session(path)?;
    let series = session.running_entropy(window_size, normalize, offset, length)?;
    let length = length.unwrap_or(session.file_size() - offset);
    let output = RunningOutput {
        path: display_path(&session),
        offset,
        length,
        summary: summarize(&series),
        result: AnalysisResult {
            region: None,
            window_size,
            normalized: normalize,
            measurement: Measurement::Series(series),
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("File: {}", output.path);
    println!("  Span: offset {} length {} window {}", offset, length, window_size);
    if let Some(summary) = &output.summary {
        println!(
            "  Windows: {} (min {:.4}, max {:.4}, mean {:.4})",
            summary.windows, summary.min, summary.max, summary.mean
        );
    }
    if let Some(series) = output.result.measurement.as_series() {
        println!("  Series: {}", format_series(series));
    }
    Ok(())
}

/// Per-region entropy, falling back to the whole file when the kind has no resolver.
pub fn regions_command(
    path: &str,
    window_size: usize,
    aggregate: bool,
    normalize: bool,
    json: bool,
) -> Result<()> {
    let session = open_session(path)?;
    let output = analyze_regions_or_whole(&session, window_size, aggregate, normalize)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("File: {}", output.path);
    println!("  Type: {}", output.kind);
    match &output.resolver {
        Some(resolver) => println!("  Regions ({resolver}):"),
        None => println!("  No region resolver for this type; whole-file analysis:"),
    }
    for result in &output.results {
        let label = match &result.region {
            Some(region) => format!(
                "{} (offset 0x{:X}, length 0x{:X})",
                region.name, region.offset, region.length
            ),
            None => "(whole file)".to_string(),
        };
        match &result.measurement {
            Measurement::Aggregate(value) => println!("  - {label}: {value:.6}"),
            Measurement::Series(series) => {
                println!("  - {label}: {}", format_series(series));
            }
        }
    }
    Ok(())
}

/// Region analysis with the whole-file fallback applied.
pub fn analyze_regions_or_whole(
    session: &FileSession,
    window_size: usize,
    aggregate: bool,
    normalize: bool,
) -> Result<RegionsOutput> {
    let registry = default_resolver_registry();
    let analyzer = RegionAnalyzer { registry: &registry, detector: &ObjectDetector };
    let report = if aggregate {
        analyzer.entropy(session, normalize)
    } else {
        analyzer.running_entropy(session, window_size, normalize)
    };

    match report {
        Ok(report) => Ok(RegionsOutput {
            path: display_path(session),
            kind: report.kind,
            resolver: Some(report.resolver),
            results: report.results,
        }),
        Err(EntropyError::UnsupportedRegionAnalysis(kind)) => {
            warn!(kind = %kind, "falling back to whole-file analysis");
            let result = if aggregate {
                AnalysisResult {
                    region: None,
                    window_size: session.file_size(),
                    normalized: normalize,
                    measurement: Measurement::Aggregate(session.whole_file_entropy(normalize)?),
                }
            } else {
                AnalysisResult {
                    region: None,
                    window_size,
                    normalized: normalize,
                    measurement: Measurement::Series(
                        session.running_entropy(window_size, normalize, 0, None)?,
                    ),
                }
            };
            Ok(RegionsOutput {
                path: display_path(session),
                kind,
                resolver: None,
                results: vec![result],
            })
        }
        Err(err) => Err(err.into()),
    }
}
