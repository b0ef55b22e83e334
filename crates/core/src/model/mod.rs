//! Core data model for entropy analysis: file identity, detected kind,
//! regions, and per-call analysis results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Size and content digests of a loaded file.
///
/// Digests are lowercase hex. MD5 is the weak tag, SHA-256 the strong one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIdentity {
    pub size: u64,
    pub md5: String,
    pub sha256: String,
}

/// Detected container format of a file.
///
/// Resolvers are registered per kind; `Unknown` carries whatever label the
/// detector produced so it can still be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Pe,
    Elf,
    MachO,
    Unknown(String),
}

impl FileKind {
    /// Map a free-form type label (libmagic style) onto a kind.
    ///
    /// `"PE32 executable (GUI) Intel 80386, for MS Windows"` maps to `Pe`;
    /// anything unrecognized is kept verbatim in `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.starts_with("PE") && trimmed.contains("MS Windows") {
            FileKind::Pe
        } else if trimmed.starts_with("ELF") {
            FileKind::Elf
        } else if trimmed.starts_with("Mach-O") {
            FileKind::MachO
        } else {
            FileKind::Unknown(trimmed.to_string())
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &str {
        match self {
            FileKind::Pe => "PE executable (MS Windows)",
            FileKind::Elf => "ELF executable",
            FileKind::MachO => "Mach-O executable",
            FileKind::Unknown(label) => label,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named contiguous span of the file, as reported by a region resolver.
///
/// Regions may overlap or leave gaps; they are used exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub offset: usize,
    pub length: usize,
}

impl Region {
    pub fn new(name: impl Into<String>, offset: usize, length: usize) -> Self {
        Self { name: name.into(), offset, length }
    }
}

/// Either a running series (one value per window) or a single aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    Series(Vec<f64>),
    Aggregate(f64),
}

impl Measurement {
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Measurement::Series(values) => Some(values),
            Measurement::Aggregate(_) => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<f64> {
        match self {
            Measurement::Aggregate(value) => Some(*value),
            Measurement::Series(_) => None,
        }
    }
}

/// Result of one entropy computation, tagged with the region it covers.
///
/// `region: None` means the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub region: Option<Region>,
    pub window_size: usize,
    pub normalized: bool,
    pub measurement: Measurement,
}
