use anyhow::Result;
use clap::{Parser, Subcommand};

use entropy_core::config::DEFAULT_WINDOW_SIZE;
use entropy_scan::commands::{
    entropy_command, identify_command, list_resolvers_command, regions_command, report_command,
    running_command,
};
use entropy_scan::init_logging;

/// Shannon-entropy profiler for binary files.
///
/// This CLI is a thin wrapper around `entropy-core` (exposed in code as `entropy_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "entropy-scan",
    version,
    about = "Whole-file and per-section Shannon entropy of binary files",
    long_about = None
)]
struct Cli {
    /// Log level for diagnostics on stderr (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show size, MD5, SHA-256 and detected type of a file.
    Identify {
        /// Path to the file to inspect.
        #[arg(long)]
        path: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Entropy of the whole file as a single value.
    Entropy {
        /// Path to the file to inspect.
        #[arg(long)]
        path: String,

        /// Report raw bits per byte (0-8) instead of normalized (0-1).
        #[arg(long, default_value_t = false)]
        raw: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Running entropy over non-overlapping windows of a span.
    Running {
        /// Path to the file to inspect.
        #[arg(long)]
        path: String,

        /// Window size in bytes.
        #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
        window: usize,

        /// Byte offset where the span starts.
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Span length in bytes. Defaults to the rest of the file.
        #[arg(long)]
        length: Option<usize>,

        /// Report raw bits per byte (0-8) instead of normalized (0-1).
        #[arg(long, default_value_t = false)]
        raw: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Entropy per structured region (e.g. PE sections).
    ///
    /// Falls back to whole-file analysis when no resolver handles the file type.
    Regions {
        /// Path to the file to inspect.
        #[arg(long)]
        path: String,

        /// Window size in bytes for the running series.
        #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
        window: usize,

        /// One aggregate value per region instead of a running series.
        #[arg(long, default_value_t = false)]
        aggregate: bool,

        /// Report raw bits per byte (0-8) instead of normalized (0-1).
        #[arg(long, default_value_t = false)]
        raw: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Full JSON report: identity, whole-file value, series and regions.
    Report {
        /// Path to the file to inspect.
        #[arg(long)]
        path: String,

        /// Optional analysis config (YAML or JSON).
        #[arg(long)]
        config: Option<String>,

        /// Window size override.
        #[arg(long)]
        window: Option<usize>,

        /// Report raw bits per byte (0-8) instead of normalized (0-1).
        #[arg(long, default_value_t = false)]
        raw: bool,
    },

    /// List available region resolvers.
    Resolvers {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Identify { path, json } => identify_command(&path, json)?,
        Command::Entropy { path, raw, json } => entropy_command(&path, !raw, json)?,
        Command::Running { path, window, offset, length, raw, json } => {
            running_command(&path, window, offset, length, !raw, json)?
        }
        Command::Regions { path, window, aggregate, raw, json } => {
            regions_command(&path, window, aggregate, !raw, json)?
        }
        Command::Report { path, config, window, raw } => {
            report_command(&path, config.as_deref(), window, raw)?
        }
        Command::Resolvers { json } => list_resolvers_command(json)?,
    }

    Ok(())
}
