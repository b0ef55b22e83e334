//! entropy-core
//!
//! Core library for Shannon-entropy profiling of binary files.
//!
//! This crate defines the data model, the windowed entropy engine, the file
//! analysis session that validates ranges over a loaded buffer, and the region
//! resolvers that map structured formats (PE, ELF, Mach-O) onto byte spans.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends (CLI, bindings, batch tooling).

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod services;
pub mod session;

pub use error::EntropyError;
pub use session::FileSession;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
