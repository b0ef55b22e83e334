//! Built-in region resolvers backed by goblin.
//!
//! Each resolver reports the raw on-disk bounds of a container's sections.

mod elf;
mod macho;
mod pe;

pub use elf::ElfSectionResolver;
pub use macho::MachOSectionResolver;
pub use pe::PeSectionResolver;

use crate::error::EntropyError;

fn parse_error(resolver: &'static str, err: goblin::error::Error) -> EntropyError {
    EntropyError::Resolver { resolver, message: err.to_string() }
}

/// Convert a file offset or size to `usize`; out-of-range values saturate so
/// that range validation rejects them later.
fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
