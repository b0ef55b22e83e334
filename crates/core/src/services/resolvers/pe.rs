use goblin::pe::PE;

use super::parse_error;
use crate::error::EntropyError;
use crate::model::{FileKind, Region};
use crate::services::regions::RegionResolver;

/// Windows PE sections, bounded by `PointerToRawData` and `SizeOfRawData`.
///
/// Unlike the ELF and Mach-O resolvers, sections without raw data (`.bss`,
/// packer stubs such as `UPX0`) are kept: they show up as zero-length regions
/// with an empty series, so the region list matches the section table.
pub struct PeSectionResolver;

impl RegionResolver for PeSectionResolver {
    fn resolve(&self, bytes: &[u8]) -> Result<Vec<Region>, EntropyError> {
        let pe = PE::parse(bytes).map_err(|e| parse_error(self.name(), e))?;
        Ok(pe
            .sections
            .iter()
            .map(|sec| {
                let name = sec
                    .real_name
                    .clone()
                    .or_else(|| sec.name().ok().map(str::to_string))
                    .unwrap_or_default();
                Region::new(
                    name.trim_end_matches('\0'),
                    sec.pointer_to_raw_data as usize,
                    sec.size_of_raw_data as usize,
                )
            })
            .collect())
    }

    fn kind(&self) -> FileKind {
        FileKind::Pe
    }

    fn name(&self) -> &'static str {
        "pe-sections"
    }
}
