use goblin::mach::constants::{SECTION_TYPE, S_ZEROFILL};
use goblin::mach::MachO;

use super::{parse_error, to_usize};
use crate::error::EntropyError;
use crate::model::{FileKind, Region};
use crate::services::regions::RegionResolver;

/// Mach-O sections named `segment,section`; zero-fill sections have no file bytes.
pub struct MachOSectionResolver;

impl RegionResolver for MachOSectionResolver {
    fn resolve(&self, bytes: &[u8]) -> Result<Vec<Region>, EntropyError> {
        let macho = MachO::parse(bytes, 0).map_err(|e| parse_error(self.name(), e))?;
        let mut regions = Vec::new();
        for (sec, _) in macho.segments.sections().flatten().filter_map(Result::ok) {
            if sec.flags & SECTION_TYPE == S_ZEROFILL || sec.offset == 0 {
                continue;
            }
            let name = format!(
                "{},{}",
                sec.segname().unwrap_or_default(),
                sec.name().unwrap_or_default()
            );
            regions.push(Region::new(name, sec.offset as usize, to_usize(sec.size)));
        }
        Ok(regions)
    }

    fn kind(&self) -> FileKind {
        FileKind::MachO
    }

    fn name(&self) -> &'static str {
        "macho-sections"
    }
}
