use goblin::elf::section_header::{SHT_NOBITS, SHT_NULL};
use goblin::elf::Elf;

use super::{parse_error, to_usize};
use crate::error::EntropyError;
use crate::model::{FileKind, Region};
use crate::services::regions::RegionResolver;

/// ELF section headers that own file bytes (`SHT_NULL`/`SHT_NOBITS` skipped).
pub struct ElfSectionResolver;

impl RegionResolver for ElfSectionResolver {
    fn resolve(&self, bytes: &[u8]) -> Result<Vec<Region>, EntropyError> {
        let elf = Elf::parse(bytes).map_err(|e| parse_error(self.name(), e))?;
        Ok(elf
            .section_headers
            .iter()
            .filter(|sh| sh.sh_type != SHT_NULL && sh.sh_type != SHT_NOBITS)
            .map(|sh| {
                let name = elf.shdr_strtab.get_at(sh.sh_name).unwrap_or("");
                Region::new(name, to_usize(sh.sh_offset), to_usize(sh.sh_size))
            })
            .collect())
    }

    fn kind(&self) -> FileKind {
        FileKind::Elf
    }

    fn name(&self) -> &'static str {
        "elf-sections"
    }
}
