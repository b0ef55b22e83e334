use anyhow::Result;
use serde::Serialize;

use entropy_core::services::regions::default_resolver_registry;

#[derive(Debug, Serialize)]
pub struct ResolverInfo {
    pub name: String,
    pub description: String,
}

/// List region resolvers known to this binary.
pub fn list_resolvers_command(json: bool) -> Result<()> {
    let registry = default_resolver_registry();
    let entries: Vec<ResolverInfo> = registry
        .names()
        .into_iter()
        .map(|name| {
            let description = match name.as_str() {
                "pe-sections" => "Windows PE sections (PointerToRawData/SizeOfRawData)".to_string(),
                "elf-sections" => "ELF section headers that occupy file bytes".to_string(),
                "macho-sections" => "Mach-O sections, excluding zero-fill".to_string(),
                other => format!("Resolver '{}'", other),
            };
            ResolverInfo { name, description }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Resolvers: (none)");
        return Ok(());
    }

    println!("Resolvers:");
    for entry in entries {
        println!("- {}: {}", entry.name, entry.description);
    }

    Ok(())
}
