use anyhow::{Context, Result};
use log::{debug, info, trace};
use resxclean_core::{
    ResxDocument, base_resource_files, list_resource_files, resource_base_name, resource_key,
};
use std::{fs, path::Path};

use crate::types::ResourceReferences;

/// Collects `<baseName>.<itemName>` for every item of every base resource file.
///
/// Language variants are not read here. Returns `None` when the directory
/// holds no base resource file.
pub fn read_resource_keys(resource_dir: &Path) -> Result<Option<ResourceReferences>> {
    let names = list_resource_files(resource_dir)?;
    let base_files = base_resource_files(&names);
    if base_files.is_empty() {
        debug!("No base resource files in {}", resource_dir.display());
        return Ok(None);
    }
    debug!("Found {} base resource files", base_files.len());

    let mut keys = Vec::new();
    for file in &base_files {
        let path = resource_dir.join(file);
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let doc = ResxDocument::parse(&bytes)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let base_name = resource_base_name(file);
        let items = doc.item_names()?;
        trace!("{} has {} items", file, items.len());
        keys.extend(items.iter().map(|item| resource_key(base_name, item)));
    }

    let refs = ResourceReferences::from_keys(keys);
    info!("Collected {} resources", refs.len());
    Ok(Some(refs))
}
