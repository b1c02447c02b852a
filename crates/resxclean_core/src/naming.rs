//! File naming rules for resource families.
//!
//! A family is a base file such as `Messages.resx` plus its language
//! variants (`Messages.fr.resx`, `Messages.de-DE.resx`, ...). Only base
//! files seed the key set; variants are found when a family is pruned.

use anyhow::{Context, Result};
use log::{debug, trace};
use regex::Regex;
use std::{fs, path::Path, sync::LazyLock};

use crate::constants::RESX_EXTENSION;

// ASCII word characters only, a language tag adds a second dot segment
static BASE_RESOURCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+\.resx$").expect("valid base resource regex"));

/// Returns true for base resource file names (`Messages.resx`, not `Messages.fr.resx`)
pub fn is_base_resource_file(file_name: &str) -> bool {
    BASE_RESOURCE_RE.is_match(file_name)
}

/// The resource base name: everything before the first `.`
pub fn resource_base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Qualified key `<baseName>.<itemName>` as it appears in source code
pub fn resource_key(base_name: &str, item_name: &str) -> String {
    format!("{}.{}", base_name, item_name)
}

/// Lists the file names in a resource directory (non-recursive, sorted).
pub fn list_resource_files(dir: &Path) -> Result<Vec<String>> {
    debug!("Listing resource directory: {}", dir.display());
    let mut names = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let entry =
            entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        } else {
            trace!("Skipping non UTF-8 file name: {:?}", entry.file_name());
        }
    }
    names.sort();
    debug!("Found {} files in {}", names.len(), dir.display());
    Ok(names)
}

/// Filters a directory listing down to base resource files.
pub fn base_resource_files(names: &[String]) -> Vec<String> {
    names.iter().filter(|n| is_base_resource_file(n)).cloned().collect()
}

/// Language variants of `base_file` within a directory listing.
///
/// A variant starts with the base stem followed by a dot, ends with `.resx`
/// and is not the base file itself.
pub fn language_variants(base_file: &str, names: &[String]) -> Vec<String> {
    let suffix = format!(".{}", RESX_EXTENSION);
    let stem = base_file.strip_suffix(&suffix).unwrap_or(base_file);
    let prefix = format!("{}.", stem);

    names
        .iter()
        .filter(|n| n.starts_with(&prefix) && n.ends_with(&suffix) && n.as_str() != base_file)
        .cloned()
        .collect()
}
