use anyhow::{Context, Result};
use log::{debug, info, trace};
use rayon::prelude::*;
use resxclean_core::{
    ResxDocument, base_resource_files, language_variants, list_resource_files, resource_base_name,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::types::{PrunedFile, ResourceReferences};

/// A parsed resource file with the unused items already filtered out
struct PendingFile {
    path: PathBuf,
    doc: ResxDocument,
    removed: usize,
}

/// Removes the unused items from every file of every affected resource family.
///
/// Every affected file is parsed and filtered (in parallel) before the first
/// one is written, so a malformed file aborts the run with nothing rewritten.
/// Files are overwritten in place. With `dry_run` nothing is written but the
/// removal counts are still computed.
pub fn remove_unused(
    resource_dir: &Path,
    refs: &ResourceReferences,
    dry_run: bool,
) -> Result<Vec<PrunedFile>> {
    info!("Removing unused resources");
    let names = list_resource_files(resource_dir)?;
    let base_files = base_resource_files(&names);

    let families: Vec<Vec<PendingFile>> = base_files
        .par_iter()
        .map(|base_file| {
            let base_name = resource_base_name(base_file);
            let items = refs.items_for(base_name);
            if items.is_empty() {
                trace!("Nothing to remove from {}", base_file);
                return Ok(Vec::new());
            }

            let mut files = language_variants(base_file, &names);
            files.push(base_file.clone());
            debug!("Pruning {} items from {} files of {}", items.len(), files.len(), base_name);

            files
                .par_iter()
                .map(|file| filter_resource_file(&resource_dir.join(file), &items))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let pending: Vec<PendingFile> =
        families.into_iter().flatten().filter(|p| p.removed > 0).collect();

    let mut pruned: Vec<PrunedFile> = pending
        .into_par_iter()
        .map(|file| write_resource_file(file, dry_run))
        .collect::<Result<Vec<_>>>()?;
    pruned.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(pruned)
}

fn filter_resource_file(path: &Path, items: &[String]) -> Result<PendingFile> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut doc =
        ResxDocument::parse(&bytes).with_context(|| format!("Failed to parse {}", path.display()))?;

    let removed = if doc.has_items() { doc.remove_items(items)? } else { 0 };
    if removed == 0 {
        trace!("{} has none of the unused items", path.display());
    }
    Ok(PendingFile { path: path.to_path_buf(), doc, removed })
}

fn write_resource_file(file: PendingFile, dry_run: bool) -> Result<PrunedFile> {
    let PendingFile { path, doc, removed } = file;
    if dry_run {
        info!("Would remove {} items from '{}'", removed, path.display());
    } else {
        info!("Writing '{}' translation file", path.display());
        let out = doc.to_bytes()?;
        fs::write(&path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(PrunedFile { path, removed })
}
