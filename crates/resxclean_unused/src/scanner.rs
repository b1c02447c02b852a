use log::{debug, error, info, trace, warn};
use rayon::prelude::*;
use resxclean_core::source_files;
use std::{
    fs,
    path::{Path, PathBuf},
    thread,
};

use crate::types::{DirectoryScan, ResourceReferences, ScanSummary};

/// Scans every directory for literal occurrences of the unused keys.
///
/// Directories are scanned in parallel and share `refs`, so a key found in
/// one directory is no longer searched for in the others. A directory that
/// cannot be walked is reported in the summary without stopping the rest.
pub fn search_sources(dirs: &[PathBuf], refs: &ResourceReferences) -> ScanSummary {
    info!("Scanning {} source directories in parallel", dirs.len());
    let directories: Vec<DirectoryScan> =
        dirs.par_iter().map(|dir| search_source_dir(dir, refs)).collect();
    ScanSummary { directories }
}

fn search_source_dir(dir: &Path, refs: &ResourceReferences) -> DirectoryScan {
    info!("Reading {}", dir.display());
    debug!("Thread {:?} scanning: {}", thread::current().id(), dir.display());

    let mut scan =
        DirectoryScan { root: dir.to_path_buf(), files_scanned: 0, files_skipped: 0, error: None };

    // A root that cannot be listed is fatal for this directory
    let listable = match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => Err(format!("{} is not a directory", dir.display())),
        Ok(_) => fs::read_dir(dir).map(|_| ()).map_err(|e| format!("{}: {}", dir.display(), e)),
        Err(e) => Err(format!("{}: {}", dir.display(), e)),
    };
    if let Err(reason) = listable {
        error!("Fatal error scanning {}", reason);
        scan.error = Some(reason);
        return scan;
    }

    for entry in source_files(dir) {
        let path = match entry {
            Ok(p) => p,
            Err(e) if e.depth() == Some(0) => {
                error!("Fatal error walking {}: {}", dir.display(), e);
                scan.error = Some(format!("{}: {}", dir.display(), e));
                return scan;
            }
            Err(e) => {
                warn!("Non-fatal error walking {}: {}", dir.display(), e);
                scan.files_skipped += 1;
                continue;
            }
        };

        let content = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Non-fatal error reading {}: {}", path.display(), e);
                scan.files_skipped += 1;
                continue;
            }
        };
        scan.files_scanned += 1;

        let found = referenced_keys(&content, refs);
        if !found.is_empty() {
            trace!("{} references {} resources", path.display(), found.len());
            for key in &found {
                refs.mark_used(key);
            }
        }
    }

    info!(
        "Saw {} files in {}. Remaining {} unused resources",
        scan.files_scanned,
        dir.display(),
        refs.len()
    );
    scan
}

/// Unused keys that occur as plain substrings of `content`.
// Collected before removal: the set must not be mutated while iterated.
fn referenced_keys(content: &str, refs: &ResourceReferences) -> Vec<String> {
    refs.unused
        .iter()
        .filter(|k| content.contains(k.key().as_str()))
        .map(|k| k.key().clone())
        .collect()
}
