use ignore::WalkBuilder;
use log::trace;
use std::path::{Path, PathBuf};

use crate::constants::SOURCE_EXTENSIONS;

/// Returns true if the path has one of the scannable source extensions
pub fn has_source_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Lazily walks `root` and yields every source file below it.
///
/// Hidden and git-ignored files are included. Walk errors are yielded as
/// `Err` items so the caller decides whether to skip or abort.
pub fn source_files(root: &Path) -> impl Iterator<Item = Result<PathBuf, ignore::Error>> {
    trace!("Walking source directory: {}", root.display());
    let walker = WalkBuilder::new(root).standard_filters(false).build();

    walker.filter_map(|res| match res {
        Ok(dent) => {
            let is_file = dent.file_type().is_some_and(|t| t.is_file());
            if is_file && has_source_extension(dent.path()) {
                Some(Ok(dent.into_path()))
            } else {
                None
            }
        }
        Err(e) => Some(Err(e)),
    })
}
