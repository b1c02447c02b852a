use dashmap::DashSet;
use serde::Serialize;
use std::path::PathBuf;

/// Keys not yet seen in any scanned source file.
///
/// Starts with every key from the base resource files and only ever
/// shrinks. Removing a key that is already gone is a no-op, so concurrent
/// scans may race on the same key.
#[derive(Debug, Default)]
pub struct ResourceReferences {
    pub unused: DashSet<String>,
}

impl ResourceReferences {
    pub fn from_keys<I: IntoIterator<Item = String>>(keys: I) -> Self {
        Self { unused: keys.into_iter().collect() }
    }

    /// Returns true if this call removed the key
    pub fn mark_used(&self, key: &str) -> bool {
        self.unused.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.unused.contains(key)
    }

    pub fn len(&self) -> usize {
        self.unused.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unused.is_empty()
    }

    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.unused.iter().map(|k| k.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Bare item names of the unused keys belonging to `base_name`
    pub fn items_for(&self, base_name: &str) -> Vec<String> {
        let prefix = format!("{}.", base_name);
        let mut items: Vec<String> = self
            .unused
            .iter()
            .filter_map(|k| k.key().strip_prefix(&prefix).map(String::from))
            .collect();
        items.sort();
        items
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryScan {
    pub root: PathBuf,
    pub files_scanned: usize,
    pub files_skipped: usize,
    /// Set when the directory could not be walked at all
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    pub directories: Vec<DirectoryScan>,
}

impl ScanSummary {
    pub fn files_scanned(&self) -> usize {
        self.directories.iter().map(|d| d.files_scanned).sum()
    }

    pub fn failed_directories(&self) -> Vec<&DirectoryScan> {
        self.directories.iter().filter(|d| d.error.is_some()).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PrunedFile {
    pub path: PathBuf,
    pub removed: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckResult {
    pub resources_collected: usize,
    pub files_scanned: usize,
    /// Unused keys, sorted
    pub unused: Vec<String>,
    pub pruned: Vec<PrunedFile>,
    pub dry_run: bool,
}
