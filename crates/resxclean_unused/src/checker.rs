use anyhow::{Result, bail};
use log::{debug, info, warn};

use crate::{
    config::Config,
    loader::read_resource_keys,
    pruner::remove_unused,
    scanner::search_sources,
    types::CheckResult,
};

/// Runs the full pipeline: collect keys, scan sources, prune the leftovers.
///
/// Pruning only starts after every source directory has been scanned. If a
/// directory could not be walked the run fails before any file is rewritten.
pub fn run_unused_resources_check(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting unused resources check");
    cfg.initialize()?;

    let mut result = CheckResult { dry_run: cfg.dry_run, ..Default::default() };

    let Some(refs) = read_resource_keys(&cfg.resource_dir)? else {
        warn!("No base resource files found in {}", cfg.resource_dir.display());
        return Ok(result);
    };
    result.resources_collected = refs.len();
    if refs.is_empty() {
        info!("Base resource files contain no items");
        return Ok(result);
    }

    let dirs = cfg.source_dirs();
    let summary = search_sources(&dirs, &refs);
    result.files_scanned = summary.files_scanned();
    debug!("Scanned {} files across {} directories", result.files_scanned, dirs.len());

    let failed = summary.failed_directories();
    if !failed.is_empty() {
        let reasons: Vec<&str> = failed.iter().filter_map(|d| d.error.as_deref()).collect();
        bail!("Could not scan {} source directories: {}", failed.len(), reasons.join("; "));
    }

    result.unused = refs.sorted_keys();
    info!("Remaining {} unused resources", result.unused.len());
    if refs.is_empty() {
        return Ok(result);
    }

    result.pruned = remove_unused(&cfg.resource_dir, &refs, cfg.dry_run)?;
    info!("Unused resources check complete. Pruned {} files", result.pruned.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resxclean_core::ResxDocument;
    use std::{
        fs,
        path::{Path, PathBuf},
    };
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn item_names(path: &Path) -> Vec<String> {
        let bytes = fs::read(path).unwrap();
        ResxDocument::parse(&bytes).unwrap().item_names().unwrap()
    }

    fn config(resource_dir: &Path, src_dirs: &[&Path]) -> Config {
        let src_dirs: Vec<String> =
            src_dirs.iter().map(|d| d.to_string_lossy().to_string()).collect();
        Config {
            resource_dir: resource_dir.to_path_buf(),
            src_dirs: src_dirs.join(" "),
            dry_run: false,
            json: false,
        }
    }

    const MESSAGES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <data name="Hello" xml:space="preserve">
    <value>Hello</value>
  </data>
  <data name="Bye" xml:space="preserve">
    <value>Bye</value>
  </data>
</root>
"#;

    #[test]
    fn test_unused_item_is_pruned_from_family() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let res = root.join("Resources");
        let src = root.join("src");
        let base = create_test_file(&res, "Messages.resx", MESSAGES);
        let fr = create_test_file(&res, "Messages.fr.resx", MESSAGES);
        create_test_file(&src, "app/greeting.ts", "title = Messages.Hello;");

        let result = run_unused_resources_check(config(&res, &[&src])).unwrap();

        assert_eq!(result.resources_collected, 2);
        assert_eq!(result.files_scanned, 1);
        assert_eq!(result.unused, vec!["Messages.Bye"]);
        assert_eq!(result.pruned.len(), 2);
        assert_eq!(item_names(&base), vec!["Hello"]);
        assert_eq!(item_names(&fr), vec!["Hello"]);
    }

    #[test]
    fn test_all_keys_referenced_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let res = root.join("Resources");
        let web = root.join("web");
        let api = root.join("api");
        let base = create_test_file(&res, "Messages.resx", MESSAGES);
        create_test_file(&web, "view.html", "{{ 'Messages.Hello' | t }}");
        create_test_file(&api, "Controller.cs", "Resources.Messages.Bye");

        let result = run_unused_resources_check(config(&res, &[&web, &api])).unwrap();

        assert!(result.unused.is_empty());
        assert!(result.pruned.is_empty());
        assert_eq!(fs::read_to_string(&base).unwrap(), MESSAGES);
    }

    #[test]
    fn test_no_base_files_does_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let res = root.join("Resources");
        let src = root.join("src");
        let fr = create_test_file(&res, "Messages.fr.resx", MESSAGES);
        create_test_file(&src, "app.ts", "");

        let result = run_unused_resources_check(config(&res, &[&src])).unwrap();

        assert_eq!(result.resources_collected, 0);
        assert_eq!(result.files_scanned, 0);
        assert_eq!(fs::read_to_string(&fr).unwrap(), MESSAGES);
    }

    #[test]
    fn test_reference_in_unscanned_extension_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let res = root.join("Resources");
        let src = root.join("src");
        let base = create_test_file(&res, "Messages.resx", MESSAGES);
        create_test_file(&src, "app.ts", "Messages.Hello");
        create_test_file(&src, "strings.json", r#"["Messages.Bye"]"#);

        let result = run_unused_resources_check(config(&res, &[&src])).unwrap();

        assert_eq!(result.unused, vec!["Messages.Bye"]);
        assert_eq!(item_names(&base), vec!["Hello"]);
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let res = root.join("Resources");
        let src = root.join("src");
        let base = create_test_file(&res, "Messages.resx", MESSAGES);
        let fr = create_test_file(&res, "Messages.fr.resx", MESSAGES);
        create_test_file(&src, "app.ts", "Messages.Hello");

        run_unused_resources_check(config(&res, &[&src])).unwrap();
        let base_after = fs::read_to_string(&base).unwrap();
        let fr_after = fs::read_to_string(&fr).unwrap();

        let second = run_unused_resources_check(config(&res, &[&src])).unwrap();

        assert!(second.unused.is_empty());
        assert!(second.pruned.is_empty());
        assert_eq!(fs::read_to_string(&base).unwrap(), base_after);
        assert_eq!(fs::read_to_string(&fr).unwrap(), fr_after);
    }

    #[test]
    fn test_failed_directory_aborts_before_pruning() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let res = root.join("Resources");
        let src = root.join("src");
        let missing = root.join("missing");
        let base = create_test_file(&res, "Messages.resx", MESSAGES);
        create_test_file(&src, "app.ts", "Messages.Hello");

        let result = run_unused_resources_check(config(&res, &[&src, &missing]));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&base).unwrap(), MESSAGES);
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_directory_aborts_before_pruning() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let res = root.join("Resources");
        let src = root.join("src");
        let base = create_test_file(&res, "Messages.resx", "<root><data name=\"Hello\"/></root>");
        create_test_file(&src, "app.ts", "Messages.Hello");

        fs::set_permissions(&src, fs::Permissions::from_mode(0o311)).unwrap();
        if fs::read_dir(&src).is_ok() {
            // permissions are not enforced for this user
            fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }
        let result = run_unused_resources_check(config(&res, &[&src]));
        fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&base).unwrap(), "<root><data name=\"Hello\"/></root>");
    }

    #[test]
    fn test_dry_run_reports_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let res = root.join("Resources");
        let src = root.join("src");
        let base = create_test_file(&res, "Messages.resx", MESSAGES);
        create_test_file(&src, "app.ts", "Messages.Hello");

        let mut cfg = config(&res, &[&src]);
        cfg.dry_run = true;
        let result = run_unused_resources_check(cfg).unwrap();

        assert!(result.dry_run);
        assert_eq!(result.pruned.len(), 1);
        assert_eq!(fs::read_to_string(&base).unwrap(), MESSAGES);
    }

    #[test]
    fn test_sibling_item_sets_match_after_pruning() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let res = root.join("Resources");
        let src = root.join("src");
        let base = create_test_file(
            &res,
            "Labels.resx",
            r#"<root><data name="A"/><data name="B"/><data name="C"/></root>"#,
        );
        let nl = create_test_file(
            &res,
            "Labels.nl.resx",
            r#"<root><data name="C"/><data name="B"/><data name="A"/></root>"#,
        );
        create_test_file(&src, "labels.ts", "Labels.B");

        run_unused_resources_check(config(&res, &[&src])).unwrap();

        let mut base_items = item_names(&base);
        let mut nl_items = item_names(&nl);
        base_items.sort();
        nl_items.sort();
        assert_eq!(base_items, vec!["B"]);
        assert_eq!(base_items, nl_items);
    }
}
