//! Unused resource detection for `.resx` resource families.
//!
//! This crate collects every `<baseName>.<itemName>` key from the base
//! resource files, searches source directories for their literal text, and
//! removes the keys that were never found from the base file and all of its
//! language variants.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use resxclean_unused::{Config, run_unused_resources_check};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     resource_dir: std::path::PathBuf::from("/path/to/Resources"),
//!     src_dirs: "/path/to/ClientApp /path/to/Controllers".to_string(),
//!     dry_run: true,
//!     json: false,
//! };
//!
//! let result = run_unused_resources_check(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! if result.unused.is_empty() {
//!     resxclean_unused::print_no_unused_message(&mut stdout, &result)?;
//! } else {
//!     resxclean_unused::print_unused_tree(&mut stdout, &result)?;
//! }
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod loader;
mod pruner;
mod reporter;
mod scanner;
mod types;

// Re-export public API
pub use checker::run_unused_resources_check;
pub use config::Config;
pub use loader::read_resource_keys;
pub use pruner::remove_unused;
pub use reporter::{
    print_json, print_no_resources_message, print_no_unused_message, print_unused_tree,
};
pub use scanner::search_sources;
pub use types::{CheckResult, DirectoryScan, PrunedFile, ResourceReferences, ScanSummary};
