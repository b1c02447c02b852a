//! Core utilities for resxclean tools.
//!
//! This crate provides shared functionality for working with `.resx`
//! resource families, including:
//! - Naming rules for base resource files and their language variants
//! - A structural XML model of resource documents that round-trips verbatim
//! - Lazily walking source trees for scannable source files

mod constants;
mod document;
mod naming;
mod walker;

// Re-export public API
pub use constants::{RESX_EXTENSION, SOURCE_EXTENSIONS, UTF8_BOM};
pub use document::{Element, Node, ResxDocument};
pub use naming::{
    base_resource_files, is_base_resource_file, language_variants, list_resource_files,
    resource_base_name, resource_key,
};
pub use walker::{has_source_extension, source_files};
