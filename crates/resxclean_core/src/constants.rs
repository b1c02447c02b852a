//! Constants for file extensions used when collecting resources and sources.
//!
//! ## Source Extensions
//!
//! - **TypeScript**: `.ts`
//! - **Markup templates**: `.html`
//! - **C# code-behind**: `.cs`
//!
//! Files with any other extension are never scanned, even when they contain
//! the literal text of a resource key.

/// Extension of resource files (base files and language variants)
pub const RESX_EXTENSION: &str = "resx";

/// File extensions of source files that are scanned for resource references
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts",   // TypeScript source
    "html", // Markup templates
    "cs",   // C# code-behind
];

/// UTF-8 byte order mark, kept on resource files that start with one
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
