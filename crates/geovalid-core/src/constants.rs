//! Shared constants for the upload pipeline.

/// Root prefix for every uploaded object key.
pub const KEY_PREFIX: &str = "files";

/// File-extension suffixes a geodatabase bundle must contain at least one of
/// to be considered structurally complete. Lowercase, without the dot.
pub const ESSENTIAL_BUNDLE_EXTENSIONS: [&str; 3] = ["gdbtable", "gdbindexes", "gdbtablx"];

/// Content type used for bundle members, which carry no MIME information
/// of their own inside the archive.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
