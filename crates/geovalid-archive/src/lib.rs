//! Geovalid Archive Library
//!
//! Inspection of uploaded ZIP archives: listing the entry table, locating a
//! nested geodatabase bundle, validating that the bundle is structurally
//! complete, and extracting member payloads for upload.
//!
//! Inspection is lazy: opening an archive parses only the central
//! directory. Member bytes are decompressed on demand, and only for the
//! members of the located bundle.

pub mod inspector;

pub use inspector::{
    ArchiveEntry, ArchiveError, ArchiveInspector, BundleDescriptor, BundleMember, ExtractedMember,
};
