use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::{Cursor, Read};
use thiserror::Error;
use zip::ZipArchive;

use geovalid_core::constants::ESSENTIAL_BUNDLE_EXTENSIONS;

/// Archive inspection errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Archive is corrupt or not a ZIP container: {0}")]
    Corrupt(String),

    #[error("No geodatabase bundle found in archive")]
    BundleNotFound,

    #[error("Bundle {bundle} contains no files")]
    EmptyBundle { bundle: String },

    #[error("Bundle {bundle} is missing essential geodatabase files")]
    MissingEssentialFiles { bundle: String },
}

/// One entry of the archive's table: relative path and directory flag.
/// Payload bytes are not held here; they are read on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub is_dir: bool,
}

/// A file belonging to a located bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleMember {
    /// Path relative to the bundle base, separators normalized to `/`.
    pub relative_path: String,
    /// Path as stored in the archive, used to read the payload back.
    pub archive_path: String,
}

/// A located geodatabase bundle: its base folder name, the member files
/// under it, and the set of file-extension suffixes observed among them.
#[derive(Debug, Clone)]
pub struct BundleDescriptor {
    /// Base folder name, e.g. `data.gdb`.
    pub base: String,
    pub members: Vec<BundleMember>,
    /// Lowercased extensions without the dot.
    pub extensions: BTreeSet<String>,
}

impl BundleDescriptor {
    /// Name-based structural validation. File contents are not parsed; a
    /// bundle with well-named but garbage members passes (documented
    /// limitation).
    pub fn validate_essentials(&self) -> Result<(), ArchiveError> {
        if self.members.is_empty() {
            return Err(ArchiveError::EmptyBundle {
                bundle: self.base.clone(),
            });
        }

        let has_essential = ESSENTIAL_BUNDLE_EXTENSIONS
            .iter()
            .any(|ext| self.extensions.contains(*ext));
        if !has_essential {
            return Err(ArchiveError::MissingEssentialFiles {
                bundle: self.base.clone(),
            });
        }

        Ok(())
    }
}

/// A bundle member with its payload decompressed, ready for upload.
#[derive(Debug, Clone)]
pub struct ExtractedMember {
    pub relative_path: String,
    pub data: Bytes,
}

/// Lazy ZIP inspector over an in-memory archive.
pub struct ArchiveInspector {
    archive: ZipArchive<Cursor<Bytes>>,
    entries: Vec<ArchiveEntry>,
}

/// Split an archive path on both separator conventions. ZIP entries written
/// by Windows tooling can carry back-slashes.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty())
}

fn is_gdb_segment(segment: &str) -> bool {
    segment.to_lowercase().ends_with(".gdb")
}

impl ArchiveInspector {
    /// Parse the archive's central directory. Member payloads are not
    /// decompressed here.
    pub fn open(data: Bytes) -> Result<Self, ArchiveError> {
        let mut archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| ArchiveError::Corrupt(e.to_string()))?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive
                .by_index_raw(index)
                .map_err(|e| ArchiveError::Corrupt(e.to_string()))?;
            entries.push(ArchiveEntry {
                path: file.name().to_string(),
                is_dir: file.is_dir(),
            });
        }

        tracing::debug!(entry_count = entries.len(), "Opened archive");

        Ok(ArchiveInspector { archive, entries })
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Locate the geodatabase bundle inside the archive.
    ///
    /// Entry paths are scanned in table order for a segment ending in
    /// `.gdb` (case-insensitive); the first match fixes the bundle base.
    /// The bundle may sit below intermediate folders.
    pub fn locate_bundle(&self) -> Result<BundleDescriptor, ArchiveError> {
        let (base, prefix_segments) = self
            .entries
            .iter()
            .find_map(|entry| {
                let segments: Vec<&str> = split_segments(&entry.path).collect();
                let position = segments.iter().position(|s| is_gdb_segment(s))?;
                Some((
                    segments[position].to_string(),
                    segments[..=position]
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>(),
                ))
            })
            .ok_or(ArchiveError::BundleNotFound)?;

        let mut members = Vec::new();
        let mut extensions = BTreeSet::new();

        for entry in &self.entries {
            if entry.is_dir {
                continue;
            }
            let segments: Vec<&str> = split_segments(&entry.path).collect();
            if segments.len() <= prefix_segments.len() {
                continue;
            }
            if !segments
                .iter()
                .zip(prefix_segments.iter())
                .all(|(a, b)| a == b)
            {
                continue;
            }

            let relative_path = segments[prefix_segments.len()..].join("/");
            // extension of the file name itself, not of any dotted parent folder
            if let Some((_, ext)) = segments.last().and_then(|name| name.rsplit_once('.')) {
                extensions.insert(ext.to_lowercase());
            }
            members.push(BundleMember {
                relative_path,
                archive_path: entry.path.clone(),
            });
        }

        tracing::debug!(
            bundle = %base,
            member_count = members.len(),
            "Located bundle in archive"
        );

        Ok(BundleDescriptor {
            base,
            members,
            extensions,
        })
    }

    /// Decompress the payloads of the descriptor's members. Only the bundle
    /// members are materialized, not the rest of the archive.
    pub fn extract_members(
        &mut self,
        descriptor: &BundleDescriptor,
    ) -> Result<Vec<ExtractedMember>, ArchiveError> {
        let mut extracted = Vec::with_capacity(descriptor.members.len());

        for member in &descriptor.members {
            let mut file = self
                .archive
                .by_name(&member.archive_path)
                .map_err(|e| ArchiveError::Corrupt(e.to_string()))?;
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .map_err(|e| ArchiveError::Corrupt(e.to_string()))?;
            extracted.push(ExtractedMember {
                relative_path: member.relative_path.clone(),
                data: Bytes::from(data),
            });
        }

        Ok(extracted)
    }
}
