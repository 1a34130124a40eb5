//! Shared key generation for uploaded objects.
//!
//! The timestamp is captured once per logical upload operation and embedded
//! in the key, so repeated uploads of identically-named files never collide.

use geovalid_core::constants::KEY_PREFIX;
use geovalid_core::models::DatasetSubtype;

/// Key for a single uploaded file:
/// `files/{kind}/{subtype}/{timestamp}_{name}`.
pub fn single_file_key(subtype: DatasetSubtype, timestamp_ms: i64, name: &str) -> String {
    format!(
        "{}/{}/{}/{}_{}",
        KEY_PREFIX,
        subtype.kind().key_segment(),
        subtype.key_segment(),
        timestamp_ms,
        name
    )
}

/// Key prefix shared by every member of an uploaded bundle:
/// `files/{kind}/{subtype}/{timestamp}_{base}`.
pub fn bundle_base_key(subtype: DatasetSubtype, timestamp_ms: i64, base: &str) -> String {
    single_file_key(subtype, timestamp_ms, base)
}

/// Key for one bundle member under its base prefix.
pub fn bundle_member_key(base_key: &str, relative_path: &str) -> String {
    format!("{}/{}", base_key, relative_path)
}
