pub mod dataset;
pub mod progress;

pub use dataset::{DatasetKind, DatasetSubtype, StorageUri};
pub use progress::UploadProgress;
