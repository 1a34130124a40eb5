//! Geovalid Client Library
//!
//! HTTP client for the remote validation service, plus aggregation of the
//! category-keyed report it returns into labelled findings for display.

pub mod client;
pub mod report;

pub use client::{ClientError, ValidationClient};
pub use report::{aggregate, CategoryFindings, ValidationReport};
