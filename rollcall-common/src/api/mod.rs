//! Shared API types

pub mod types;

pub use types::{sign, ScanRequest, ScanResult};
