//! FitAdmin Table Library
//!
//! This crate provides the tabular view-model for the FitAdmin fitness-platform
//! admin dashboard: filtering, sorting and pagination over in-memory records,
//! CSV export of the filtered row set, and saved per-table view preferences.

pub mod domain;
pub mod error;
pub mod table;
pub mod utils;
