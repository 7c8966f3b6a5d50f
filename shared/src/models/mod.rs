//! Data models
//!
//! Shared between the portal services and the spreadsheet backend (via the
//! RPC envelope). Wire field names are camelCase to match the sheet columns.

pub mod dependent;
pub mod location;
pub mod profile;

// Re-exports
pub use dependent::*;
pub use location::*;
pub use profile::*;
