//! Shared types for the PIT portal
//!
//! Domain models, the remote store request envelope, and the response
//! wrapper used by both the client crate and the portal services.

pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Address, ConfirmationStatus, DeclarationType, Dependent, DependentStatus, LocationTaxonomy,
    Relationship, TaxSyncStatus, UserProfile, UserRole,
};
pub use request::StoreRequest;
pub use response::{ResponseStatus, StoreResponse};
