//! PIT Client - HTTP client for the spreadsheet web app
//!
//! Provides single-attempt POST calls carrying the tagged request envelope
//! and the shared-secret API key. No retry, backoff, or idempotency layer.

pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::SheetClient;
pub use store::RemoteStore;

// Re-export shared types for convenience
pub use shared::{StoreRequest, StoreResponse};
