//! Remote store trait
//!
//! Seam between the portal services and the spreadsheet endpoint. The
//! production implementation is [`SheetClient`]; tests substitute an
//! in-memory store that records submitted envelopes.

use async_trait::async_trait;
use shared::models::{Dependent, LocationTaxonomy, UserProfile};
use shared::request::StoreRequest;

use crate::{ClientResult, SheetClient};

/// Operations the portal needs from the remote data store
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Authenticate and return the employee profile
    async fn authenticate(&self, username: &str, password: &str) -> ClientResult<UserProfile>;

    /// Load the dependents owned by an employee email
    async fn fetch_dependents(&self, owner_email: &str) -> ClientResult<Vec<Dependent>>;

    /// Load the province -> ward taxonomy
    async fn fetch_location_taxonomy(&self) -> ClientResult<LocationTaxonomy>;

    /// Submit a mutation envelope (fire-and-forget, single attempt)
    async fn submit(&self, request: StoreRequest) -> ClientResult<()>;
}

#[async_trait]
impl RemoteStore for SheetClient {
    async fn authenticate(&self, username: &str, password: &str) -> ClientResult<UserProfile> {
        SheetClient::authenticate(self, username, password).await
    }

    async fn fetch_dependents(&self, owner_email: &str) -> ClientResult<Vec<Dependent>> {
        SheetClient::fetch_dependents(self, owner_email).await
    }

    async fn fetch_location_taxonomy(&self) -> ClientResult<LocationTaxonomy> {
        SheetClient::fetch_location_taxonomy(self).await
    }

    async fn submit(&self, request: StoreRequest) -> ClientResult<()> {
        SheetClient::submit(self, &request).await
    }
}
