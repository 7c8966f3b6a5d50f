//! Tax profile save flow
//!
//! Single-record form for the employee's own tax-id sync status, gated by
//! the one-way `isVerified` flag: once a save succeeds the whole form is
//! permanently read-only. There is no un-verify path.

use pit_client::{ClientError, RemoteStore};
use shared::models::{TaxSyncStatus, UserProfile};
use shared::request::{StoreRequest, TaxProfilePayload};
use thiserror::Error;
use tracing::info;

/// Tax profile form error type
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile was already verified; the form is read-only
    #[error("Tax profile already verified")]
    AlreadyVerified,

    /// The mandatory synced/unsynced choice was not made
    #[error("A sync status choice is required")]
    MissingSyncStatus,

    /// The explicit confirmation checkbox was not ticked
    #[error("Confirmation is required before saving")]
    NotConfirmed,

    /// Remote call failed; the profile is unchanged
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Form state behind the tax tab
#[derive(Debug, Clone, Default)]
pub struct TaxProfileForm {
    /// Mandatory binary choice (synced vs unsynced)
    pub sync_status: Option<TaxSyncStatus>,
    pub note: String,
    /// Explicit confirmation checkbox
    pub confirmed: bool,
}

/// Saves the employee's own tax-id snapshot
pub struct TaxProfileService<S> {
    store: S,
    profile: UserProfile,
}

impl<S: RemoteStore> TaxProfileService<S> {
    pub fn new(store: S, profile: UserProfile) -> Self {
        Self { store, profile }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Whether every field is now display-only
    pub fn is_read_only(&self) -> bool {
        self.profile.is_verified
    }

    /// Validate the form, submit the full snapshot, and on success flip the
    /// one-way verified flag
    pub async fn save(&mut self, form: &TaxProfileForm) -> Result<&UserProfile, ProfileError> {
        if self.profile.is_verified {
            return Err(ProfileError::AlreadyVerified);
        }
        let sync_status = form.sync_status.ok_or(ProfileError::MissingSyncStatus)?;
        if !form.confirmed {
            return Err(ProfileError::NotConfirmed);
        }

        let payload = TaxProfilePayload {
            email: self.profile.email.clone(),
            tax_id: self.profile.tax_id.clone(),
            sync_status,
            note: form.note.trim().to_string(),
            confirmed: true,
        };
        self.store
            .submit(StoreRequest::SaveTaxProfile(payload))
            .await?;

        self.profile.tax_sync_status = sync_status;
        self.profile.note = form.note.trim().to_string();
        self.profile.is_verified = true;
        info!(email = %self.profile.email, "tax profile verified");
        Ok(&self.profile)
    }
}
