//! User profile model
//!
//! The authenticated identity, as stored in the User sheet. The email is the
//! owner key for dependent lookups.

use serde::{Deserialize, Serialize};

/// Role column of the User sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    Staff,
}

/// Whether the user's tax id has been synced to the 12-digit format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxSyncStatus {
    Synced,
    Unsynced,
    #[default]
    Unknown,
}

/// The authenticated employee profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    /// National identity card number
    pub cccd: String,
    pub tax_id: String,
    /// One-way flag: set when the tax-id sync status has been confirmed.
    /// Once true the tax profile form is permanently read-only.
    #[serde(default)]
    pub is_verified: bool,
    /// Set upstream; makes pre-existing dependent records read-only
    #[serde(default)]
    pub is_dependents_verified: bool,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tax_sync_status: TaxSyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Cached dependent count from the User sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_count: Option<u32>,
}

impl UserProfile {
    /// Whether the admin statistics view is available
    pub fn is_admin(&self) -> bool {
        self.role == Some(UserRole::Admin)
    }
}
