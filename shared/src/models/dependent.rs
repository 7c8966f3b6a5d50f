//! Dependent model
//!
//! A person declared for tax deduction, as stored in the NPT sheet. One row
//! per dependent, keyed by an opaque `id`. Records fetched from the sheet
//! form the diff baseline; locally created records get a fresh uuid.

use serde::{Deserialize, Serialize};

/// Relationship of a dependent to the declaring employee (closed set)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Parent,
    Child,
    Spouse,
    #[default]
    Other,
}

/// Processing status of a dependent declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependentStatus {
    #[default]
    Processing,
    IncreaseSucceeded,
    DecreaseSucceeded,
    /// Increase was reported but does not apply at this company
    NotApplicable,
}

/// Server-reported confirmation label written back after a mutation
///
/// Exact wire strings are the sheet's status column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationStatus {
    #[serde(rename = "pending increase")]
    PendingIncrease,
    #[serde(rename = "complete")]
    Complete,
    #[serde(rename = "pending decrease")]
    PendingDecrease,
}

/// Declaration type column accompanying every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationType {
    Add,
    Confirm,
    Decrease,
}

/// Postal address (province / ward / free-text detail)
///
/// Ward is only meaningful relative to the chosen province.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub province: String,
    pub ward: String,
    pub detail: String,
}

/// A declared tax dependent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub id: String,
    pub full_name: String,
    /// Personal tax identifier: empty, 10 digits (pre-sync) or 12 digits
    pub tax_id: String,
    /// Date of birth (YYYY-MM-DD)
    pub dob: String,
    /// National identity card number, exactly 12 digits
    pub cccd: String,
    pub relationship: Relationship,
    pub permanent_address: Address,
    pub current_address: Address,
    #[serde(default)]
    pub status: DependentStatus,
    /// First deduction month (MM/YYYY), required once a record is finalized
    #[serde(default)]
    pub start_date: String,
    /// Reserved; written as MM/YYYY on termination
    #[serde(default)]
    pub end_date: String,
    /// Salary deduction month (MM/YYYY)
    #[serde(default)]
    pub salary_deduction_date: String,
    /// Date the paper dossier was submitted (YYYY-MM-DD)
    #[serde(default)]
    pub paper_doc_date: String,
    #[serde(default)]
    pub is_confirmed: bool,
    #[serde(default)]
    pub is_info_checked: bool,
    #[serde(default)]
    pub is_sent: bool,
    #[serde(default)]
    pub is_terminated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<ConfirmationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Dependent {
    /// Generate a fresh id for a locally created record
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Whether the record is permanently read-only for personal-field edits
    ///
    /// Set once a mutation has been submitted (sent or terminated) or the
    /// server has written back a confirmation label.
    pub fn is_locked(&self) -> bool {
        self.is_sent || self.is_terminated || self.confirmation_status.is_some()
    }

    pub fn note_text(&self) -> &str {
        self.note.as_deref().unwrap_or_default()
    }
}
