//! Remote store request envelope
//!
//! Every call to the spreadsheet web app is a POST of one JSON object whose
//! `type` field selects the server-side behavior. Payload fields sit at the
//! top level next to the tag; the client attaches the shared-secret `apiKey`
//! when it posts the envelope.
//!
//! Payload shapes stay distinct per mutation type; the server reads fixed
//! columns per type and no unified schema is inferred.

use serde::{Deserialize, Serialize};

use crate::models::{Address, ConfirmationStatus, DeclarationType, Relationship, TaxSyncStatus};

/// Tagged request envelope for the spreadsheet RPC endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreRequest {
    /// Check credentials against the User sheet
    #[serde(rename = "AUTH")]
    Auth { username: String, password: String },

    /// Load all dependents owned by an employee email
    #[serde(rename = "GET_DEPENDENTS")]
    GetDependents {
        #[serde(rename = "userEmail")]
        user_email: String,
    },

    /// Load the province -> ward taxonomy from the Data sheet
    #[serde(rename = "GET_LOCATION_DATA")]
    GetLocationData,

    /// Connection self-test: read a single cell
    #[serde(rename = "READ_CELL")]
    ReadCell {
        #[serde(rename = "sheetName")]
        sheet_name: String,
        cell: String,
    },

    /// Create a dependent (report increase)
    #[serde(rename = "NPT_ADD")]
    NptAdd(AddDependentPayload),

    /// Update a dependent and confirm it
    #[serde(rename = "NPT_EDIT")]
    NptEdit(EditDependentPayload),

    /// Confirm an unchanged dependent (lighter payload)
    #[serde(rename = "NPT_QUICK_CONFIRM")]
    NptQuickConfirm(QuickConfirmPayload),

    /// Report decrease for a dependent
    #[serde(rename = "NPT_TERMINATE")]
    NptTerminate(TerminatePayload),

    /// Save the employee's own tax-id profile
    #[serde(rename = "SAVE_TAX_PROFILE")]
    SaveTaxProfile(TaxProfilePayload),
}

impl StoreRequest {
    /// Wire value of the `type` tag, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "AUTH",
            Self::GetDependents { .. } => "GET_DEPENDENTS",
            Self::GetLocationData => "GET_LOCATION_DATA",
            Self::ReadCell { .. } => "READ_CELL",
            Self::NptAdd(_) => "NPT_ADD",
            Self::NptEdit(_) => "NPT_EDIT",
            Self::NptQuickConfirm(_) => "NPT_QUICK_CONFIRM",
            Self::NptTerminate(_) => "NPT_TERMINATE",
            Self::SaveTaxProfile(_) => "SAVE_TAX_PROFILE",
        }
    }
}

/// `NPT_ADD` payload: full personal + address snapshot plus the paper
/// dossier date. Status label is always "pending increase".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDependentPayload {
    pub id: String,
    pub owner_email: String,
    pub full_name: String,
    pub tax_id: String,
    pub dob: String,
    pub cccd: String,
    pub relationship: Relationship,
    pub permanent_address: Address,
    pub current_address: Address,
    pub paper_doc_date: String,
    pub note: String,
    pub confirmation_status: ConfirmationStatus,
    pub declaration_type: DeclarationType,
}

/// `NPT_EDIT` payload: full personal + address snapshot plus the deduction
/// months. Status label is always "complete".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDependentPayload {
    pub id: String,
    pub owner_email: String,
    pub full_name: String,
    pub tax_id: String,
    pub dob: String,
    pub cccd: String,
    pub relationship: Relationship,
    pub permanent_address: Address,
    pub current_address: Address,
    pub start_date: String,
    pub salary_deduction_date: String,
    pub note: String,
    pub confirmation_status: ConfirmationStatus,
    pub declaration_type: DeclarationType,
}

/// `NPT_QUICK_CONFIRM` payload: the server already holds full details, so
/// only the identifying fields travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickConfirmPayload {
    pub id: String,
    pub owner_email: String,
    pub full_name: String,
    pub tax_id: String,
    pub note: String,
    pub confirmation_status: ConfirmationStatus,
    pub declaration_type: DeclarationType,
}

/// `NPT_TERMINATE` payload: full snapshot plus the chosen termination year.
/// Status label is always "pending decrease".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminatePayload {
    pub id: String,
    pub owner_email: String,
    pub full_name: String,
    pub tax_id: String,
    pub dob: String,
    pub cccd: String,
    pub relationship: Relationship,
    pub permanent_address: Address,
    pub current_address: Address,
    pub termination_year: i32,
    pub note: String,
    pub confirmation_status: ConfirmationStatus,
    pub declaration_type: DeclarationType,
}

/// `SAVE_TAX_PROFILE` payload: the employee's own tax-id snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxProfilePayload {
    pub email: String,
    pub tax_id: String,
    pub sync_status: TaxSyncStatus,
    pub note: String,
    pub confirmed: bool,
}
