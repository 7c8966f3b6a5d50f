//! Dependent service
//!
//! Owns the reconciliation book for one employee and drives the add / edit /
//! confirm / send / terminate lifecycle against the remote store. Local
//! state is mutated only after a remote call succeeds or for operations that
//! are defined as local-only (add, edit, flag toggles).

use chrono::{Datelike, Local};
use pit_client::{ClientError, RemoteStore};
use shared::models::{ConfirmationStatus, DeclarationType, Dependent, UserProfile};
use shared::request::{
    AddDependentPayload, EditDependentPayload, QuickConfirmPayload, StoreRequest, TerminatePayload,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::reconcile::{ChangeKind, DependentBook, classify_change};
use crate::validate::{DependentForm, FieldIssue, ValidationErrors};

/// Dependent service error type
#[derive(Debug, Error)]
pub enum DependentError {
    /// Field-level form errors; recoverable, submission blocked
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No working record with this id
    #[error("Dependent not found: {0}")]
    NotFound(String),

    /// Record already sent, terminated, or confirmed by the server
    #[error("Dependent {0} is read-only")]
    Locked(String),

    /// The profile's dependents were verified upstream; pre-existing
    /// records no longer accept edits
    #[error("Pre-existing dependents are read-only for a verified profile")]
    PageReadOnly,

    /// Send fired before both info-checked and confirmed were set
    #[error("Dependent {0} must be info-checked and confirmed before sending")]
    NotReady(String),

    /// Termination year outside the selectable window
    #[error("Termination year {year} outside {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    /// Remote call failed; local state is unchanged
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Selectable termination years: ten years back through five ahead
pub fn allowed_termination_years(current_year: i32) -> std::ops::RangeInclusive<i32> {
    (current_year - 10)..=(current_year + 5)
}

/// Reconciliation engine plus remote submission for one employee
pub struct DependentService<S> {
    store: S,
    owner_email: String,
    /// Mirror of the profile's `isDependentsVerified` flag
    page_locked: bool,
    book: DependentBook,
}

impl<S: RemoteStore> DependentService<S> {
    /// Fetch the owner's dependents and seed the reconciliation book
    pub async fn load(store: S, profile: &UserProfile) -> Result<Self, DependentError> {
        let fetched = store.fetch_dependents(&profile.email).await?;
        info!(owner = %profile.email, count = fetched.len(), "loaded dependents");
        Ok(Self {
            store,
            owner_email: profile.email.clone(),
            page_locked: profile.is_dependents_verified,
            book: DependentBook::new(fetched),
        })
    }

    /// The working list, as the table renders it
    pub fn dependents(&self) -> &[Dependent] {
        self.book.working()
    }

    pub fn get(&self, id: &str) -> Option<&Dependent> {
        self.book.get(id)
    }

    fn unlocked_mut<'a>(
        book: &'a mut DependentBook,
        id: &str,
    ) -> Result<&'a mut Dependent, DependentError> {
        let record = book
            .get_mut(id)
            .ok_or_else(|| DependentError::NotFound(id.to_string()))?;
        if record.is_locked() {
            return Err(DependentError::Locked(id.to_string()));
        }
        Ok(record)
    }

    /// Stage a new record locally; no remote call fires here
    pub fn add_record(&mut self, form: DependentForm) -> Result<String, DependentError> {
        form.validate_new(Local::now().date_naive())?;
        let id = Dependent::generate_id();
        let dependent = form.into_new_dependent(id.clone());
        debug!(id = %id, "staged new dependent");
        self.book.push_new(dependent);
        Ok(id)
    }

    /// Stage an edit of an existing record locally
    pub fn edit_record(&mut self, id: &str, form: &DependentForm) -> Result<(), DependentError> {
        // Resolve the record once; state checks come before validation so
        // the caller learns the record state even with an incomplete form
        let record = self
            .book
            .get(id)
            .ok_or_else(|| DependentError::NotFound(id.to_string()))?;
        if self.page_locked && self.book.in_baseline(id) {
            return Err(DependentError::PageReadOnly);
        }
        if record.is_locked() {
            return Err(DependentError::Locked(id.to_string()));
        }
        form.validate_edit()?;
        let record = Self::unlocked_mut(&mut self.book, id)?;
        form.apply_to(record);
        debug!(id, "staged dependent edit");
        Ok(())
    }

    /// Flip the confirmation flag; purely local
    pub fn toggle_confirm(&mut self, id: &str) -> Result<bool, DependentError> {
        let record = Self::unlocked_mut(&mut self.book, id)?;
        record.is_confirmed = !record.is_confirmed;
        Ok(record.is_confirmed)
    }

    /// Set the info-checked flag; purely local
    pub fn set_info_checked(&mut self, id: &str, checked: bool) -> Result<(), DependentError> {
        let record = Self::unlocked_mut(&mut self.book, id)?;
        record.is_info_checked = checked;
        Ok(())
    }

    /// Update the note; notes stay editable on sent records
    pub fn set_note(&mut self, id: &str, note: &str) -> Result<(), DependentError> {
        let record = self
            .book
            .get_mut(id)
            .ok_or_else(|| DependentError::NotFound(id.to_string()))?;
        let note = note.trim();
        record.note = (!note.is_empty()).then(|| note.to_string());
        Ok(())
    }

    /// Finalize a record: classify against the baseline and submit the
    /// matching mutation. On success the record becomes permanently
    /// read-only for personal-field edits.
    pub async fn send(&mut self, id: &str) -> Result<ChangeKind, DependentError> {
        let record = self
            .book
            .get(id)
            .ok_or_else(|| DependentError::NotFound(id.to_string()))?;
        if record.is_locked() {
            return Err(DependentError::Locked(id.to_string()));
        }
        if !(record.is_info_checked && record.is_confirmed) {
            return Err(DependentError::NotReady(id.to_string()));
        }

        let kind = classify_change(self.book.baseline_of(id), record);
        let request = match kind {
            ChangeKind::Add => StoreRequest::NptAdd(self.add_payload(record)),
            ChangeKind::Edit => StoreRequest::NptEdit(self.edit_payload(record)),
            ChangeKind::QuickConfirm => {
                StoreRequest::NptQuickConfirm(self.quick_confirm_payload(record))
            }
        };
        info!(id, kind = request.kind(), "submitting dependent");
        self.store.submit(request).await?;

        // Only now, after the store accepted the call
        let record = self
            .book
            .get_mut(id)
            .ok_or_else(|| DependentError::NotFound(id.to_string()))?;
        record.is_sent = true;
        record.confirmation_status = Some(match kind {
            ChangeKind::Add => ConfirmationStatus::PendingIncrease,
            ChangeKind::Edit | ChangeKind::QuickConfirm => ConfirmationStatus::Complete,
        });
        Ok(kind)
    }

    /// Report decrease for an existing dependent
    pub async fn terminate(
        &mut self,
        id: &str,
        month: u32,
        year: i32,
    ) -> Result<(), DependentError> {
        if !(1..=12).contains(&month) {
            let mut errors = ValidationErrors::default();
            errors.push("terminationMonth", FieldIssue::BadMonth);
            return Err(errors.into());
        }
        let years = allowed_termination_years(Local::now().year());
        if !years.contains(&year) {
            return Err(DependentError::YearOutOfRange {
                year,
                min: *years.start(),
                max: *years.end(),
            });
        }

        let record = self
            .book
            .get(id)
            .ok_or_else(|| DependentError::NotFound(id.to_string()))?;
        if record.is_locked() {
            return Err(DependentError::Locked(id.to_string()));
        }

        let request = StoreRequest::NptTerminate(self.terminate_payload(record, year));
        info!(id, year, "reporting decrease");
        self.store.submit(request).await?;

        let record = self
            .book
            .get_mut(id)
            .ok_or_else(|| DependentError::NotFound(id.to_string()))?;
        record.is_terminated = true;
        record.end_date = format!("{month:02}/{year}");
        record.confirmation_status = Some(ConfirmationStatus::PendingDecrease);
        Ok(())
    }

    // ========== Per-type payloads (shapes preserved, never unified) ==========

    fn add_payload(&self, d: &Dependent) -> AddDependentPayload {
        AddDependentPayload {
            id: d.id.clone(),
            owner_email: self.owner_email.clone(),
            full_name: d.full_name.clone(),
            tax_id: d.tax_id.clone(),
            dob: d.dob.clone(),
            cccd: d.cccd.clone(),
            relationship: d.relationship,
            permanent_address: d.permanent_address.clone(),
            current_address: d.current_address.clone(),
            paper_doc_date: d.paper_doc_date.clone(),
            note: d.note_text().to_string(),
            confirmation_status: ConfirmationStatus::PendingIncrease,
            declaration_type: DeclarationType::Add,
        }
    }

    fn edit_payload(&self, d: &Dependent) -> EditDependentPayload {
        EditDependentPayload {
            id: d.id.clone(),
            owner_email: self.owner_email.clone(),
            full_name: d.full_name.clone(),
            tax_id: d.tax_id.clone(),
            dob: d.dob.clone(),
            cccd: d.cccd.clone(),
            relationship: d.relationship,
            permanent_address: d.permanent_address.clone(),
            current_address: d.current_address.clone(),
            start_date: d.start_date.clone(),
            salary_deduction_date: d.salary_deduction_date.clone(),
            note: d.note_text().to_string(),
            confirmation_status: ConfirmationStatus::Complete,
            declaration_type: DeclarationType::Confirm,
        }
    }

    fn quick_confirm_payload(&self, d: &Dependent) -> QuickConfirmPayload {
        QuickConfirmPayload {
            id: d.id.clone(),
            owner_email: self.owner_email.clone(),
            full_name: d.full_name.clone(),
            tax_id: d.tax_id.clone(),
            note: d.note_text().to_string(),
            confirmation_status: ConfirmationStatus::Complete,
            declaration_type: DeclarationType::Confirm,
        }
    }

    fn terminate_payload(&self, d: &Dependent, year: i32) -> TerminatePayload {
        TerminatePayload {
            id: d.id.clone(),
            owner_email: self.owner_email.clone(),
            full_name: d.full_name.clone(),
            tax_id: d.tax_id.clone(),
            dob: d.dob.clone(),
            cccd: d.cccd.clone(),
            relationship: d.relationship,
            permanent_address: d.permanent_address.clone(),
            current_address: d.current_address.clone(),
            termination_year: year,
            note: d.note_text().to_string(),
            confirmation_status: ConfirmationStatus::PendingDecrease,
            declaration_type: DeclarationType::Decrease,
        }
    }
}
