//! Field validation for the dependent forms
//!
//! Validation is field-level and recoverable: every check appends a
//! `FieldError` and submission is blocked while any remain. The digit rules
//! for cccd and tax id are identical in create and edit mode and never
//! relaxed; what changes between modes is which date fields are mandatory.

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{Address, Dependent, Relationship};

/// What is wrong with a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldIssue {
    /// Field is empty or unchosen
    Required,
    /// Must be exactly 12 digits (cccd)
    Digits12,
    /// Must be exactly 10 or 12 digits (tax id)
    Digits10Or12,
    /// Not a parseable YYYY-MM-DD date
    BadDate,
    /// Date lies before today (distinct from missing)
    PastDate,
    /// Not a MM/YYYY month string
    BadMonth,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Required => "is required",
            Self::Digits12 => "must be exactly 12 digits",
            Self::Digits10Or12 => "must be exactly 10 or 12 digits",
            Self::BadDate => "is not a valid date",
            Self::PastDate => "must not be in the past",
            Self::BadMonth => "is not a valid MM/YYYY month",
        };
        f.write_str(text)
    }
}

/// One inline form error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub issue: FieldIssue,
}

/// Collected form errors; submission is blocked while non-empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, issue: FieldIssue) {
        self.0.push(FieldError { field, issue });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str, issue: FieldIssue) -> bool {
        self.0.iter().any(|e| e.field == field && e.issue == issue)
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", e.field, e.issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// National id rule: always exactly 12 digits
pub fn valid_cccd(s: &str) -> bool {
    is_digits(s) && s.len() == 12
}

/// Tax id rule: exactly 10 digits (pre-sync) or 12 digits (post-sync)
pub fn valid_tax_id(s: &str) -> bool {
    is_digits(s) && (s.len() == 10 || s.len() == 12)
}

/// MM/YYYY month string
pub fn valid_month_year(s: &str) -> bool {
    let Some((month, year)) = s.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 4 || !is_digits(month) || !is_digits(year) {
        return false;
    }
    matches!(month.parse::<u32>(), Ok(1..=12))
}

/// Address input of one form section
///
/// Ward is only meaningful relative to the chosen province, so changing the
/// province always discards the previously chosen ward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInput {
    pub province: String,
    pub ward: String,
    pub detail: String,
}

impl AddressInput {
    /// Change the province, clearing the ward when it actually changes
    pub fn set_province(&mut self, province: impl Into<String>) {
        let province = province.into();
        if self.province != province {
            self.ward.clear();
        }
        self.province = province;
    }

    fn validate(&self, fields: [&'static str; 3], errors: &mut ValidationErrors) {
        let [province, ward, detail] = fields;
        if self.province.trim().is_empty() {
            errors.push(province, FieldIssue::Required);
        }
        if self.ward.trim().is_empty() {
            errors.push(ward, FieldIssue::Required);
        }
        if self.detail.trim().is_empty() {
            errors.push(detail, FieldIssue::Required);
        }
    }

    fn to_address(&self) -> Address {
        Address {
            province: self.province.trim().to_string(),
            ward: self.ward.trim().to_string(),
            detail: self.detail.trim().to_string(),
        }
    }

    fn from_address(address: &Address) -> Self {
        Self {
            province: address.province.clone(),
            ward: address.ward.clone(),
            detail: address.detail.clone(),
        }
    }
}

/// Editable shape behind the add/edit dependent modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependentForm {
    pub full_name: String,
    pub tax_id: String,
    /// Date of birth (YYYY-MM-DD)
    pub dob: String,
    pub cccd: String,
    pub relationship: Option<Relationship>,
    pub permanent_address: AddressInput,
    pub current_address: AddressInput,
    /// Paper dossier date (YYYY-MM-DD), create mode only
    pub paper_doc_date: String,
    /// First deduction month (MM/YYYY), edit mode only
    pub start_date: String,
    /// Salary deduction month (MM/YYYY), edit mode only
    pub salary_deduction_date: String,
    pub note: String,
}

impl DependentForm {
    /// Prefill the form from an existing record (edit modal)
    pub fn from_dependent(dependent: &Dependent) -> Self {
        Self {
            full_name: dependent.full_name.clone(),
            tax_id: dependent.tax_id.clone(),
            dob: dependent.dob.clone(),
            cccd: dependent.cccd.clone(),
            relationship: Some(dependent.relationship),
            permanent_address: AddressInput::from_address(&dependent.permanent_address),
            current_address: AddressInput::from_address(&dependent.current_address),
            paper_doc_date: dependent.paper_doc_date.clone(),
            start_date: dependent.start_date.clone(),
            salary_deduction_date: dependent.salary_deduction_date.clone(),
            note: dependent.note_text().to_string(),
        }
    }

    fn validate_common(&self, errors: &mut ValidationErrors) {
        if self.full_name.trim().is_empty() {
            errors.push("fullName", FieldIssue::Required);
        }
        if self.dob.trim().is_empty() {
            errors.push("dob", FieldIssue::Required);
        }
        if self.relationship.is_none() {
            errors.push("relationship", FieldIssue::Required);
        }
        if self.cccd.trim().is_empty() {
            errors.push("cccd", FieldIssue::Required);
        } else if !valid_cccd(self.cccd.trim()) {
            errors.push("cccd", FieldIssue::Digits12);
        }
        self.permanent_address.validate(
            [
                "permanentAddress.province",
                "permanentAddress.ward",
                "permanentAddress.detail",
            ],
            errors,
        );
        self.current_address.validate(
            [
                "currentAddress.province",
                "currentAddress.ward",
                "currentAddress.detail",
            ],
            errors,
        );
    }

    /// Create-mode validation: tax id optional, paper dossier date mandatory
    /// and not before `today`
    pub fn validate_new(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        self.validate_common(&mut errors);

        let tax_id = self.tax_id.trim();
        if !tax_id.is_empty() && !valid_tax_id(tax_id) {
            errors.push("taxId", FieldIssue::Digits10Or12);
        }

        let paper = self.paper_doc_date.trim();
        if paper.is_empty() {
            errors.push("paperDocDate", FieldIssue::Required);
        } else {
            match NaiveDate::parse_from_str(paper, "%Y-%m-%d") {
                Ok(date) if date < today => errors.push("paperDocDate", FieldIssue::PastDate),
                Ok(_) => {}
                Err(_) => errors.push("paperDocDate", FieldIssue::BadDate),
            }
        }

        errors.into_result()
    }

    /// Edit-mode validation: tax id and both deduction months mandatory,
    /// paper dossier date no longer checked
    pub fn validate_edit(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        self.validate_common(&mut errors);

        let tax_id = self.tax_id.trim();
        if tax_id.is_empty() {
            errors.push("taxId", FieldIssue::Required);
        } else if !valid_tax_id(tax_id) {
            errors.push("taxId", FieldIssue::Digits10Or12);
        }

        for (field, value) in [
            ("startDate", &self.start_date),
            ("salaryDeductionDate", &self.salary_deduction_date),
        ] {
            let value = value.trim();
            if value.is_empty() {
                errors.push(field, FieldIssue::Required);
            } else if !valid_month_year(value) {
                errors.push(field, FieldIssue::BadMonth);
            }
        }

        errors.into_result()
    }

    /// Build a fresh local record from a create-validated form
    pub fn into_new_dependent(self, id: String) -> Dependent {
        let note = self.note.trim();
        Dependent {
            id,
            full_name: self.full_name.trim().to_string(),
            tax_id: self.tax_id.trim().to_string(),
            dob: self.dob.trim().to_string(),
            cccd: self.cccd.trim().to_string(),
            relationship: self.relationship.unwrap_or_default(),
            permanent_address: self.permanent_address.to_address(),
            current_address: self.current_address.to_address(),
            paper_doc_date: self.paper_doc_date.trim().to_string(),
            note: (!note.is_empty()).then(|| note.to_string()),
            ..Dependent::default()
        }
    }

    /// Apply an edit-validated form onto the working copy of a record
    pub fn apply_to(&self, dependent: &mut Dependent) {
        dependent.full_name = self.full_name.trim().to_string();
        dependent.tax_id = self.tax_id.trim().to_string();
        dependent.dob = self.dob.trim().to_string();
        dependent.cccd = self.cccd.trim().to_string();
        if let Some(relationship) = self.relationship {
            dependent.relationship = relationship;
        }
        dependent.permanent_address = self.permanent_address.to_address();
        dependent.current_address = self.current_address.to_address();
        dependent.start_date = self.start_date.trim().to_string();
        dependent.salary_deduction_date = self.salary_deduction_date.trim().to_string();
        let note = self.note.trim();
        dependent.note = (!note.is_empty()).then(|| note.to_string());
    }
}
