//! Dependent reconciliation
//!
//! Two parallel lists keyed by id: `baseline` holds the records as fetched
//! from the store, `working` the locally edited copies. At save time the
//! working record is classified against its baseline counterpart to pick
//! which mutation type to submit. The baseline is retained only for this
//! diff; records are never deleted locally.

use shared::models::Dependent;

/// Which mutation a confirmed record resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// No baseline counterpart: the record is new
    Add,
    /// Baseline counterpart differs in a compared field
    Edit,
    /// Baseline counterpart is identical on every compared field; the server
    /// already holds full details, so only a light confirmation travels
    QuickConfirm,
}

/// Classify a working record against its baseline counterpart
///
/// Pure over its inputs; the compared fields are name, tax id, dob, cccd,
/// relationship, both addresses, and the two deduction months. Workflow
/// flags and notes never influence the classification.
pub fn classify_change(baseline: Option<&Dependent>, working: &Dependent) -> ChangeKind {
    match baseline {
        None => ChangeKind::Add,
        Some(baseline) if differs(baseline, working) => ChangeKind::Edit,
        Some(_) => ChangeKind::QuickConfirm,
    }
}

fn differs(baseline: &Dependent, working: &Dependent) -> bool {
    baseline.full_name != working.full_name
        || baseline.tax_id != working.tax_id
        || baseline.dob != working.dob
        || baseline.cccd != working.cccd
        || baseline.relationship != working.relationship
        || baseline.permanent_address != working.permanent_address
        || baseline.current_address != working.current_address
        || baseline.start_date != working.start_date
        || baseline.salary_deduction_date != working.salary_deduction_date
}

/// Baseline and working copies of the dependent list
#[derive(Debug, Clone, Default)]
pub struct DependentBook {
    baseline: Vec<Dependent>,
    working: Vec<Dependent>,
}

impl DependentBook {
    /// Seed both lists from a fetched dependent list
    pub fn new(fetched: Vec<Dependent>) -> Self {
        Self {
            baseline: fetched.clone(),
            working: fetched,
        }
    }

    /// The locally edited list, in insertion order
    pub fn working(&self) -> &[Dependent] {
        &self.working
    }

    pub fn get(&self, id: &str) -> Option<&Dependent> {
        self.working.iter().find(|d| d.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Dependent> {
        self.working.iter_mut().find(|d| d.id == id)
    }

    /// The last-synced counterpart of a record, if it was fetched
    pub fn baseline_of(&self, id: &str) -> Option<&Dependent> {
        self.baseline.iter().find(|d| d.id == id)
    }

    pub fn in_baseline(&self, id: &str) -> bool {
        self.baseline_of(id).is_some()
    }

    /// Append a locally created record to the working list only
    pub fn push_new(&mut self, dependent: Dependent) {
        self.working.push(dependent);
    }
}
