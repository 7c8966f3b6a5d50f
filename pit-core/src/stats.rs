//! Admin statistics aggregation
//!
//! Counts behind the overview dashboard and the home-tab badge. Pure
//! aggregation over a dependent list; role gating happens at the caller via
//! `UserProfile::is_admin`.

use serde::Serialize;
use shared::models::{Dependent, DependentStatus};

/// Status breakdown of a dependent list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependentOverview {
    pub total: usize,
    pub processing: usize,
    pub increase_succeeded: usize,
    pub decrease_succeeded: usize,
    pub not_applicable: usize,
    pub unconfirmed: usize,
    pub sent: usize,
    pub terminated: usize,
}

impl DependentOverview {
    pub fn from_dependents(dependents: &[Dependent]) -> Self {
        let mut overview = Self {
            total: dependents.len(),
            ..Self::default()
        };
        for d in dependents {
            match d.status {
                DependentStatus::Processing => overview.processing += 1,
                DependentStatus::IncreaseSucceeded => overview.increase_succeeded += 1,
                DependentStatus::DecreaseSucceeded => overview.decrease_succeeded += 1,
                DependentStatus::NotApplicable => overview.not_applicable += 1,
            }
            if !d.is_confirmed {
                overview.unconfirmed += 1;
            }
            if d.is_sent {
                overview.sent += 1;
            }
            if d.is_terminated {
                overview.terminated += 1;
            }
        }
        overview
    }
}

/// Home-tab badge: records still awaiting the user's confirmation
pub fn unconfirmed_count(dependents: &[Dependent]) -> usize {
    dependents.iter().filter(|d| !d.is_confirmed).count()
}
