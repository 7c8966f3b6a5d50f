//! Location taxonomy
//!
//! Province -> ward mapping loaded from the Data sheet. Ordered so dropdowns
//! render deterministically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hierarchical province/ward data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationTaxonomy(pub BTreeMap<String, Vec<String>>);

impl LocationTaxonomy {
    pub fn provinces(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Wards of a province; empty when the province is unknown
    pub fn wards_of(&self, province: &str) -> &[String] {
        self.0.get(province).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, province: &str, ward: &str) -> bool {
        self.wards_of(province).iter().any(|w| w == ward)
    }
}
