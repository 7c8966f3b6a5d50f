//! PIT Core - portal services below the presentation layer
//!
//! Session lifecycle, form validation, the dependent reconciliation engine,
//! the tax profile save flow, and the admin statistics aggregation. All
//! remote access goes through the [`pit_client::RemoteStore`] seam; nothing
//! here renders UI.

pub mod dependents;
pub mod profile;
pub mod reconcile;
pub mod session;
pub mod stats;
pub mod validate;

pub use dependents::{DependentError, DependentService, allowed_termination_years};
pub use profile::{ProfileError, TaxProfileForm, TaxProfileService};
pub use reconcile::{ChangeKind, DependentBook, classify_change};
pub use session::{LoginError, SessionError, SessionManager, SessionStore};
pub use stats::DependentOverview;
pub use validate::{AddressInput, DependentForm, FieldError, FieldIssue, ValidationErrors};
