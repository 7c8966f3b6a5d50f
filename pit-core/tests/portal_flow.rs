//! End-to-end portal flows against an in-memory remote store

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Datelike, Days, Local};
use pit_client::{ClientError, ClientResult, RemoteStore};
use pit_core::dependents::{DependentError, DependentService};
use pit_core::profile::{ProfileError, TaxProfileForm, TaxProfileService};
use pit_core::reconcile::ChangeKind;
use pit_core::session::{LoginError, SessionManager};
use pit_core::validate::{AddressInput, DependentForm};
use shared::models::{
    Address, ConfirmationStatus, Dependent, LocationTaxonomy, Relationship, TaxSyncStatus,
    UserProfile,
};
use shared::request::StoreRequest;

#[derive(Clone)]
enum AuthBehavior {
    Accept,
    Reject(&'static str),
    Unauthorized,
}

/// In-memory store: serves fixtures and records submitted envelopes
#[derive(Clone)]
struct MockStore {
    profile: UserProfile,
    auth: AuthBehavior,
    dependents: Vec<Dependent>,
    fail_submit: Arc<AtomicBool>,
    submissions: Arc<Mutex<Vec<StoreRequest>>>,
}

impl MockStore {
    fn new(profile: UserProfile, dependents: Vec<Dependent>) -> Self {
        Self {
            profile,
            auth: AuthBehavior::Accept,
            dependents,
            fail_submit: Arc::new(AtomicBool::new(false)),
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn submissions(&self) -> Vec<StoreRequest> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteStore for MockStore {
    async fn authenticate(&self, _username: &str, _password: &str) -> ClientResult<UserProfile> {
        match self.auth {
            AuthBehavior::Accept => Ok(self.profile.clone()),
            AuthBehavior::Reject(message) => Err(ClientError::Rejected(message.to_string())),
            AuthBehavior::Unauthorized => Err(ClientError::Unauthorized),
        }
    }

    async fn fetch_dependents(&self, _owner_email: &str) -> ClientResult<Vec<Dependent>> {
        Ok(self.dependents.clone())
    }

    async fn fetch_location_taxonomy(&self) -> ClientResult<LocationTaxonomy> {
        Ok(LocationTaxonomy::default())
    }

    async fn submit(&self, request: StoreRequest) -> ClientResult<()> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ClientError::Rejected("sheet unavailable".to_string()));
        }
        self.submissions.lock().unwrap().push(request);
        Ok(())
    }
}

fn owner() -> UserProfile {
    UserProfile {
        full_name: "Nguyen Van A".to_string(),
        email: "a.nguyen@company.com".to_string(),
        cccd: "012345678901".to_string(),
        tax_id: "8123456789".to_string(),
        ..UserProfile::default()
    }
}

fn baseline_dependent(id: &str) -> Dependent {
    Dependent {
        id: id.to_string(),
        full_name: "Tran Thi B".to_string(),
        tax_id: "9876543210".to_string(),
        dob: "1960-05-15".to_string(),
        cccd: "034567890123".to_string(),
        relationship: Relationship::Parent,
        permanent_address: Address {
            province: "Ha Noi".to_string(),
            ward: "Hang Dao".to_string(),
            detail: "12 Hang Dao".to_string(),
        },
        current_address: Address {
            province: "Ha Noi".to_string(),
            ward: "Dich Vong".to_string(),
            detail: "So 5 Duy Tan".to_string(),
        },
        start_date: "01/2023".to_string(),
        salary_deduction_date: "01/2023".to_string(),
        ..Dependent::default()
    }
}

fn tomorrow() -> String {
    let date = Local::now().date_naive() + Days::new(1);
    date.format("%Y-%m-%d").to_string()
}

fn new_dependent_form() -> DependentForm {
    DependentForm {
        full_name: "Nguyen Thi C".to_string(),
        tax_id: String::new(),
        dob: "2015-01-01".to_string(),
        cccd: "045678901234".to_string(),
        relationship: Some(Relationship::Child),
        permanent_address: AddressInput {
            province: "Ha Noi".to_string(),
            ward: "Hang Dao".to_string(),
            detail: "12 Hang Dao".to_string(),
        },
        current_address: AddressInput {
            province: "Ha Noi".to_string(),
            ward: "Hang Dao".to_string(),
            detail: "12 Hang Dao".to_string(),
        },
        paper_doc_date: tomorrow(),
        ..DependentForm::default()
    }
}

// ========== Reconciliation / send ==========

#[tokio::test]
async fn fresh_record_stays_local_until_checked_confirmed_and_sent() {
    let store = MockStore::new(owner(), Vec::new());
    let mut service = DependentService::load(store.clone(), &owner()).await.unwrap();

    let mut form = new_dependent_form();
    let paper_date = tomorrow();
    form.paper_doc_date = paper_date.clone();
    let id = service.add_record(form).unwrap();
    // Saving the add form is local only
    assert!(store.submissions().is_empty());
    assert_eq!(service.dependents().len(), 1);
    assert!(service.get(&id).unwrap().confirmation_status.is_none());

    // Send is gated on both flags
    assert!(matches!(
        service.send(&id).await,
        Err(DependentError::NotReady(_))
    ));
    service.set_info_checked(&id, true).unwrap();
    assert!(matches!(
        service.send(&id).await,
        Err(DependentError::NotReady(_))
    ));
    service.toggle_confirm(&id).unwrap();

    let kind = service.send(&id).await.unwrap();
    assert_eq!(kind, ChangeKind::Add);

    let submissions = store.submissions();
    assert_eq!(submissions.len(), 1);
    match &submissions[0] {
        StoreRequest::NptAdd(payload) => {
            assert_eq!(payload.owner_email, "a.nguyen@company.com");
            assert_eq!(payload.full_name, "Nguyen Thi C");
            assert_eq!(payload.confirmation_status, ConfirmationStatus::PendingIncrease);
            assert_eq!(payload.paper_doc_date, paper_date);
        }
        other => panic!("expected NPT_ADD, got {}", other.kind()),
    }

    let record = service.get(&id).unwrap();
    assert!(record.is_sent);
    assert_eq!(
        record.confirmation_status,
        Some(ConfirmationStatus::PendingIncrease)
    );
}

#[tokio::test]
async fn unchanged_baseline_record_quick_confirms() {
    let store = MockStore::new(owner(), vec![baseline_dependent("1")]);
    let mut service = DependentService::load(store.clone(), &owner()).await.unwrap();

    service.set_info_checked("1", true).unwrap();
    service.toggle_confirm("1").unwrap();
    let kind = service.send("1").await.unwrap();
    assert_eq!(kind, ChangeKind::QuickConfirm);

    let submissions = store.submissions();
    match &submissions[0] {
        StoreRequest::NptQuickConfirm(payload) => {
            assert_eq!(payload.id, "1");
            assert_eq!(payload.tax_id, "9876543210");
            assert_eq!(payload.confirmation_status, ConfirmationStatus::Complete);
        }
        other => panic!("expected NPT_QUICK_CONFIRM, got {}", other.kind()),
    }
}

#[tokio::test]
async fn edited_baseline_record_sends_full_edit() {
    let store = MockStore::new(owner(), vec![baseline_dependent("1")]);
    let mut service = DependentService::load(store.clone(), &owner()).await.unwrap();

    let mut form = DependentForm::from_dependent(service.get("1").unwrap());
    form.full_name = "Tran Thi B (nee Le)".to_string();
    service.edit_record("1", &form).unwrap();
    // Edits are staged, not submitted
    assert!(store.submissions().is_empty());

    service.set_info_checked("1", true).unwrap();
    service.toggle_confirm("1").unwrap();
    let kind = service.send("1").await.unwrap();
    assert_eq!(kind, ChangeKind::Edit);

    match &store.submissions()[0] {
        StoreRequest::NptEdit(payload) => {
            assert_eq!(payload.full_name, "Tran Thi B (nee Le)");
            assert_eq!(payload.start_date, "01/2023");
            assert_eq!(payload.salary_deduction_date, "01/2023");
            assert_eq!(payload.confirmation_status, ConfirmationStatus::Complete);
        }
        other => panic!("expected NPT_EDIT, got {}", other.kind()),
    }
}

#[tokio::test]
async fn sent_record_accepts_no_further_mutations() {
    let store = MockStore::new(owner(), vec![baseline_dependent("1")]);
    let mut service = DependentService::load(store.clone(), &owner()).await.unwrap();

    service.set_info_checked("1", true).unwrap();
    service.toggle_confirm("1").unwrap();
    service.send("1").await.unwrap();

    let form = DependentForm::from_dependent(service.get("1").unwrap());
    assert!(matches!(
        service.edit_record("1", &form),
        Err(DependentError::Locked(_))
    ));
    assert!(matches!(
        service.send("1").await,
        Err(DependentError::Locked(_))
    ));
    assert!(matches!(
        service.terminate("1", 6, Local::now().year()).await,
        Err(DependentError::Locked(_))
    ));
    assert!(matches!(
        service.toggle_confirm("1"),
        Err(DependentError::Locked(_))
    ));
    // Only the original send reached the store
    assert_eq!(store.submissions().len(), 1);

    // The note stays editable on a sent record
    service.set_note("1", "follow up in March").unwrap();
    assert_eq!(service.get("1").unwrap().note_text(), "follow up in March");
}

#[tokio::test]
async fn server_labelled_record_is_read_only_from_the_start() {
    let mut fetched = baseline_dependent("1");
    fetched.confirmation_status = Some(ConfirmationStatus::Complete);
    let store = MockStore::new(owner(), vec![fetched]);
    let mut service = DependentService::load(store.clone(), &owner()).await.unwrap();

    assert!(matches!(
        service.toggle_confirm("1"),
        Err(DependentError::Locked(_))
    ));
    assert!(matches!(
        service.send("1").await,
        Err(DependentError::Locked(_))
    ));
}

#[tokio::test]
async fn failed_submit_leaves_the_record_untouched() {
    let store = MockStore::new(owner(), vec![baseline_dependent("1")]);
    let mut service = DependentService::load(store.clone(), &owner()).await.unwrap();

    service.set_info_checked("1", true).unwrap();
    service.toggle_confirm("1").unwrap();
    store.fail_submit.store(true, Ordering::SeqCst);

    assert!(matches!(
        service.send("1").await,
        Err(DependentError::Client(_))
    ));
    let record = service.get("1").unwrap();
    assert!(!record.is_sent);
    assert!(record.confirmation_status.is_none());

    // The operation can be retried by the user once the store recovers
    store.fail_submit.store(false, Ordering::SeqCst);
    assert_eq!(service.send("1").await.unwrap(), ChangeKind::QuickConfirm);
}

// ========== Terminate ==========

#[tokio::test]
async fn terminate_reports_decrease_and_locks_the_record() {
    let store = MockStore::new(owner(), vec![baseline_dependent("1")]);
    let mut service = DependentService::load(store.clone(), &owner()).await.unwrap();

    let year = Local::now().year();
    service.terminate("1", 6, year).await.unwrap();

    match &store.submissions()[0] {
        StoreRequest::NptTerminate(payload) => {
            assert_eq!(payload.termination_year, year);
            assert_eq!(payload.cccd, "034567890123");
            assert_eq!(
                payload.confirmation_status,
                ConfirmationStatus::PendingDecrease
            );
        }
        other => panic!("expected NPT_TERMINATE, got {}", other.kind()),
    }

    let record = service.get("1").unwrap();
    assert!(record.is_terminated);
    assert_eq!(record.end_date, format!("06/{year}"));
    assert_eq!(
        record.confirmation_status,
        Some(ConfirmationStatus::PendingDecrease)
    );
}

#[tokio::test]
async fn terminate_rejects_years_outside_the_window() {
    let store = MockStore::new(owner(), vec![baseline_dependent("1")]);
    let mut service = DependentService::load(store.clone(), &owner()).await.unwrap();

    let current = Local::now().year();
    for year in [current - 11, current + 6] {
        assert!(matches!(
            service.terminate("1", 6, year).await,
            Err(DependentError::YearOutOfRange { .. })
        ));
    }
    assert!(matches!(
        service.terminate("1", 13, current).await,
        Err(DependentError::Validation(_))
    ));
    assert!(store.submissions().is_empty());
}

// ========== Page-level read-only ==========

#[tokio::test]
async fn verified_profile_locks_preexisting_records_but_not_new_ones() {
    let mut profile = owner();
    profile.is_dependents_verified = true;
    let store = MockStore::new(profile.clone(), vec![baseline_dependent("1")]);
    let mut service = DependentService::load(store.clone(), &profile).await.unwrap();

    let form = DependentForm::from_dependent(service.get("1").unwrap());
    assert!(matches!(
        service.edit_record("1", &form),
        Err(DependentError::PageReadOnly)
    ));

    // Locally created records are still editable
    let id = service.add_record(new_dependent_form()).unwrap();
    let mut form = DependentForm::from_dependent(service.get(&id).unwrap());
    form.tax_id = "1234567890".to_string();
    form.start_date = "01/2026".to_string();
    form.salary_deduction_date = "01/2026".to_string();
    service.edit_record(&id, &form).unwrap();
}

#[tokio::test]
async fn edit_of_unknown_record_is_not_found_even_when_page_locked() {
    let mut profile = owner();
    profile.is_dependents_verified = true;
    let store = MockStore::new(profile.clone(), vec![baseline_dependent("1")]);
    let mut service = DependentService::load(store, &profile).await.unwrap();

    let form = DependentForm::from_dependent(service.get("1").unwrap());
    assert!(matches!(
        service.edit_record("nope", &form),
        Err(DependentError::NotFound(_))
    ));
}

// ========== Session ==========

#[tokio::test]
async fn login_persists_the_profile_until_logout() {
    let dir = tempfile::tempdir().unwrap();
    let store = MockStore::new(owner(), Vec::new());
    let manager = SessionManager::new(store, dir.path());

    let profile = manager.login("a.nguyen", "secret").await.unwrap();
    assert_eq!(profile.email, "a.nguyen@company.com");
    assert_eq!(manager.restore().unwrap(), Some(profile));

    manager.logout().unwrap();
    assert_eq!(manager.restore().unwrap(), None);
}

#[tokio::test]
async fn login_distinguishes_bad_credentials_from_unconfigured_access() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = MockStore::new(owner(), Vec::new());
    store.auth = AuthBehavior::Reject("wrong password");
    let manager = SessionManager::new(store, dir.path());
    match manager.login("a.nguyen", "nope").await {
        Err(LoginError::InvalidCredentials(message)) => assert_eq!(message, "wrong password"),
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
    // A failed login leaves no session behind
    assert_eq!(manager.restore().unwrap(), None);

    let mut store = MockStore::new(owner(), Vec::new());
    store.auth = AuthBehavior::Unauthorized;
    let manager = SessionManager::new(store, dir.path());
    assert!(matches!(
        manager.login("a.nguyen", "secret").await,
        Err(LoginError::AccessNotConfigured)
    ));
}

// ========== Tax profile ==========

#[tokio::test]
async fn tax_profile_save_is_a_one_way_transition() {
    let store = MockStore::new(owner(), Vec::new());
    let mut service = TaxProfileService::new(store.clone(), owner());
    assert!(!service.is_read_only());

    // Both the choice and the confirmation are mandatory, checked in order
    let form = TaxProfileForm::default();
    assert!(matches!(
        service.save(&form).await,
        Err(ProfileError::MissingSyncStatus)
    ));
    let form = TaxProfileForm {
        sync_status: Some(TaxSyncStatus::Synced),
        ..TaxProfileForm::default()
    };
    assert!(matches!(
        service.save(&form).await,
        Err(ProfileError::NotConfirmed)
    ));
    assert!(store.submissions().is_empty());

    let form = TaxProfileForm {
        sync_status: Some(TaxSyncStatus::Synced),
        note: "synced via eTax".to_string(),
        confirmed: true,
    };
    let profile = service.save(&form).await.unwrap();
    assert!(profile.is_verified);
    assert_eq!(profile.tax_sync_status, TaxSyncStatus::Synced);

    match &store.submissions()[0] {
        StoreRequest::SaveTaxProfile(payload) => {
            assert_eq!(payload.email, "a.nguyen@company.com");
            assert_eq!(payload.tax_id, "8123456789");
            assert_eq!(payload.sync_status, TaxSyncStatus::Synced);
            assert!(payload.confirmed);
        }
        other => panic!("expected SAVE_TAX_PROFILE, got {}", other.kind()),
    }

    // Once verified the form is permanently read-only
    assert!(service.is_read_only());
    assert!(matches!(
        service.save(&form).await,
        Err(ProfileError::AlreadyVerified)
    ));
    assert_eq!(store.submissions().len(), 1);
}

#[tokio::test]
async fn verified_profile_reports_read_only_before_form_gaps() {
    let mut profile = owner();
    profile.is_verified = true;
    let store = MockStore::new(profile.clone(), Vec::new());
    let mut service = TaxProfileService::new(store.clone(), profile);
    assert!(service.is_read_only());

    // The read-only gate outranks the per-field checks
    assert!(matches!(
        service.save(&TaxProfileForm::default()).await,
        Err(ProfileError::AlreadyVerified)
    ));
    assert!(store.submissions().is_empty());
}
