use std::sync::Arc;

use chrono::NaiveDate;

use crate::store::{KeyValueStore, MemoryStore, StoreError};
use crate::workflows::scholarship::applications::repository::StoreApplicationRepository;
use crate::workflows::scholarship::applications::{ApplicationForm, ApplicationService};
use crate::workflows::scholarship::calls::{
    Call, CallDraft, CallRegistry, StoreCallRepository,
};
use crate::workflows::scholarship::identity::UserId;

pub(super) type MemoryApplications =
    ApplicationService<StoreApplicationRepository<MemoryStore>, StoreCallRepository<MemoryStore>>;
pub(super) type MemoryRegistry = CallRegistry<StoreCallRepository<MemoryStore>>;

/// Application service and call registry sharing one in-memory store.
pub(super) fn build_services() -> (MemoryApplications, MemoryRegistry) {
    let store = Arc::new(MemoryStore::default());
    let calls = Arc::new(StoreCallRepository::new(store.clone()));
    let applications = Arc::new(StoreApplicationRepository::new(store));
    (
        ApplicationService::new(applications, calls.clone()),
        CallRegistry::new(calls),
    )
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
}

pub(super) fn open_call(registry: &MemoryRegistry, name: &str) -> Call {
    registry
        .create_call(CallDraft {
            name: name.to_string(),
            kind: "academic".to_string(),
            start: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2026, 4, 30).expect("valid date"),
            requirements: "transcript, essay".to_string(),
            description: "Merit scholarship".to_string(),
        })
        .expect("call publishes")
}

pub(super) fn applicant_id() -> UserId {
    UserId("applicant-1".to_string())
}

pub(super) fn evaluator_id() -> UserId {
    UserId("evaluator-1".to_string())
}

pub(super) fn form() -> ApplicationForm {
    ApplicationForm {
        name: "Maria Lopez".to_string(),
        email: "maria@example.com".to_string(),
        age: 22,
        education_level: "university".to_string(),
        monthly_income: 1500,
        reason: "tuition support".to_string(),
    }
}

/// Store whose every operation fails, for error-propagation tests.
pub(super) struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}
