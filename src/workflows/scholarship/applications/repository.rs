use std::sync::Arc;

use super::super::RepositoryError;
use super::domain::{Application, ApplicationId};
use crate::store::{load_record, save_record, KeyValueStore, APPLICATIONS_KEY};

/// Typed access to the application collection, injected into the service so
/// the lifecycle logic can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Application>, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
}

/// Application repository persisting the whole collection under one store
/// key, the way the original system kept it as a single JSON document.
pub struct StoreApplicationRepository<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> StoreApplicationRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn save_all(&self, applications: &[Application]) -> Result<(), RepositoryError> {
        Ok(save_record(
            self.store.as_ref(),
            APPLICATIONS_KEY,
            &applications,
        )?)
    }
}

impl<S: KeyValueStore> ApplicationRepository for StoreApplicationRepository<S> {
    fn list(&self) -> Result<Vec<Application>, RepositoryError> {
        Ok(load_record(self.store.as_ref(), APPLICATIONS_KEY)?.unwrap_or_default())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|application| &application.id == id))
    }

    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut applications = self.list()?;
        applications.push(application.clone());
        self.save_all(&applications)?;
        Ok(application)
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut applications = self.list()?;
        let slot = applications
            .iter_mut()
            .find(|existing| existing.id == application.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = application;
        self.save_all(&applications)
    }
}
