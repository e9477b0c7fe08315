use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::RepositoryError;
use crate::store::{load_record, save_record, KeyValueStore, CALLS_KEY};

/// Identifier wrapper for funding calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub String);

impl CallId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Whether the call accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    Open,
    Closed,
}

impl CallState {
    pub const fn label(self) -> &'static str {
        match self {
            CallState::Open => "open",
            CallState::Closed => "closed",
        }
    }

    const fn toggled(self) -> Self {
        match self {
            CallState::Open => CallState::Closed,
            CallState::Closed => CallState::Open,
        }
    }
}

/// An administrator-published funding opportunity (convocatoria).
///
/// `start <= end` is not enforced; an inverted window is simply never
/// visible through [`CallRegistry::list_open_calls`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub id: CallId,
    pub name: String,
    pub kind: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub requirements: Vec<String>,
    pub description: String,
    pub state: CallState,
}

/// Admin form input for a new call. Requirements arrive as one
/// comma-separated string, as collected by the publishing form.
#[derive(Debug, Clone)]
pub struct CallDraft {
    pub name: String,
    pub kind: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub requirements: String,
    pub description: String,
}

/// Typed access to the call collection.
pub trait CallRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Call>, RepositoryError>;
    fn fetch(&self, id: &CallId) -> Result<Option<Call>, RepositoryError>;
    fn insert(&self, call: Call) -> Result<Call, RepositoryError>;
    fn update(&self, call: Call) -> Result<(), RepositoryError>;
    fn delete(&self, id: &CallId) -> Result<(), RepositoryError>;
}

/// Call repository persisting the whole collection under one store key.
pub struct StoreCallRepository<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> StoreCallRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn save_all(&self, calls: &[Call]) -> Result<(), RepositoryError> {
        Ok(save_record(self.store.as_ref(), CALLS_KEY, &calls)?)
    }
}

impl<S: KeyValueStore> CallRepository for StoreCallRepository<S> {
    fn list(&self) -> Result<Vec<Call>, RepositoryError> {
        Ok(load_record(self.store.as_ref(), CALLS_KEY)?.unwrap_or_default())
    }

    fn fetch(&self, id: &CallId) -> Result<Option<Call>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|call| &call.id == id))
    }

    fn insert(&self, call: Call) -> Result<Call, RepositoryError> {
        let mut calls = self.list()?;
        calls.push(call.clone());
        self.save_all(&calls)?;
        Ok(call)
    }

    fn update(&self, call: Call) -> Result<(), RepositoryError> {
        let mut calls = self.list()?;
        let slot = calls
            .iter_mut()
            .find(|existing| existing.id == call.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = call;
        self.save_all(&calls)
    }

    fn delete(&self, id: &CallId) -> Result<(), RepositoryError> {
        let mut calls = self.list()?;
        let before = calls.len();
        calls.retain(|call| &call.id != id);
        if calls.len() == before {
            return Err(RepositoryError::NotFound);
        }
        self.save_all(&calls)
    }
}

/// Error raised by call registry operations.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("call name must not be empty")]
    EmptyName,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Administrator-facing registry of funding calls.
pub struct CallRegistry<C> {
    calls: Arc<C>,
}

impl<C: CallRepository> CallRegistry<C> {
    pub fn new(calls: Arc<C>) -> Self {
        Self { calls }
    }

    /// Publish a new call. New calls always start open.
    pub fn create_call(&self, draft: CallDraft) -> Result<Call, CallError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(CallError::EmptyName);
        }

        let call = self.calls.insert(Call {
            id: CallId::generate(),
            name,
            kind: draft.kind.trim().to_string(),
            start: draft.start,
            end: draft.end,
            requirements: parse_requirements(&draft.requirements),
            description: draft.description,
            state: CallState::Open,
        })?;
        info!(call = %call.name, "call published");
        Ok(call)
    }

    /// Flip the call between open and closed, returning the new state.
    pub fn toggle_call_state(&self, id: &CallId) -> Result<CallState, CallError> {
        let mut call = self.calls.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        call.state = call.state.toggled();
        let state = call.state;
        self.calls.update(call)?;
        Ok(state)
    }

    /// Remove a call. Applications referencing it keep their dangling
    /// reference and are rendered with a placeholder label.
    pub fn delete_call(&self, id: &CallId) -> Result<(), CallError> {
        Ok(self.calls.delete(id)?)
    }

    /// All calls in store order, for the admin listing.
    pub fn list_calls(&self) -> Result<Vec<Call>, CallError> {
        Ok(self.calls.list()?)
    }

    /// Calls open for applications on `today`: state open and
    /// `start <= today <= end`, in store order.
    pub fn list_open_calls(&self, today: NaiveDate) -> Result<Vec<Call>, CallError> {
        Ok(self
            .calls
            .list()?
            .into_iter()
            .filter(|call| {
                call.state == CallState::Open && call.start <= today && today <= call.end
            })
            .collect())
    }
}

/// Split the requirements form field on commas, trimming each segment and
/// dropping empties while preserving order.
fn parse_requirements(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
