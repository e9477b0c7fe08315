//! Scholarship workflow: identity and session, the call registry, the
//! application lifecycle with its scoring rubric, and status reporting.
//!
//! Every component reads and writes through an injected repository rather
//! than a shared global store, and operations that act on behalf of a user
//! take that user's id explicitly instead of consulting ambient session
//! state.

pub mod applications;
pub mod calls;
pub mod identity;
pub mod reporting;

use crate::store::StoreError;

/// Error enumeration shared by the entity repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub use applications::{
    Application, ApplicationError, ApplicationForm, ApplicationId, ApplicationService,
    ApplicationStatus, ApplicationView, Eligibility, Evaluation, Recommendation, RubricScores,
    ScoreOutOfRange,
};
pub use calls::{Call, CallDraft, CallError, CallId, CallRegistry, CallState};
pub use identity::{IdentityError, IdentityService, NewUser, Role, Session, User, UserId};
pub use reporting::{report_by_status, StatusReport};
