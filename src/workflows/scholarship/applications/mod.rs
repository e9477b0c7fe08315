//! Application lifecycle and scoring, the logic core of the workflow.
//!
//! Applications are created against open calls, pre-screened for
//! eligibility once at submission, and then driven through the state
//! machine `Submitted -> UnderReview -> {Approved, Rejected}` by evaluator
//! recommendations. No state is terminal: a later evaluation may move an
//! approved or rejected application anywhere, and the latest recommendation
//! always wins while the full evaluation history is retained.

pub mod domain;
pub mod eligibility;
pub mod evaluation;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationForm, ApplicationId, ApplicationStatus, ApplicationView, Eligibility,
    Evaluation, Recommendation, DELETED_CALL_LABEL,
};
pub use evaluation::{RubricScores, ScoreOutOfRange, ACADEMIC_MAX, ECONOMIC_MAX, SOCIAL_MAX};
pub use repository::{ApplicationRepository, StoreApplicationRepository};
pub use service::{ApplicationError, ApplicationService};
