use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::super::calls::CallId;
use super::super::identity::UserId;
use super::evaluation::RubricScores;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Rendering fallback when an application references a deleted call.
pub const DELETED_CALL_LABEL: &str = "(call deleted)";

/// Automatic classification computed once at submission time from age and
/// declared income; never re-evaluated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    Ineligible,
    PendingReview,
}

impl Eligibility {
    pub const fn label(self) -> &'static str {
        match self {
            Eligibility::Eligible => "eligible",
            Eligibility::Ineligible => "ineligible",
            Eligibility::PendingReview => "pending review",
        }
    }
}

/// Current position in the application state machine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Whether the application sits in every evaluator's pending queue.
    pub const fn awaits_evaluation(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Submitted | ApplicationStatus::UnderReview
        )
    }
}

/// An evaluator's verdict. Recommendation values double as state values:
/// the application's status becomes the recommendation verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approved,
    Rejected,
    UnderReview,
}

impl Recommendation {
    pub const fn status(self) -> ApplicationStatus {
        match self {
            Recommendation::Approved => ApplicationStatus::Approved,
            Recommendation::Rejected => ApplicationStatus::Rejected,
            Recommendation::UnderReview => ApplicationStatus::UnderReview,
        }
    }
}

/// Applicant-provided form data captured at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub age: u8,
    pub education_level: String,
    pub monthly_income: u32,
    pub reason: String,
}

/// One evaluator's scored verdict. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub evaluator_id: UserId,
    pub date: NaiveDate,
    pub scores: RubricScores,
    pub total: u16,
    pub observations: String,
    pub recommendation: Recommendation,
}

/// A user's submission against a specific call (postulación).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub call_id: CallId,
    pub user_id: UserId,
    pub created: NaiveDate,
    pub form: ApplicationForm,
    pub eligibility: Eligibility,
    pub status: ApplicationStatus,
    pub evaluations: Vec<Evaluation>,
    pub total_score: u16,
}

impl Application {
    /// Project the application for display, resolving the call name at
    /// read time. A missing call degrades to a placeholder label.
    pub fn view(&self, call_name: Option<&str>) -> ApplicationView {
        ApplicationView {
            application_id: self.id.clone(),
            call_name: call_name.unwrap_or(DELETED_CALL_LABEL).to_string(),
            created: self.created,
            eligibility: self.eligibility.label(),
            status: self.status.label(),
            total_score: self.total_score,
            evaluation_count: self.evaluations.len(),
        }
    }
}

/// Sanitized representation of an application for listings.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub application_id: ApplicationId,
    pub call_name: String,
    pub created: NaiveDate,
    pub eligibility: &'static str,
    pub status: &'static str,
    pub total_score: u16,
    pub evaluation_count: usize,
}
