use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::super::calls::{CallId, CallRepository};
use super::super::identity::UserId;
use super::super::RepositoryError;
use super::domain::{
    Application, ApplicationForm, ApplicationId, ApplicationStatus, ApplicationView, Evaluation,
    Recommendation,
};
use super::eligibility;
use super::evaluation::{RubricScores, ScoreOutOfRange};
use super::repository::ApplicationRepository;

/// Error raised by the application lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("user already applied to this call")]
    DuplicateApplication,
    #[error("required field '{field}' must not be empty")]
    Validation { field: &'static str },
    #[error(transparent)]
    Score(#[from] ScoreOutOfRange),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service composing the application repository with the call registry's
/// repository. Acting user ids are passed in explicitly; the service never
/// consults session state.
pub struct ApplicationService<A, C> {
    applications: Arc<A>,
    calls: Arc<C>,
}

impl<A, C> ApplicationService<A, C>
where
    A: ApplicationRepository,
    C: CallRepository,
{
    pub fn new(applications: Arc<A>, calls: Arc<C>) -> Self {
        Self {
            applications,
            calls,
        }
    }

    /// Submit an application against a call.
    ///
    /// The call must resolve; whether it is open is gated by the listing
    /// the applicant chose from. At most one application may exist per
    /// (user, call) pair, even after the first is fully evaluated.
    pub fn submit(
        &self,
        applicant_id: &UserId,
        call_id: &CallId,
        form: ApplicationForm,
        today: NaiveDate,
    ) -> Result<Application, ApplicationError> {
        self.calls
            .fetch(call_id)?
            .ok_or(RepositoryError::NotFound)?;

        let already_applied = self
            .applications
            .list()?
            .iter()
            .any(|application| &application.call_id == call_id && &application.user_id == applicant_id);
        if already_applied {
            return Err(ApplicationError::DuplicateApplication);
        }

        for (field, value) in [
            ("name", &form.name),
            ("email", &form.email),
            ("education_level", &form.education_level),
            ("reason", &form.reason),
        ] {
            if value.trim().is_empty() {
                return Err(ApplicationError::Validation { field });
            }
        }

        let eligibility = eligibility::pre_screen(form.age, form.monthly_income);
        let application = self.applications.insert(Application {
            id: ApplicationId::generate(),
            call_id: call_id.clone(),
            user_id: applicant_id.clone(),
            created: today,
            form,
            eligibility,
            status: ApplicationStatus::Submitted,
            evaluations: Vec::new(),
            total_score: 0,
        })?;

        info!(
            eligibility = application.eligibility.label(),
            "application submitted"
        );
        Ok(application)
    }

    /// Record an evaluator's verdict on an application.
    ///
    /// Axis bounds are enforced here rather than trusted from the input
    /// boundary. The new evaluation is appended to the history and its
    /// recommendation becomes the application's status verbatim; earlier
    /// verdicts remain in the history but carry no further weight.
    #[allow(clippy::too_many_arguments)]
    pub fn evaluate(
        &self,
        application_id: &ApplicationId,
        evaluator_id: &UserId,
        economic: u8,
        academic: u8,
        social: u8,
        observations: String,
        recommendation: Recommendation,
        today: NaiveDate,
    ) -> Result<Application, ApplicationError> {
        let mut application = self
            .applications
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        let scores = RubricScores::new(economic, academic, social)?;
        let total = scores.total();

        application.evaluations.push(Evaluation {
            evaluator_id: evaluator_id.clone(),
            date: today,
            scores,
            total,
            observations,
            recommendation,
        });
        application.total_score = total;
        application.status = recommendation.status();

        self.applications.update(application.clone())?;
        debug!(
            status = application.status.label(),
            total, "evaluation recorded"
        );
        Ok(application)
    }

    /// Fetch a single application.
    pub fn get(&self, application_id: &ApplicationId) -> Result<Application, ApplicationError> {
        Ok(self
            .applications
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    /// Every evaluator's shared queue: applications still awaiting a final
    /// verdict, in store order.
    pub fn pending_evaluations(&self) -> Result<Vec<Application>, ApplicationError> {
        Ok(self
            .applications
            .list()?
            .into_iter()
            .filter(|application| application.status.awaits_evaluation())
            .collect())
    }

    /// The applicant's own applications as display views, resolving each
    /// call name at read time with a placeholder for deleted calls.
    pub fn list_my_applications(
        &self,
        applicant_id: &UserId,
    ) -> Result<Vec<ApplicationView>, ApplicationError> {
        let calls = self.calls.list()?;
        Ok(self
            .applications
            .list()?
            .iter()
            .filter(|application| &application.user_id == applicant_id)
            .map(|application| {
                let call_name = calls
                    .iter()
                    .find(|call| call.id == application.call_id)
                    .map(|call| call.name.as_str());
                application.view(call_name)
            })
            .collect())
    }

    /// All applications, for reporting.
    pub fn list_applications(&self) -> Result<Vec<Application>, ApplicationError> {
        Ok(self.applications.list()?)
    }
}
