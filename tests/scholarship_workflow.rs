//! End-to-end scenarios for the scholarship workflow driven entirely through
//! the public service facades: register, publish a call, submit, evaluate,
//! re-evaluate, and report.

use std::sync::Arc;

use chrono::NaiveDate;

use becas::store::MemoryStore;
use becas::workflows::scholarship::applications::repository::StoreApplicationRepository;
use becas::workflows::scholarship::calls::StoreCallRepository;
use becas::workflows::scholarship::identity::{StoreSession, StoreUserRepository};
use becas::workflows::scholarship::{
    report_by_status, ApplicationForm, ApplicationService, ApplicationStatus, CallDraft,
    CallRegistry, CallState, Eligibility, IdentityError, IdentityService, NewUser,
    Recommendation, Role,
};

type Services = (
    IdentityService<StoreUserRepository<MemoryStore>, StoreSession<MemoryStore>>,
    CallRegistry<StoreCallRepository<MemoryStore>>,
    ApplicationService<StoreApplicationRepository<MemoryStore>, StoreCallRepository<MemoryStore>>,
);

fn build_services() -> Services {
    let store = Arc::new(MemoryStore::default());
    let users = Arc::new(StoreUserRepository::new(store.clone()));
    let session = Arc::new(StoreSession::new(store.clone()));
    let calls = Arc::new(StoreCallRepository::new(store.clone()));
    let applications = Arc::new(StoreApplicationRepository::new(store));
    (
        IdentityService::new(users, session),
        CallRegistry::new(calls.clone()),
        ApplicationService::new(applications, calls),
    )
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
}

fn register(
    identity: &IdentityService<StoreUserRepository<MemoryStore>, StoreSession<MemoryStore>>,
    name: &str,
    email: &str,
    role: Role,
) -> becas::workflows::scholarship::User {
    identity
        .register(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret-pass".to_string(),
            role,
            age: 25,
        })
        .expect("registration succeeds")
}

fn spring_call(registry: &CallRegistry<StoreCallRepository<MemoryStore>>) -> becas::workflows::scholarship::Call {
    registry
        .create_call(CallDraft {
            name: "Spring Merit 2026".to_string(),
            kind: "academic".to_string(),
            start: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2026, 4, 30).expect("valid date"),
            requirements: "transcript, essay, id card".to_string(),
            description: "Merit-based tuition support".to_string(),
        })
        .expect("call publishes")
}

fn application_form() -> ApplicationForm {
    ApplicationForm {
        name: "Maria Lopez".to_string(),
        email: "maria@example.com".to_string(),
        age: 22,
        education_level: "university".to_string(),
        monthly_income: 1500,
        reason: "tuition support".to_string(),
    }
}

#[test]
fn full_workflow_from_registration_to_report() {
    let (identity, registry, applications) = build_services();

    register(&identity, "Admin", "admin@example.com", Role::Admin);
    let evaluator = register(&identity, "Eva", "eva@example.com", Role::Evaluator);
    let applicant = register(&identity, "Maria", "maria@example.com", Role::Applicant);

    let call = spring_call(&registry);
    assert_eq!(call.state, CallState::Open);
    assert_eq!(registry.list_open_calls(today()).expect("listing").len(), 1);

    let application = applications
        .submit(&applicant.id, &call.id, application_form(), today())
        .expect("submission succeeds");
    assert_eq!(application.eligibility, Eligibility::Eligible);
    assert_eq!(application.status, ApplicationStatus::Submitted);

    let evaluated = applications
        .evaluate(
            &application.id,
            &evaluator.id,
            35,
            25,
            20,
            "strong academic record".to_string(),
            Recommendation::Approved,
            today(),
        )
        .expect("evaluation succeeds");
    assert_eq!(evaluated.total_score, 80);
    assert_eq!(evaluated.status, ApplicationStatus::Approved);

    // A later verdict overwrites the state; the history keeps both records.
    let reevaluated = applications
        .evaluate(
            &application.id,
            &evaluator.id,
            15,
            10,
            5,
            "documentation gap found on review".to_string(),
            Recommendation::Rejected,
            today(),
        )
        .expect("re-evaluation succeeds");
    assert_eq!(reevaluated.status, ApplicationStatus::Rejected);
    assert_eq!(reevaluated.evaluations.len(), 2);

    let report = report_by_status(&applications.list_applications().expect("listing"));
    assert_eq!(report.total, 1);
    assert_eq!(report.count(ApplicationStatus::Rejected), 1);

    let mine = applications
        .list_my_applications(&applicant.id)
        .expect("listing succeeds");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].call_name, "Spring Merit 2026");
    assert_eq!(mine[0].evaluation_count, 2);
}

#[test]
fn closed_calls_disappear_from_the_open_listing_but_keep_applications() {
    let (identity, registry, applications) = build_services();
    let applicant = register(&identity, "Maria", "maria@example.com", Role::Applicant);

    let call = spring_call(&registry);
    applications
        .submit(&applicant.id, &call.id, application_form(), today())
        .expect("submission succeeds");

    registry.toggle_call_state(&call.id).expect("call closes");
    assert!(registry.list_open_calls(today()).expect("listing").is_empty());

    // The submitted application stays in the evaluators' queue.
    assert_eq!(
        applications.pending_evaluations().expect("queue").len(),
        1
    );
}

#[test]
fn session_follows_login_and_logout_across_services() {
    let (identity, _registry, _applications) = build_services();
    let applicant = register(&identity, "Maria", "maria@example.com", Role::Applicant);

    // Registration logged the user in.
    assert_eq!(
        identity.current_user().expect("session reads"),
        Some(applicant.clone())
    );

    identity.logout().expect("logout succeeds");
    assert!(identity.current_user().expect("session reads").is_none());

    match identity.login("maria@example.com", "secret-pass", Role::Evaluator) {
        Err(IdentityError::InvalidCredentials) => {}
        other => panic!("role mismatch must fail, got {other:?}"),
    }

    let back = identity
        .login("maria@example.com", "secret-pass", Role::Applicant)
        .expect("login succeeds");
    assert_eq!(back.id, applicant.id);
}

#[test]
fn evaluation_of_pending_review_applicant_still_drives_the_state_machine() {
    let (identity, registry, applications) = build_services();
    let applicant = register(&identity, "Juan", "juan@example.com", Role::Applicant);
    let evaluator = register(&identity, "Eva", "eva@example.com", Role::Evaluator);
    let call = spring_call(&registry);

    // Adult with mid-band income: pre-screen leaves the decision open.
    let mut form = application_form();
    form.age = 30;
    form.monthly_income = 5000;

    let application = applications
        .submit(&applicant.id, &call.id, form, today())
        .expect("submission succeeds");
    assert_eq!(application.eligibility, Eligibility::PendingReview);

    let decided = applications
        .evaluate(
            &application.id,
            &evaluator.id,
            30,
            20,
            25,
            "income verified in interview".to_string(),
            Recommendation::Approved,
            today(),
        )
        .expect("evaluation succeeds");
    assert_eq!(decided.status, ApplicationStatus::Approved);
    // The pre-screen verdict is never recomputed.
    assert_eq!(decided.eligibility, Eligibility::PendingReview);
}
