mod common;

use common::Harness;
use enrolld::application::ProgressOutcome;
use enrolld::domain::catalog::Course;
use enrolld::domain::enrollment::{Amount, Currency, Enrollment, EnrollmentKind};
use enrolld::domain::ports::{CertificateStore, EnrollmentStore};
use enrolld::error::ServiceError;
use rust_decimal_macros::dec;
use std::sync::atomic::Ordering;
use uuid::Uuid;

async fn seed_course_enrollment(harness: &Harness) -> Enrollment {
    let course = Course {
        id: Uuid::new_v4(),
        title: "Creative Writing".to_string(),
        price_ngn: dec!(15000),
        price_usd: dec!(12),
    };
    harness.catalog.add_course(course.clone()).await;

    let user_id = Uuid::new_v4();
    harness
        .seed_profile(user_id, "Ada Obi", "ada@example.org")
        .await;

    let mut enrollment = Enrollment::new(
        user_id,
        Some(course.id),
        None,
        "REF-1".to_string(),
        Amount::new(dec!(15000)).unwrap(),
        Currency::Ngn,
        EnrollmentKind::Course,
    );
    enrollment.progress = 80;
    harness.enrollments.insert(enrollment.clone()).await.unwrap();
    enrollment
}

#[tokio::test]
async fn test_complete_issues_certificate_and_emails_it() {
    let harness = Harness::new();
    let enrollment = seed_course_enrollment(&harness).await;

    let outcome = harness.completion.complete(enrollment.id).await.unwrap();

    assert!(outcome.email_sent);
    assert!(outcome.certificate_number.starts_with("CERT-"));
    assert!(
        outcome
            .certificate_url
            .starts_with("data:image/svg+xml;base64,")
    );

    let stored = harness.enrollments.get(enrollment.id).await.unwrap().unwrap();
    assert!(stored.completed);
    assert_eq!(stored.progress, 100);
    assert!(stored.completed_at.is_some());
    assert!(stored.certificate_sent);
    assert!(stored.certificate_sent_at.is_some());

    let certificate = harness
        .certificates
        .find_by_enrollment(enrollment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(certificate.certificate_number, outcome.certificate_number);
    assert_eq!(certificate.user_id, enrollment.user_id);

    let sent = harness.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.org");
    assert_eq!(sent[0].student_name, "Ada Obi");
    assert_eq!(sent[0].program_name, "Creative Writing");
}

#[tokio::test]
async fn test_email_failure_does_not_roll_back_completion() {
    let harness = Harness::new();
    let enrollment = seed_course_enrollment(&harness).await;
    harness.mailer.fail.store(true, Ordering::SeqCst);

    let outcome = harness.completion.complete(enrollment.id).await.unwrap();

    assert!(!outcome.email_sent);

    let stored = harness.enrollments.get(enrollment.id).await.unwrap().unwrap();
    assert!(stored.completed, "completion must stand without the email");
    assert!(!stored.certificate_sent);
    assert!(stored.certificate_sent_at.is_none());
    assert!(
        harness
            .certificates
            .find_by_enrollment(enrollment.id)
            .await
            .unwrap()
            .is_some(),
        "certificate is issued even when the notice fails"
    );
}

#[tokio::test]
async fn test_double_completion_rejected() {
    let harness = Harness::new();
    let enrollment = seed_course_enrollment(&harness).await;

    let first = harness.completion.complete(enrollment.id).await.unwrap();
    let second = harness.completion.complete(enrollment.id).await;

    assert!(matches!(second, Err(ServiceError::AlreadyCompleted)));

    let certificate = harness
        .certificates
        .find_by_enrollment(enrollment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        certificate.certificate_number, first.certificate_number,
        "no second certificate may appear"
    );
    let sent = harness.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
}

#[tokio::test]
async fn test_complete_unknown_enrollment_not_found() {
    let harness = Harness::new();

    let result = harness.completion.complete(Uuid::new_v4()).await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_complete_falls_back_to_generic_labels() {
    let harness = Harness::new();
    // No catalog row, no profile.
    let enrollment = harness
        .seed_enrollment("REF-1", dec!(5000), Currency::Ngn)
        .await;

    let outcome = harness.completion.complete(enrollment.id).await.unwrap();
    assert!(outcome.email_sent);

    let sent = harness.mailer.sent.lock().unwrap();
    assert_eq!(sent[0].student_name, "Student");
    assert_eq!(sent[0].program_name, "Program");
    assert_eq!(sent[0].to, "");
}

#[tokio::test]
async fn test_progress_out_of_range_rejected_and_unchanged() {
    let harness = Harness::new();
    let enrollment = seed_course_enrollment(&harness).await;

    for bad in [-1, 101, 1000] {
        let result = harness.completion.update_progress(enrollment.id, bad).await;
        assert!(
            matches!(result, Err(ServiceError::Validation(_))),
            "progress {bad} must be rejected"
        );
    }

    let stored = harness.enrollments.get(enrollment.id).await.unwrap().unwrap();
    assert_eq!(stored.progress, 80, "stored progress must be unchanged");
    assert!(!stored.completed);
}

#[tokio::test]
async fn test_progress_below_hundred_acknowledges() {
    let harness = Harness::new();
    let enrollment = seed_course_enrollment(&harness).await;

    let outcome = harness
        .completion
        .update_progress(enrollment.id, 90)
        .await
        .unwrap();

    assert_eq!(outcome, ProgressOutcome::Acknowledged);
    let stored = harness.enrollments.get(enrollment.id).await.unwrap().unwrap();
    assert_eq!(stored.progress, 90);
    assert!(!stored.completed);
    assert!(
        harness
            .certificates
            .find_by_enrollment(enrollment.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_progress_may_decrease() {
    let harness = Harness::new();
    let enrollment = seed_course_enrollment(&harness).await;

    harness
        .completion
        .update_progress(enrollment.id, 20)
        .await
        .unwrap();

    let stored = harness.enrollments.get(enrollment.id).await.unwrap().unwrap();
    assert_eq!(stored.progress, 20);
}

#[tokio::test]
async fn test_progress_hundred_completes_once() {
    let harness = Harness::new();
    let enrollment = seed_course_enrollment(&harness).await;

    let outcome = harness
        .completion
        .update_progress(enrollment.id, 100)
        .await
        .unwrap();

    let ProgressOutcome::Completed(Some(completion)) = outcome else {
        panic!("progress 100 must complete the enrollment");
    };
    assert!(completion.certificate_number.starts_with("CERT-"));

    let stored = harness.enrollments.get(enrollment.id).await.unwrap().unwrap();
    assert!(stored.completed);
    assert_eq!(stored.progress, 100);

    // A second 100 stores the value but must not issue another certificate.
    let again = harness
        .completion
        .update_progress(enrollment.id, 100)
        .await
        .unwrap();
    assert_eq!(again, ProgressOutcome::Completed(None));

    let certificate = harness
        .certificates
        .find_by_enrollment(enrollment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(certificate.certificate_number, completion.certificate_number);
}

#[tokio::test]
async fn test_progress_unknown_enrollment_not_found() {
    let harness = Harness::new();

    let result = harness.completion.update_progress(Uuid::new_v4(), 50).await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}
