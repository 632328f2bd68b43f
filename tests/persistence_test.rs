#![cfg(feature = "storage-rocksdb")]

use enrolld::domain::enrollment::{Amount, Currency, Enrollment, EnrollmentKind, PaymentStatus};
use enrolld::domain::ports::{CertificateStore, EnrollmentStore};
use enrolld::infrastructure::rocksdb::RocksDbStore;
use rust_decimal_macros::dec;
use tempfile::tempdir;
use uuid::Uuid;

fn pending(reference: &str) -> Enrollment {
    Enrollment::new(
        Uuid::new_v4(),
        None,
        None,
        reference.to_string(),
        Amount::new(dec!(5000)).unwrap(),
        Currency::Ngn,
        EnrollmentKind::Combo,
    )
}

#[tokio::test]
async fn test_settled_enrollment_survives_restart() {
    let dir = tempdir().unwrap();
    let enrollment = pending("TOS-123");

    {
        let store = RocksDbStore::open(dir.path()).unwrap();
        EnrollmentStore::insert(&store, enrollment.clone())
            .await
            .unwrap();

        let mut settled = store
            .find_by_reference("TOS-123")
            .await
            .unwrap()
            .unwrap();
        settled.payment_status = PaymentStatus::Completed;
        EnrollmentStore::update(&store, settled).await.unwrap();
    }

    let store = RocksDbStore::open(dir.path()).unwrap();
    let reloaded = store
        .find_by_reference("TOS-123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.id, enrollment.id);
    assert_eq!(reloaded.payment_status, PaymentStatus::Completed);
}

#[tokio::test]
async fn test_certificate_survives_restart() {
    let dir = tempdir().unwrap();
    let enrollment_id = Uuid::new_v4();
    let certificate = enrolld::domain::certificate::Certificate {
        id: Uuid::new_v4(),
        enrollment_id,
        user_id: Uuid::new_v4(),
        certificate_number: "CERT-1-ABC123".to_string(),
        certificate_url: "data:image/svg+xml;base64,PHN2Zy8+".to_string(),
        issued_at: chrono::Utc::now(),
    };

    {
        let store = RocksDbStore::open(dir.path()).unwrap();
        CertificateStore::insert(&store, certificate.clone())
            .await
            .unwrap();
    }

    let store = RocksDbStore::open(dir.path()).unwrap();
    let reloaded = store
        .find_by_enrollment(enrollment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.certificate_number, certificate.certificate_number);

    // The unique-number constraint also holds across restarts.
    let duplicate = enrolld::domain::certificate::Certificate {
        id: Uuid::new_v4(),
        ..certificate
    };
    assert!(CertificateStore::insert(&store, duplicate).await.is_err());
}
