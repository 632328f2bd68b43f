#![allow(dead_code)]

use async_trait::async_trait;
use enrolld::application::{CompletionService, PaymentService};
use enrolld::domain::enrollment::{
    Amount, Currency, Enrollment, EnrollmentKind, PaymentStatus, Profile,
};
use enrolld::domain::ports::{GatewayTransaction, GatewayVerification, Mailer, PaymentGateway};
use enrolld::error::{Result, ServiceError};
use enrolld::infrastructure::in_memory::{
    InMemoryCatalog, InMemoryCertificateStore, InMemoryEnrollmentStore, InMemoryProfileStore,
    InMemorySettingsStore,
};
use enrolld::interfaces::http::{self, AppState};
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use sha2::Sha512;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_SECRET: &str = "sk_test_secret";

/// Gateway double returning a canned verification and recording the secret
/// each call was authenticated with.
#[derive(Default)]
pub struct MockGateway {
    pub response: Mutex<Option<GatewayVerification>>,
    pub seen_secrets: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn respond_with(&self, verification: GatewayVerification) {
        *self.response.lock().unwrap() = Some(verification);
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn verify_transaction(
        &self,
        _reference: &str,
        secret: &str,
    ) -> Result<GatewayVerification> {
        self.seen_secrets.lock().unwrap().push(secret.to_string());
        match self.response.lock().unwrap().clone() {
            Some(verification) => Ok(verification),
            None => Err(ServiceError::Gateway("gateway unreachable".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub student_name: String,
    pub program_name: String,
}

/// Mailer double: records every dispatch and can be flipped into failure.
#[derive(Default)]
pub struct RecordingMailer {
    pub fail: AtomicBool,
    pub sent: Mutex<Vec<SentMail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_certificate(
        &self,
        to: &str,
        student_name: &str,
        program_name: &str,
        _certificate_url: &str,
    ) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ServiceError::validation("mail relay unavailable"));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            student_name: student_name.to_string(),
            program_name: program_name.to_string(),
        });
        Ok(())
    }
}

pub struct Harness {
    pub enrollments: Arc<InMemoryEnrollmentStore>,
    pub certificates: Arc<InMemoryCertificateStore>,
    pub catalog: Arc<InMemoryCatalog>,
    pub profiles: Arc<InMemoryProfileStore>,
    pub settings: Arc<InMemorySettingsStore>,
    pub gateway: Arc<MockGateway>,
    pub mailer: Arc<RecordingMailer>,
    pub payments: Arc<PaymentService>,
    pub completion: Arc<CompletionService>,
}

impl Harness {
    pub fn new() -> Self {
        let enrollments = Arc::new(InMemoryEnrollmentStore::new());
        let certificates = Arc::new(InMemoryCertificateStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let profiles = Arc::new(InMemoryProfileStore::new());
        let settings = Arc::new(InMemorySettingsStore::new());
        let gateway = Arc::new(MockGateway::default());
        let mailer = Arc::new(RecordingMailer::default());

        let payments = Arc::new(PaymentService::new(
            enrollments.clone(),
            catalog.clone(),
            settings.clone(),
            gateway.clone(),
            TEST_SECRET.to_string(),
        ));
        let completion = Arc::new(CompletionService::new(
            enrollments.clone(),
            certificates.clone(),
            catalog.clone(),
            profiles.clone(),
            mailer.clone(),
        ));

        Self {
            enrollments,
            certificates,
            catalog,
            profiles,
            settings,
            gateway,
            mailer,
            payments,
            completion,
        }
    }

    /// Inserts a pending enrollment directly, bypassing the initiator.
    pub async fn seed_enrollment(
        &self,
        reference: &str,
        amount: Decimal,
        currency: Currency,
    ) -> Enrollment {
        let enrollment = Enrollment::new(
            Uuid::new_v4(),
            None,
            None,
            reference.to_string(),
            Amount::new(amount).unwrap(),
            currency,
            EnrollmentKind::Combo,
        );
        use enrolld::domain::ports::EnrollmentStore;
        self.enrollments.insert(enrollment.clone()).await.unwrap();
        enrollment
    }

    pub async fn seed_profile(&self, user_id: Uuid, full_name: &str, email: &str) {
        self.profiles
            .add(Profile {
                user_id,
                full_name: full_name.to_string(),
                email: email.to_string(),
            })
            .await;
    }

    pub async fn stored_status(&self, id: Uuid) -> PaymentStatus {
        use enrolld::domain::ports::EnrollmentStore;
        self.enrollments
            .get(id)
            .await
            .unwrap()
            .unwrap()
            .payment_status
    }

    pub fn app(&self) -> axum::Router {
        http::router(AppState {
            payments: self.payments.clone(),
            completion: self.completion.clone(),
            webhook_secret: TEST_SECRET.to_string(),
        })
    }
}

pub fn success_verification(amount: i64, currency: &str, reference: &str) -> GatewayVerification {
    GatewayVerification {
        success: true,
        data: Some(GatewayTransaction {
            status: "success".to_string(),
            amount,
            currency: currency.to_string(),
            paid_at: Some("2026-08-07T10:00:00.000Z".to_string()),
            reference: reference.to_string(),
        }),
        message: Some("Verification successful".to_string()),
    }
}

pub fn failed_verification(message: &str) -> GatewayVerification {
    GatewayVerification {
        success: false,
        data: None,
        message: Some(message.to_string()),
    }
}

/// Signs a webhook body the way the gateway does.
pub fn sign_webhook(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}
