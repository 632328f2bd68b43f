use crate::domain::catalog::{Course, Tour};
use crate::domain::certificate::Certificate;
use crate::domain::enrollment::{Enrollment, Profile};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Inserts a new enrollment. The payment reference is unique across the
    /// store; a duplicate insert is a constraint violation.
    async fn insert(&self, enrollment: Enrollment) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Enrollment>>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Enrollment>>;
    /// Replaces the stored enrollment. Last write wins; the mutation paths
    /// are written to be commutative so this needs no locking.
    async fn update(&self, enrollment: Enrollment) -> Result<()>;
}

#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Inserts a certificate. Certificate numbers are unique across the
    /// store; a duplicate insert is a constraint violation.
    async fn insert(&self, certificate: Certificate) -> Result<()>;
    async fn find_by_enrollment(&self, enrollment_id: Uuid) -> Result<Option<Certificate>>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_course(&self, id: Uuid) -> Result<Option<Course>>;
    async fn get_tour(&self, id: Uuid) -> Result<Option<Tour>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>>;
}

/// Operator-managed overrides, read per request with a documented fallback
/// to the environment-configured value.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

/// A confirmed transaction as the gateway reports it. Amounts are in minor
/// units (kobo/cents).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct GatewayTransaction {
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub paid_at: Option<String>,
    pub reference: String,
}

/// Outcome of a server-to-server verification query.
#[derive(Debug, PartialEq, Clone)]
pub struct GatewayVerification {
    pub success: bool,
    pub data: Option<GatewayTransaction>,
    pub message: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Queries the gateway's verification API for the authoritative state of
    /// a transaction.
    async fn verify_transaction(&self, reference: &str, secret: &str)
    -> Result<GatewayVerification>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_certificate(
        &self,
        to: &str,
        student_name: &str,
        program_name: &str,
        certificate_url: &str,
    ) -> Result<()>;
}

pub type EnrollmentStoreRef = Arc<dyn EnrollmentStore>;
pub type CertificateStoreRef = Arc<dyn CertificateStore>;
pub type CatalogStoreRef = Arc<dyn CatalogStore>;
pub type ProfileStoreRef = Arc<dyn ProfileStore>;
pub type SettingsStoreRef = Arc<dyn SettingsStore>;
pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
pub type MailerRef = Arc<dyn Mailer>;
