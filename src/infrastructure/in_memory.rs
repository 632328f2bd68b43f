use crate::domain::catalog::{Course, Tour};
use crate::domain::certificate::Certificate;
use crate::domain::enrollment::{Enrollment, Profile};
use crate::domain::ports::{
    CatalogStore, CertificateStore, EnrollmentStore, ProfileStore, SettingsStore,
};
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory enrollment store.
///
/// Uses `Arc<RwLock<HashMap>>` for shared concurrent access. The unique
/// payment-reference constraint is enforced on insert, the way a database
/// index would.
#[derive(Default, Clone)]
pub struct InMemoryEnrollmentStore {
    enrollments: Arc<RwLock<HashMap<Uuid, Enrollment>>>,
}

impl InMemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentStore for InMemoryEnrollmentStore {
    async fn insert(&self, enrollment: Enrollment) -> Result<()> {
        let mut enrollments = self.enrollments.write().await;
        if enrollments
            .values()
            .any(|e| e.payment_reference == enrollment.payment_reference)
        {
            return Err(ServiceError::validation(
                "Payment reference already exists",
            ));
        }
        enrollments.insert(enrollment.id, enrollment);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments.get(&id).cloned())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .values()
            .find(|e| e.payment_reference == reference)
            .cloned())
    }

    async fn update(&self, enrollment: Enrollment) -> Result<()> {
        let mut enrollments = self.enrollments.write().await;
        enrollments.insert(enrollment.id, enrollment);
        Ok(())
    }
}

/// A thread-safe in-memory certificate store enforcing the unique
/// certificate-number constraint.
#[derive(Default, Clone)]
pub struct InMemoryCertificateStore {
    certificates: Arc<RwLock<HashMap<Uuid, Certificate>>>,
}

impl InMemoryCertificateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CertificateStore for InMemoryCertificateStore {
    async fn insert(&self, certificate: Certificate) -> Result<()> {
        let mut certificates = self.certificates.write().await;
        if certificates
            .values()
            .any(|c| c.certificate_number == certificate.certificate_number)
        {
            return Err(ServiceError::validation(
                "Certificate number already exists",
            ));
        }
        certificates.insert(certificate.id, certificate);
        Ok(())
    }

    async fn find_by_enrollment(&self, enrollment_id: Uuid) -> Result<Option<Certificate>> {
        let certificates = self.certificates.read().await;
        Ok(certificates
            .values()
            .find(|c| c.enrollment_id == enrollment_id)
            .cloned())
    }
}

/// In-memory course/tour catalog, populated up front.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    courses: Arc<RwLock<HashMap<Uuid, Course>>>,
    tours: Arc<RwLock<HashMap<Uuid, Tour>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_course(&self, course: Course) {
        self.courses.write().await.insert(course.id, course);
    }

    pub async fn add_tour(&self, tour: Tour) {
        self.tours.write().await.insert(tour.id, tour);
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn get_course(&self, id: Uuid) -> Result<Option<Course>> {
        Ok(self.courses.read().await.get(&id).cloned())
    }

    async fn get_tour(&self, id: Uuid) -> Result<Option<Tour>> {
        Ok(self.tours.read().await.get(&id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.user_id, profile);
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemorySettingsStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }
}
