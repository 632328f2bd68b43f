use crate::domain::certificate::Certificate;
use crate::domain::enrollment::{Enrollment, Profile};
use crate::domain::ports::{CertificateStore, EnrollmentStore, ProfileStore, SettingsStore};
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column family for enrollment documents.
pub const CF_ENROLLMENTS: &str = "enrollments";
/// Column family for certificate documents.
pub const CF_CERTIFICATES: &str = "certificates";
/// Column family for learner profiles.
pub const CF_PROFILES: &str = "profiles";
/// Column family for operator settings overrides.
pub const CF_SETTINGS: &str = "settings";

/// A persistent store keeping each entity as a JSON document in its own
/// column family.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
/// Reference and certificate-number lookups scan their column family; the
/// datasets here are small enough that no secondary index is kept.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = vec![
            ColumnFamilyDescriptor::new(CF_ENROLLMENTS, Options::default()),
            ColumnFamilyDescriptor::new(CF_CERTIFICATES, Options::default()),
            ColumnFamilyDescriptor::new(CF_PROFILES, Options::default()),
            ColumnFamilyDescriptor::new(CF_SETTINGS, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;
        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            ServiceError::internal(std::io::Error::other(format!(
                "{name} column family not found"
            )))
        })
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: &[u8], value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value).map_err(ServiceError::internal)?;
        self.db.put_cf(&cf, key, bytes)?;
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, cf_name: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(&cf, key)? {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(ServiceError::internal)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn scan<T, P>(&self, cf_name: &str, predicate: P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: Fn(&T) -> bool,
    {
        let cf = self.cf(cf_name)?;
        let iter = self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start);

        for item in iter {
            let (_key, value) = item?;
            let document: T = serde_json::from_slice(&value).map_err(ServiceError::internal)?;
            if predicate(&document) {
                return Ok(Some(document));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl EnrollmentStore for RocksDbStore {
    async fn insert(&self, enrollment: Enrollment) -> Result<()> {
        let existing = self.scan::<Enrollment, _>(CF_ENROLLMENTS, |e| {
            e.payment_reference == enrollment.payment_reference
        })?;
        if existing.is_some() {
            return Err(ServiceError::validation(
                "Payment reference already exists",
            ));
        }
        self.put(CF_ENROLLMENTS, enrollment.id.as_bytes(), &enrollment)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Enrollment>> {
        self.read(CF_ENROLLMENTS, id.as_bytes())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Enrollment>> {
        self.scan(CF_ENROLLMENTS, |e: &Enrollment| {
            e.payment_reference == reference
        })
    }

    async fn update(&self, enrollment: Enrollment) -> Result<()> {
        self.put(CF_ENROLLMENTS, enrollment.id.as_bytes(), &enrollment)
    }
}

#[async_trait]
impl CertificateStore for RocksDbStore {
    async fn insert(&self, certificate: Certificate) -> Result<()> {
        let existing = self.scan::<Certificate, _>(CF_CERTIFICATES, |c| {
            c.certificate_number == certificate.certificate_number
        })?;
        if existing.is_some() {
            return Err(ServiceError::validation(
                "Certificate number already exists",
            ));
        }
        self.put(CF_CERTIFICATES, certificate.id.as_bytes(), &certificate)
    }

    async fn find_by_enrollment(&self, enrollment_id: Uuid) -> Result<Option<Certificate>> {
        self.scan(CF_CERTIFICATES, |c: &Certificate| {
            c.enrollment_id == enrollment_id
        })
    }
}

#[async_trait]
impl ProfileStore for RocksDbStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>> {
        self.read(CF_PROFILES, user_id.as_bytes())
    }
}

#[async_trait]
impl SettingsStore for RocksDbStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.read(CF_SETTINGS, key.as_bytes())
    }
}
