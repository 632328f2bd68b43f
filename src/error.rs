use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not authenticated")]
    Unauthenticated,
    #[error("invalid webhook signature")]
    InvalidSignature,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("payment verification failed: {0}")]
    VerificationFailed(String),
    #[error("payment mismatch detected")]
    PaymentMismatch,
    #[error("enrollment already completed")]
    AlreadyCompleted,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("payment gateway error: {0}")]
    Gateway(String),
    #[error("internal error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Box::new(err))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for ServiceError {
    fn from(err: rocksdb::Error) -> Self {
        Self::Internal(Box::new(err))
    }
}
