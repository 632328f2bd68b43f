pub mod in_memory;
pub mod mailer;
pub mod paystack;
pub mod retry;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod signature;
