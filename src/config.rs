use crate::error::{Result, ServiceError};
use crate::infrastructure::paystack::DEFAULT_BASE_URL;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// Shared gateway secret: signs webhooks and authenticates verify calls.
    pub gateway_secret: String,
    pub gateway_base_url: String,
    pub gateway_timeout: Duration,
    pub mail_from: String,
}

impl Config {
    /// Reads configuration from environment variables.
    ///
    /// - `PAYSTACK_SECRET_KEY`: required shared secret
    /// - `BIND_ADDR`: listen address (default `0.0.0.0:8080`)
    /// - `PAYSTACK_BASE_URL`: gateway base URL override
    /// - `GATEWAY_TIMEOUT_SECS`: verify-call timeout (default 30)
    /// - `MAIL_FROM`: certificate email sender
    pub fn from_env() -> Result<Self> {
        let gateway_secret = std::env::var("PAYSTACK_SECRET_KEY")
            .map_err(|_| ServiceError::Config("PAYSTACK_SECRET_KEY not set".to_string()))?;

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let gateway_base_url =
            std::env::var("PAYSTACK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let mail_from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "noreply@example.org".to_string());

        Ok(Self {
            bind_addr,
            gateway_secret,
            gateway_base_url,
            gateway_timeout: Duration::from_secs(timeout_secs),
            mail_from,
        })
    }
}
