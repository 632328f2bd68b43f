use crate::domain::ports::{GatewayTransaction, GatewayVerification, PaymentGateway};
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// Server-to-server client for the gateway's verification API.
///
/// The webhook path never uses this; it trusts its HMAC signature instead.
pub struct PaystackClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct VerifyResponse {
    status: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<GatewayTransaction>,
}

impl PaystackClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Gateway(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PaymentGateway for PaystackClient {
    async fn verify_transaction(
        &self,
        reference: &str,
        secret: &str,
    ) -> Result<GatewayVerification> {
        if secret.is_empty() {
            error!("gateway secret is not configured");
            return Ok(GatewayVerification {
                success: false,
                data: None,
                message: Some(
                    "Payment system not configured. Please contact administrator.".to_string(),
                ),
            });
        }

        let url = format!("{}/transaction/verify/{}", self.base_url, reference);
        let response = self
            .client
            .get(&url)
            .bearer_auth(secret)
            .send()
            .await
            .map_err(|e| ServiceError::Gateway(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body.chars().take(200).collect::<String>(), "gateway verify call failed");
            return Ok(GatewayVerification {
                success: false,
                data: None,
                message: Some(format!("Payment verification failed: {}", status.as_u16())),
            });
        }

        let payload: VerifyResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Gateway(e.to_string()))?;

        if payload.status
            && let Some(data) = payload.data
            && data.status == "success"
        {
            debug!(reference, amount = data.amount, currency = %data.currency, "gateway reports successful charge");
            return Ok(GatewayVerification {
                success: true,
                data: Some(data),
                message: payload.message,
            });
        }

        Ok(GatewayVerification {
            success: false,
            data: None,
            message: payload
                .message
                .or_else(|| Some("Payment verification failed".to_string())),
        })
    }
}
