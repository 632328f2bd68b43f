use crate::domain::ports::Mailer;
use crate::error::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// Mailer that records the dispatch in the log and reports success.
///
/// Stands in for a real relay in development and tests; the completion
/// flow only cares that the port reports success or failure.
#[derive(Default, Clone)]
pub struct TracingMailer {
    from: String,
}

impl TracingMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    async fn send_certificate(
        &self,
        to: &str,
        student_name: &str,
        program_name: &str,
        certificate_url: &str,
    ) -> Result<()> {
        if to.is_empty() {
            warn!("certificate recipient address is empty");
        }
        info!(
            from = %self.from,
            to,
            student_name,
            program_name,
            artifact_bytes = certificate_url.len(),
            "certificate email dispatched"
        );
        Ok(())
    }
}
