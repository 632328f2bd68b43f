use crate::domain::catalog::ComboKey;
use crate::domain::enrollment::{Amount, Currency, Enrollment, EnrollmentKind, PaymentStatus};
use crate::domain::ports::{
    CatalogStoreRef, EnrollmentStoreRef, GatewayTransaction, PaymentGatewayRef, SettingsStoreRef,
};
use crate::error::{Result, ServiceError};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Settings key consulted for an operator override of the gateway secret.
pub const GATEWAY_SECRET_KEY: &str = "PAYSTACK_SECRET_KEY";

/// Handles the payment half of the workflow: creating pending enrollments
/// and reconciling gateway confirmations against them.
///
/// The webhook and client-verification paths race without locks; both only
/// mutate enrollments that are still pending, so whichever arrives second
/// observes a settled record and leaves it alone.
pub struct PaymentService {
    enrollments: EnrollmentStoreRef,
    catalog: CatalogStoreRef,
    settings: SettingsStoreRef,
    gateway: PaymentGatewayRef,
    gateway_secret: String,
}

/// What a gateway charge confirmation did to the matching enrollment.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ChargeOutcome {
    /// No enrollment carries this reference; nothing to reconcile.
    UnknownReference,
    /// The enrollment already left `Pending`; the confirmation is ignored.
    AlreadySettled(PaymentStatus),
    /// Amount and currency matched; the enrollment is now `Completed`.
    Confirmed,
    /// Amount or currency disagreed; the enrollment is now `Failed`.
    Mismatched,
}

impl PaymentService {
    pub fn new(
        enrollments: EnrollmentStoreRef,
        catalog: CatalogStoreRef,
        settings: SettingsStoreRef,
        gateway: PaymentGatewayRef,
        gateway_secret: String,
    ) -> Self {
        Self {
            enrollments,
            catalog,
            settings,
            gateway,
            gateway_secret,
        }
    }

    /// Creates (or reuses) the pending enrollment for a checkout attempt.
    ///
    /// The price is resolved server-side from the catalog or the combo
    /// table; whatever amount the client declared is never trusted. The
    /// payment reference is the idempotency key: retried requests for a
    /// reference that already has an enrollment get the existing record
    /// back instead of a duplicate.
    pub async fn initiate(
        &self,
        user_id: Uuid,
        course_id: Option<&str>,
        tour_id: Option<&str>,
        reference: &str,
        currency: Currency,
        kind_override: Option<EnrollmentKind>,
    ) -> Result<Uuid> {
        let (kind, resolved_course, resolved_tour, price) =
            self.resolve_target(course_id, tour_id, currency).await?;

        let amount = Amount::new(price)
            .map_err(|_| ServiceError::validation("Invalid price for selected enrollment"))?;

        if let Some(existing) = self.enrollments.find_by_reference(reference).await? {
            // Retried checkout for a known reference: hand back the record
            // we already have, whatever state it reached in the meantime.
            debug!(reference, enrollment = %existing.id, "reusing enrollment for reference");
            return Ok(existing.id);
        }

        let enrollment = Enrollment::new(
            user_id,
            resolved_course,
            resolved_tour,
            reference.to_string(),
            amount,
            currency,
            kind_override.unwrap_or(kind),
        );
        let id = enrollment.id;
        self.enrollments.insert(enrollment).await?;
        info!(reference, enrollment = %id, "pending enrollment created");
        Ok(id)
    }

    async fn resolve_target(
        &self,
        course_id: Option<&str>,
        tour_id: Option<&str>,
        currency: Currency,
    ) -> Result<(EnrollmentKind, Option<Uuid>, Option<Uuid>, Decimal)> {
        if let Some(id) = course_id.and_then(|raw| Uuid::parse_str(raw).ok()) {
            let price = match self.catalog.get_course(id).await? {
                Some(course) => course.price_in(currency),
                None => Decimal::ZERO,
            };
            return Ok((EnrollmentKind::Course, Some(id), None, price));
        }

        if let Some(id) = tour_id.and_then(|raw| Uuid::parse_str(raw).ok()) {
            let price = match self.catalog.get_tour(id).await? {
                Some(tour) => tour.price_in(currency),
                None => Decimal::ZERO,
            };
            return Ok((EnrollmentKind::Tour, None, Some(id), price));
        }

        let key = course_id.or(tour_id).unwrap_or_default();
        let price = match ComboKey::parse(key) {
            Some(combo) => combo.price_in(currency),
            None => Decimal::ZERO,
        };
        Ok((EnrollmentKind::Combo, None, None, price))
    }

    /// Applies a signed gateway charge confirmation to the enrollment it
    /// references. Exact-match reconciliation: minor-unit amount and
    /// currency must both equal what the enrollment stored, or the
    /// enrollment is marked failed. There is no third outcome.
    pub async fn confirm_charge(
        &self,
        reference: &str,
        amount_minor: i64,
        currency: &str,
    ) -> Result<ChargeOutcome> {
        let Some(mut enrollment) = self.enrollments.find_by_reference(reference).await? else {
            debug!(reference, "charge confirmation for unknown reference");
            return Ok(ChargeOutcome::UnknownReference);
        };

        if !enrollment.is_pending() {
            debug!(
                reference,
                status = ?enrollment.payment_status,
                "charge confirmation for settled enrollment ignored"
            );
            return Ok(ChargeOutcome::AlreadySettled(enrollment.payment_status));
        }

        let outcome = if enrollment.matches_charge(amount_minor, currency) {
            enrollment.payment_status = PaymentStatus::Completed;
            ChargeOutcome::Confirmed
        } else {
            warn!(
                reference,
                amount_minor,
                currency,
                expected_minor = enrollment.amount_paid.minor_units(),
                expected_currency = enrollment.currency.as_str(),
                "charge amount mismatch"
            );
            enrollment.payment_status = PaymentStatus::Failed;
            ChargeOutcome::Mismatched
        };
        self.enrollments.update(enrollment).await?;
        Ok(outcome)
    }

    /// Client-triggered verification: asks the gateway directly for the
    /// transaction state and reconciles exactly like the webhook path.
    /// Re-verifying an enrollment the webhook already completed, with
    /// consistent amount and currency, is a no-op success.
    pub async fn verify_payment(&self, reference: &str) -> Result<GatewayTransaction> {
        if reference.is_empty() {
            return Err(ServiceError::validation("Reference is required"));
        }

        let secret = self.verification_secret().await;
        let verification = self.gateway.verify_transaction(reference, &secret).await?;

        if !verification.success {
            return Err(ServiceError::VerificationFailed(
                verification
                    .message
                    .unwrap_or_else(|| "Payment verification failed".to_string()),
            ));
        }

        let Some(enrollment) = self.enrollments.find_by_reference(reference).await? else {
            return Err(ServiceError::NotFound("Enrollment"));
        };

        let Some(data) = verification.data else {
            if enrollment.is_pending() {
                let mut enrollment = enrollment;
                enrollment.payment_status = PaymentStatus::Failed;
                self.enrollments.update(enrollment).await?;
            }
            return Err(ServiceError::VerificationFailed(
                "Verification missing payment data".to_string(),
            ));
        };

        if !enrollment.is_pending() {
            return if enrollment.payment_status == PaymentStatus::Completed
                && enrollment.matches_charge(data.amount, &data.currency)
            {
                debug!(reference, "re-verification of completed enrollment");
                Ok(data)
            } else {
                Err(ServiceError::PaymentMismatch)
            };
        }

        let mut enrollment = enrollment;
        if enrollment.matches_charge(data.amount, &data.currency) {
            enrollment.payment_status = PaymentStatus::Completed;
            self.enrollments.update(enrollment).await?;
            info!(reference, "payment verified and enrollment completed");
            Ok(data)
        } else {
            enrollment.payment_status = PaymentStatus::Failed;
            self.enrollments.update(enrollment).await?;
            Err(ServiceError::PaymentMismatch)
        }
    }

    /// The secret used for verify API calls: the settings override when one
    /// is present and non-empty, otherwise the configured value. A failed
    /// settings read degrades to the configured value rather than failing
    /// the verification.
    async fn verification_secret(&self) -> String {
        match self.settings.get(GATEWAY_SECRET_KEY).await {
            Ok(Some(secret)) if !secret.is_empty() => secret,
            Ok(_) => self.gateway_secret.clone(),
            Err(err) => {
                warn!(error = %err, "failed to read settings for secret override");
                self.gateway_secret.clone()
            }
        }
    }
}
