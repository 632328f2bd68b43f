use crate::error::ServiceError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A positive monetary amount in major currency units.
///
/// Wrapper around `rust_decimal::Decimal` so amounts are validated once at
/// the boundary and minor-unit conversion lives in a single place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ServiceError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ServiceError::validation("Amount must be positive"))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The amount expressed in minor units (kobo/cents), rounded.
    ///
    /// Gateway confirmations carry integer minor units; reconciliation
    /// compares against this value.
    pub fn minor_units(&self) -> i64 {
        (self.0 * Decimal::ONE_HUNDRED).round().to_i64().unwrap_or(i64::MAX)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ServiceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum Currency {
    #[serde(rename = "NGN")]
    Ngn,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// Lenient parse used at the request boundary: anything that is not
    /// exactly "USD" falls back to NGN.
    pub fn from_request(value: &str) -> Self {
        if value == "USD" { Self::Usd } else { Self::Ngn }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ngn => "NGN",
            Self::Usd => "USD",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentKind {
    Course,
    Tour,
    Combo,
}

/// One user's paid claim on a course, tour, or combo bundle.
///
/// The payment reference is the idempotency anchor shared with the gateway:
/// it is globally unique, and the status moves away from `Pending` at most
/// once, driven by whichever confirmation path observes the charge first.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
    pub tour_id: Option<Uuid>,
    pub payment_reference: String,
    pub payment_status: PaymentStatus,
    pub amount_paid: Amount,
    pub currency: Currency,
    pub kind: EnrollmentKind,
    pub progress: u8,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub certificate_sent: bool,
    pub certificate_sent_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn new(
        user_id: Uuid,
        course_id: Option<Uuid>,
        tour_id: Option<Uuid>,
        payment_reference: String,
        amount_paid: Amount,
        currency: Currency,
        kind: EnrollmentKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            course_id,
            tour_id,
            payment_reference,
            payment_status: PaymentStatus::Pending,
            amount_paid,
            currency,
            kind,
            progress: 0,
            completed: false,
            completed_at: None,
            certificate_sent: false,
            certificate_sent_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.payment_status == PaymentStatus::Pending
    }

    /// Whether a gateway-reported charge matches what this enrollment expects.
    pub fn matches_charge(&self, amount_minor: i64, currency: &str) -> bool {
        self.amount_paid.minor_units() == amount_minor && self.currency.as_str() == currency
    }
}

/// The learner profile bits the workflow needs: a display name for the
/// certificate and an address to send it to.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
}
