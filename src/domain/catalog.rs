use crate::domain::enrollment::Currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub price_ngn: Decimal,
    pub price_usd: Decimal,
}

impl Course {
    pub fn price_in(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Ngn => self.price_ngn,
            Currency::Usd => self.price_usd,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: Uuid,
    pub title: String,
    pub price_ngn: Decimal,
    pub price_usd: Decimal,
}

impl Tour {
    pub fn price_in(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Ngn => self.price_ngn,
            Currency::Usd => self.price_usd,
        }
    }
}

/// The four bundle offerings sold without a catalog row. Prices are fixed
/// here; the client-declared amount never participates.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ComboKey {
    CreativeCombo,
    CommunicationCombo,
    LeadershipCombo,
    FullSuite,
}

impl ComboKey {
    /// Accepts the bare key or the widget's "combo:"-prefixed form.
    pub fn parse(value: &str) -> Option<Self> {
        match value.strip_prefix("combo:").unwrap_or(value) {
            "creative-combo" => Some(Self::CreativeCombo),
            "communication-combo" => Some(Self::CommunicationCombo),
            "leadership-combo" => Some(Self::LeadershipCombo),
            "full-suite" => Some(Self::FullSuite),
            _ => None,
        }
    }

    pub fn price_in(&self, currency: Currency) -> Decimal {
        match (self, currency) {
            (Self::CreativeCombo, Currency::Ngn) => dec!(12000),
            (Self::CreativeCombo, Currency::Usd) => dec!(10),
            (Self::CommunicationCombo, Currency::Ngn) => dec!(10000),
            (Self::CommunicationCombo, Currency::Usd) => dec!(8),
            (Self::LeadershipCombo, Currency::Ngn) => dec!(10000),
            (Self::LeadershipCombo, Currency::Usd) => dec!(8),
            (Self::FullSuite, Currency::Ngn) => dec!(30000),
            (Self::FullSuite, Currency::Usd) => dec!(25),
        }
    }
}
