use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Billing granularity selected for a usage duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Hourly => "hourly",
            Tier::Daily => "daily",
            Tier::Weekly => "weekly",
            Tier::Monthly => "monthly",
        }
    }
}

/// Relationship between the requesting and owning business unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingContext {
    #[default]
    Internal,
    External,
    Owner,
}

impl std::str::FromStr for BillingContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "internal" => Ok(BillingContext::Internal),
            "external" => Ok(BillingContext::External),
            "owner" => Ok(BillingContext::Owner),
            other => Err(format!(
                "unknown billing context '{}' (expected internal, external or owner)",
                other
            )),
        }
    }
}

/// Prices per unit at each billing granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSet {
    pub hourly: f64,
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

impl RateSet {
    /// Reject negative, non-finite or all-zero rate sets
    pub fn validate(&self, class: &str) -> Result<(), BillingError> {
        let rates = [self.hourly, self.daily, self.weekly, self.monthly];

        if rates.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(BillingError::InvalidRateCard {
                class: class.to_string(),
                reason: "rates must be non-negative finite numbers".to_string(),
            });
        }

        if rates.iter().all(|r| *r == 0.0) {
            return Err(BillingError::InvalidRateCard {
                class: class.to_string(),
                reason: "all rates are zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Pricing sheet for one equipment class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCard {
    pub equipment_class: String,
    pub standard: RateSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<RateSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<RateSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<RateSet>,
}

impl RateCard {
    /// Rate set for a billing context, falling back to the standard rates
    pub fn rates_for(&self, context: BillingContext) -> &RateSet {
        let variant = match context {
            BillingContext::Internal => self.internal.as_ref(),
            BillingContext::External => self.external.as_ref(),
            BillingContext::Owner => self.owner.as_ref(),
        };
        variant.unwrap_or(&self.standard)
    }

    /// Validate the standard set and every context variant
    pub fn validate(&self) -> Result<(), BillingError> {
        self.standard.validate(&self.equipment_class)?;
        for variant in [&self.internal, &self.external, &self.owner]
            .into_iter()
            .flatten()
        {
            variant.validate(&self.equipment_class)?;
        }
        Ok(())
    }
}

/// Billable duration; canonical unit is hours, days convert at 8h/day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsagePeriod {
    Hours { hours: f64 },
    Days { days: f64 },
}

impl UsagePeriod {
    pub fn as_hours(&self) -> f64 {
        match self {
            UsagePeriod::Hours { hours } => *hours,
            UsagePeriod::Days { days } => days * crate::billing::calculator::HOURS_PER_DAY,
        }
    }
}

/// Output of a billing computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingResult {
    pub tier: Tier,
    pub amount: f64,
    pub breakdown: String,
}

/// Single engine-hour meter reading parsed from a usage log
#[derive(Debug, Clone)]
pub struct UsageEntry {
    pub timestamp: DateTime<Utc>,
    pub equipment_id: String,
    pub hours: f64,
}

/// Billing error taxonomy; all variants are recoverable
#[derive(Debug, Error, PartialEq)]
pub enum BillingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no rate card found for equipment '{0}'")]
    MissingRateCard(String),

    #[error("invalid rate card for '{class}': {reason}")]
    InvalidRateCard { class: String, reason: String },
}
