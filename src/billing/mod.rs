pub mod calculator;
pub mod catalog;
pub mod haul;
pub mod types;

pub use haul::{calculate_haul_cost, HaulQuote, HaulRates};
pub use types::{
    BillingContext, BillingError, BillingResult, RateCard, RateSet, Tier, UsageEntry, UsagePeriod,
};
