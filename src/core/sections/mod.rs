pub mod haul;
pub mod rental;
pub mod usage;

use crate::billing::BillingError;
use crate::config::BillingRequest;

/// One rendered line item of a billing statement
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOutput {
    pub label: &'static str,
    pub detail: String,
    /// Contribution to the statement total; informational sections carry none
    pub amount: Option<f64>,
}

pub trait Section {
    fn render(&self, request: &BillingRequest) -> Result<Option<SectionOutput>, BillingError>;
    fn enabled(&self) -> bool;
}

// Re-export all section types
pub use haul::HaulSection;
pub use rental::RentalSection;
pub use usage::UsageSection;
