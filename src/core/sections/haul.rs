use super::{Section, SectionOutput};
use crate::billing::{calculate_haul_cost, BillingError, HaulRates};
use crate::config::BillingRequest;

pub struct HaulSection {
    enabled: bool,
    rates: HaulRates,
}

impl HaulSection {
    pub fn new(enabled: bool, rates: HaulRates) -> Self {
        Self { enabled, rates }
    }
}

impl Section for HaulSection {
    fn render(&self, request: &BillingRequest) -> Result<Option<SectionOutput>, BillingError> {
        if !self.enabled {
            return Ok(None);
        }

        let Some(leg) = request.haul.as_ref() else {
            return Ok(None);
        };

        let quote = calculate_haul_cost(
            leg.miles,
            leg.requires_permit,
            leg.requires_pilot_car,
            &self.rates,
        )?;

        Ok(Some(SectionOutput {
            label: "haul",
            detail: format!("{} mi · {}", leg.miles, quote.breakdown()),
            amount: Some(quote.total),
        }))
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}
