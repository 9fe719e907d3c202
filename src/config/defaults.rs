use super::types::{Config, SectionsConfig};
use crate::billing::{BillingContext, HaulRates};

impl Default for Config {
    fn default() -> Self {
        let haul_enabled = std::env::var("FLEETRATE_DISABLE_HAUL").is_err();
        Config {
            default_context: BillingContext::Internal,
            sections: SectionsConfig {
                rental: true,
                haul: haul_enabled,
                usage: true,
            },
            haul: HaulRates::default(),
        }
    }
}
