use super::{Section, SectionOutput};
use crate::billing::{
    calculator::{accumulated_month_hours, compute_billing},
    BillingContext, BillingError, RateCard, UsagePeriod,
};
use crate::config::{BillingRequest, ContextOverrideManager};
use crate::utils::DataLoader;
use std::collections::HashMap;

pub struct RentalSection {
    enabled: bool,
    default_context: BillingContext,
}

impl RentalSection {
    pub fn new(enabled: bool, default_context: BillingContext) -> Self {
        Self {
            enabled,
            default_context,
        }
    }

    /// Context precedence: explicit request field, override file, config default
    fn resolve_context(&self, request: &BillingRequest) -> BillingContext {
        if let Some(context) = request.context {
            return context;
        }

        if let Ok(mut manager) = ContextOverrideManager::new() {
            if manager.load().is_ok() {
                if let Some(entry) = manager.get_override(&request.equipment_id) {
                    return entry.context;
                }
            }
        }

        self.default_context
    }

    /// Explicit usage wins; otherwise bill the month-to-date logged hours
    fn resolve_usage(&self, request: &BillingRequest) -> UsagePeriod {
        if let Some(usage) = request.usage {
            return usage;
        }

        let entries = DataLoader::new().load_all_logs();
        let hours = accumulated_month_hours(&entries, &request.equipment_id);
        crate::debug_println!(
            "No explicit usage for {}, billing {}h of logged hours",
            request.equipment_id,
            hours
        );

        UsagePeriod::Hours { hours }
    }

    fn render_with_catalog(
        &self,
        request: &BillingRequest,
        catalog: &HashMap<String, RateCard>,
    ) -> Result<Option<SectionOutput>, BillingError> {
        let card = RateCard::get_rate_card(catalog, &request.equipment_id)
            .ok_or_else(|| BillingError::MissingRateCard(request.equipment_id.clone()))?;

        let context = self.resolve_context(request);
        let usage = self.resolve_usage(request);
        let result = compute_billing(&usage, card, context)?;

        Ok(Some(SectionOutput {
            label: "rental",
            detail: format!(
                "{} ({:?}) · {} tier · {}",
                card.equipment_class,
                context,
                result.tier.label(),
                result.breakdown
            ),
            amount: Some(result.amount),
        }))
    }
}

impl Section for RentalSection {
    fn render(&self, request: &BillingRequest) -> Result<Option<SectionOutput>, BillingError> {
        if !self.enabled {
            return Ok(None);
        }

        let catalog = RateCard::get_catalog_with_fallback();
        self.render_with_catalog(request, &catalog)
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(hours: f64) -> BillingRequest {
        BillingRequest {
            equipment_id: "excavator-30t".to_string(),
            usage: Some(UsagePeriod::Hours { hours }),
            context: Some(BillingContext::External),
            haul: None,
        }
    }

    #[test]
    fn test_rental_section_disabled() {
        let section = RentalSection::new(false, BillingContext::Internal);
        assert!(!section.enabled());
        assert_eq!(section.render(&request(100.0)).unwrap(), None);
    }

    #[test]
    fn test_rental_section_renders_billed_amount() {
        let section = RentalSection::new(true, BillingContext::Internal);
        let catalog = RateCard::builtin_catalog();
        let output = section
            .render_with_catalog(&request(200.0), &catalog)
            .unwrap()
            .unwrap();

        assert_eq!(output.label, "rental");
        // excavator-30t standard rates: 12000 monthly + 24h × 80
        assert!((output.amount.unwrap() - 13920.0).abs() < 1e-9);
        assert!(output.detail.contains("monthly tier"));
    }

    #[test]
    fn test_rental_section_unknown_equipment() {
        let section = RentalSection::new(true, BillingContext::Internal);
        let catalog = RateCard::builtin_catalog();
        let mut req = request(10.0);
        req.equipment_id = "zeppelin".to_string();

        assert!(matches!(
            section.render_with_catalog(&req, &catalog),
            Err(BillingError::MissingRateCard(_))
        ));
    }

    #[test]
    fn test_explicit_request_context_wins() {
        let section = RentalSection::new(true, BillingContext::Internal);
        assert_eq!(
            section.resolve_context(&request(10.0)),
            BillingContext::External
        );
    }
}
