use super::{Section, SectionOutput};
use crate::billing::{calculator::accumulated_month_hours, BillingError};
use crate::config::BillingRequest;
use crate::utils::DataLoader;

/// Informational month-to-date logged hours line
pub struct UsageSection {
    enabled: bool,
}

impl UsageSection {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Section for UsageSection {
    fn render(&self, request: &BillingRequest) -> Result<Option<SectionOutput>, BillingError> {
        if !self.enabled {
            return Ok(None);
        }

        let entries = DataLoader::new().load_all_logs();
        let hours = accumulated_month_hours(&entries, &request.equipment_id);

        let detail = if hours > 0.0 {
            format!("{:.1}h logged this month", hours)
        } else {
            "no logged hours this month".to_string()
        };

        Ok(Some(SectionOutput {
            label: "usage",
            detail,
            amount: None,
        }))
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}
