use crate::billing::{BillingContext, HaulRates, UsagePeriod};
use serde::{Deserialize, Serialize};

/// Tool configuration (`~/.config/fleetrate/config.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Billing context used when a request carries none
    pub default_context: BillingContext,
    pub sections: SectionsConfig,
    pub haul: HaulRates,
}

/// Statement sections to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    pub rental: bool,
    pub haul: bool,
    pub usage: bool,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            rental: true,
            haul: true,
            usage: true,
        }
    }
}

/// One billing request, from CLI flags or a JSON document on stdin
#[derive(Debug, Clone, Deserialize)]
pub struct BillingRequest {
    pub equipment_id: String,
    /// Explicit usage; when absent, month-to-date logged hours are billed
    #[serde(default)]
    pub usage: Option<UsagePeriod>,
    #[serde(default)]
    pub context: Option<BillingContext>,
    #[serde(default)]
    pub haul: Option<HaulLeg>,
}

/// Transport leg attached to a billing request
#[derive(Debug, Clone, Deserialize)]
pub struct HaulLeg {
    pub miles: f64,
    #[serde(default)]
    pub requires_permit: bool,
    #[serde(default)]
    pub requires_pilot_car: bool,
}

/// Raw JSONL meter record as exported by the telematics gateway
#[derive(Debug, Clone, Deserialize)]
pub struct LogRecord {
    pub r#type: Option<String>,
    pub timestamp: Option<String>,
    pub equipment_id: Option<String>,
    pub engine_hours: Option<f64>,
    /// Unique reading id, used for deduplication across export files
    pub reading_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::Tier;

    #[test]
    fn test_config_from_toml() {
        let content = r#"
            default_context = "external"

            [sections]
            rental = true
            haul = false
            usage = true

            [haul]
            per_mile = 9.25
        "#;

        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.default_context, BillingContext::External);
        assert!(!config.sections.haul);
        assert!((config.haul.per_mile - 9.25).abs() < 1e-9);
        // Unspecified haul fields keep their defaults
        assert!((config.haul.permit_fee - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_billing_request_from_json() {
        let json = r#"{
            "equipment_id": "EXC-201 excavator-30t",
            "usage": {"hours": 200},
            "context": "internal",
            "haul": {"miles": 45, "requires_permit": true}
        }"#;

        let request: BillingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.equipment_id, "EXC-201 excavator-30t");
        assert_eq!(request.usage, Some(UsagePeriod::Hours { hours: 200.0 }));
        assert_eq!(request.context, Some(BillingContext::Internal));
        let haul = request.haul.unwrap();
        assert!(haul.requires_permit);
        assert!(!haul.requires_pilot_car);
    }

    #[test]
    fn test_billing_request_minimal() {
        let request: BillingRequest =
            serde_json::from_str(r#"{"equipment_id": "skid-steer"}"#).unwrap();
        assert!(request.usage.is_none());
        assert!(request.context.is_none());
        assert!(request.haul.is_none());
    }

    #[test]
    fn test_tier_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Weekly).unwrap(), r#""weekly""#);
    }
}
