use crate::billing::BillingError;
use serde::{Deserialize, Serialize};

/// Transport pricing constants, loadable from the `[haul]` config table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaulRates {
    pub per_mile: f64,
    pub fuel_surcharge_rate: f64,
    pub permit_fee: f64,
    pub pilot_car_per_mile: f64,
}

impl Default for HaulRates {
    fn default() -> Self {
        Self {
            per_mile: 8.5,
            fuel_surcharge_rate: 0.15,
            permit_fee: 350.0,
            pilot_car_per_mile: 3.5,
        }
    }
}

impl HaulRates {
    pub fn validate(&self) -> Result<(), BillingError> {
        let rates = [
            self.per_mile,
            self.fuel_surcharge_rate,
            self.permit_fee,
            self.pilot_car_per_mile,
        ];
        if rates.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(BillingError::InvalidInput(
                "haul rates must be non-negative finite numbers".to_string(),
            ));
        }
        Ok(())
    }
}

/// Itemized haul cost; components are exact, rounding happens at display time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HaulQuote {
    pub mileage_cost: f64,
    pub fuel_surcharge: f64,
    pub permit_fees: f64,
    pub pilot_car_fees: f64,
    pub total: f64,
}

impl HaulQuote {
    /// Human-readable cost composition
    pub fn breakdown(&self) -> String {
        let mut parts = vec![
            format!("${:.2} mileage", self.mileage_cost),
            format!("${:.2} fuel", self.fuel_surcharge),
        ];
        if self.permit_fees > 0.0 {
            parts.push(format!("${:.2} permits", self.permit_fees));
        }
        if self.pilot_car_fees > 0.0 {
            parts.push(format!("${:.2} pilot car", self.pilot_car_fees));
        }
        parts.join(" + ")
    }
}

/// Quote the cost of hauling a unit over a given distance
pub fn calculate_haul_cost(
    miles: f64,
    requires_permit: bool,
    requires_pilot_car: bool,
    rates: &HaulRates,
) -> Result<HaulQuote, BillingError> {
    if !miles.is_finite() {
        return Err(BillingError::InvalidInput(format!(
            "haul distance must be finite, got {}",
            miles
        )));
    }
    if miles < 0.0 {
        return Err(BillingError::InvalidInput(format!(
            "haul distance must be non-negative, got {}",
            miles
        )));
    }
    rates.validate()?;

    let mileage_cost = miles * rates.per_mile;
    let fuel_surcharge = mileage_cost * rates.fuel_surcharge_rate;
    let permit_fees = if requires_permit { rates.permit_fee } else { 0.0 };
    let pilot_car_fees = if requires_pilot_car {
        miles * rates.pilot_car_per_mile
    } else {
        0.0
    };

    Ok(HaulQuote {
        mileage_cost,
        fuel_surcharge,
        permit_fees,
        pilot_car_fees,
        total: mileage_cost + fuel_surcharge + permit_fees + pilot_car_fees,
    })
}
