use crate::billing::{
    BillingContext, BillingError, BillingResult, RateCard, RateSet, Tier, UsageEntry, UsagePeriod,
};
use chrono::{Datelike, Local};

/// One billable day of equipment usage
pub const HOURS_PER_DAY: f64 = 8.0;
/// At or above this many hours the weekly rate applies
pub const WEEKLY_THRESHOLD_HOURS: f64 = 40.0;
/// Above this many hours the monthly rate applies, overage billed hourly
pub const MONTHLY_THRESHOLD_HOURS: f64 = 176.0;

/// Select the pricing tier for an accumulated usage duration
pub fn select_tier(hours: f64) -> Result<Tier, BillingError> {
    validate_hours(hours)?;

    if hours < WEEKLY_THRESHOLD_HOURS {
        Ok(Tier::Daily)
    } else if hours <= MONTHLY_THRESHOLD_HOURS {
        Ok(Tier::Weekly)
    } else {
        Ok(Tier::Monthly)
    }
}

/// Compute the charge for a usage duration at a fixed tier
pub fn compute_amount(
    hours: f64,
    tier: Tier,
    rates: &RateSet,
) -> Result<BillingResult, BillingError> {
    validate_hours(hours)?;
    rates.validate("rate set")?;

    let (amount, breakdown) = match tier {
        Tier::Hourly => {
            let amount = rates.hourly * hours;
            (amount, format!("{}hrs × ${:.2}", hours, rates.hourly))
        }
        Tier::Daily => {
            let days = (hours / HOURS_PER_DAY).ceil();
            let amount = rates.daily * days;
            (amount, format!("{} days × ${:.2}", days, rates.daily))
        }
        Tier::Weekly => {
            let weeks = (hours / WEEKLY_THRESHOLD_HOURS).ceil();
            let amount = rates.weekly * weeks;
            (amount, format!("{} weeks × ${:.2}", weeks, rates.weekly))
        }
        Tier::Monthly => {
            let overage = (hours - MONTHLY_THRESHOLD_HOURS).max(0.0);
            let amount = rates.monthly + overage * rates.hourly;
            let breakdown = if overage > 0.0 {
                format!(
                    "${:.2} + {}hrs × ${:.2}",
                    rates.monthly, overage, rates.hourly
                )
            } else {
                format!("${:.2} monthly", rates.monthly)
            };
            (amount, breakdown)
        }
    };

    Ok(BillingResult {
        tier,
        amount: round_currency(amount),
        breakdown,
    })
}

/// Single entry point: normalize usage, pick the context rates, select the
/// tier and compute the charge
pub fn compute_billing(
    usage: &UsagePeriod,
    card: &RateCard,
    context: BillingContext,
) -> Result<BillingResult, BillingError> {
    card.validate()?;

    let hours = usage.as_hours();
    let tier = select_tier(hours)?;
    compute_amount(hours, tier, card.rates_for(context))
}

/// Sum logged engine hours for the current calendar month (local time)
pub fn accumulated_month_hours(entries: &[UsageEntry], equipment_id: &str) -> f64 {
    let now = Local::now();

    entries
        .iter()
        .filter(|e| e.equipment_id == equipment_id)
        .filter(|e| {
            let local = e.timestamp.with_timezone(&Local);
            local.year() == now.year() && local.month() == now.month()
        })
        .map(|e| e.hours)
        .sum()
}

/// Round a dollar amount half-to-even to 2 decimal places
pub fn round_currency(amount: f64) -> f64 {
    let scaled = amount * 100.0;
    let floor = scaled.floor();
    let diff = scaled - floor;

    // Midpoint detection tolerance scales with the amount, so values like
    // 0.145 whose scaled form drifts by more than machine epsilon still
    // count as halfway
    let midpoint_eps = f64::EPSILON * scaled.abs().max(1.0);

    let rounded = if (diff - 0.5).abs() < midpoint_eps {
        // Exactly on the midpoint: round to the even cent
        if (floor as i64) % 2 == 0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };

    rounded / 100.0
}

fn validate_hours(hours: f64) -> Result<(), BillingError> {
    if !hours.is_finite() {
        return Err(BillingError::InvalidInput(format!(
            "usage hours must be finite, got {}",
            hours
        )));
    }
    if hours < 0.0 {
        return Err(BillingError::InvalidInput(format!(
            "usage hours must be non-negative, got {}",
            hours
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn card() -> RateCard {
        RateCard {
            equipment_class: "excavator-30t".to_string(),
            standard: RateSet {
                hourly: 80.0,
                daily: 850.0,
                weekly: 3400.0,
                monthly: 12000.0,
            },
            internal: None,
            external: None,
            owner: None,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(select_tier(0.0).unwrap(), Tier::Daily);
        assert_eq!(select_tier(39.99).unwrap(), Tier::Daily);
        // Exactly 40 hours is weekly, exactly 176 is still weekly
        assert_eq!(select_tier(40.0).unwrap(), Tier::Weekly);
        assert_eq!(select_tier(176.0).unwrap(), Tier::Weekly);
        assert_eq!(select_tier(176.01).unwrap(), Tier::Monthly);
    }

    #[test]
    fn test_select_tier_rejects_bad_input() {
        assert!(matches!(
            select_tier(-1.0),
            Err(BillingError::InvalidInput(_))
        ));
        assert!(select_tier(f64::NAN).is_err());
        assert!(select_tier(f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_usage_is_free() {
        let result = compute_amount(0.0, Tier::Daily, &card().standard).unwrap();
        assert_eq!(result.amount, 0.0);
    }

    #[test]
    fn test_daily_tier_rounds_up_to_whole_days() {
        // 32 hours is 4 billable days at 8h/day
        let result = compute_amount(32.0, Tier::Daily, &card().standard).unwrap();
        assert!((result.amount - 3400.0).abs() < 1e-9);
        assert_eq!(result.breakdown, "4 days × $850.00");
    }

    #[test]
    fn test_weekly_tier_rounds_up_to_whole_weeks() {
        // 100 hours is 3 billable weeks at 40h/week
        let result = compute_amount(100.0, Tier::Weekly, &card().standard).unwrap();
        assert!((result.amount - 10200.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_overage_additivity() {
        // 200h = monthly flat + 24h overage at the hourly rate
        let result = compute_amount(200.0, Tier::Monthly, &card().standard).unwrap();
        assert!((result.amount - 13920.0).abs() < 1e-9);
        assert_eq!(result.breakdown, "$12000.00 + 24hrs × $80.00");
    }

    #[test]
    fn test_hourly_tier_ad_hoc_quote() {
        let result = compute_amount(12.5, Tier::Hourly, &card().standard).unwrap();
        assert!((result.amount - 1000.0).abs() < 1e-9);
        assert_eq!(result.breakdown, "12.5hrs × $80.00");
    }

    #[test]
    fn test_monthly_without_overage() {
        let result = compute_amount(176.0, Tier::Monthly, &card().standard).unwrap();
        assert!((result.amount - 12000.0).abs() < 1e-9);
        assert_eq!(result.breakdown, "$12000.00 monthly");
    }

    #[test]
    fn test_compute_billing_end_to_end() {
        let usage = UsagePeriod::Hours { hours: 200.0 };
        let result = compute_billing(&usage, &card(), BillingContext::External).unwrap();
        assert_eq!(result.tier, Tier::Monthly);
        assert!((result.amount - 13920.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_billing_day_count_path() {
        // 2 days converts to 16 hours, stays in the daily tier
        let usage = UsagePeriod::Days { days: 2.0 };
        let result = compute_billing(&usage, &card(), BillingContext::Internal).unwrap();
        assert_eq!(result.tier, Tier::Daily);
        assert!((result.amount - 1700.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_billing_is_idempotent() {
        let usage = UsagePeriod::Hours { hours: 100.0 };
        let first = compute_billing(&usage, &card(), BillingContext::Internal).unwrap();
        let second = compute_billing(&usage, &card(), BillingContext::Internal).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_currency_half_to_even() {
        assert_eq!(round_currency(2.125), 2.12);
        assert_eq!(round_currency(2.375), 2.38);
        assert_eq!(round_currency(439.875), 439.88);
        assert_eq!(round_currency(2.126), 2.13);
        assert_eq!(round_currency(10.0), 10.0);
    }

    #[test]
    fn test_round_currency_inexact_midpoints() {
        // These midpoints are not exactly representable in binary; they must
        // still round to the even cent, not half-away-from-zero
        assert_eq!(round_currency(0.145), 0.14);
        assert_eq!(round_currency(2.135), 2.14);
        // Clearly off the midpoint is unaffected by the tolerance
        assert_eq!(round_currency(0.1451), 0.15);
        assert_eq!(round_currency(0.1449), 0.14);
    }

    #[test]
    fn test_accumulated_month_hours_filters_by_month_and_unit() {
        let now = Utc::now();
        let entries = vec![
            UsageEntry {
                timestamp: now,
                equipment_id: "EXC-201".to_string(),
                hours: 6.5,
            },
            UsageEntry {
                timestamp: now,
                equipment_id: "EXC-201".to_string(),
                hours: 3.5,
            },
            UsageEntry {
                timestamp: now,
                equipment_id: "DOZ-114".to_string(),
                hours: 8.0,
            },
            UsageEntry {
                timestamp: now - Duration::days(45), // Previous month
                equipment_id: "EXC-201".to_string(),
                hours: 100.0,
            },
        ];

        let total = accumulated_month_hours(&entries, "EXC-201");
        assert!((total - 10.0).abs() < 1e-9);
    }
}
