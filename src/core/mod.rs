pub mod sections;

use crate::billing::{calculator::round_currency, BillingError};
use crate::config::{BillingRequest, Config};
use sections::{HaulSection, RentalSection, Section, SectionOutput, UsageSection};

/// Render every enabled section for a request
pub fn collect_all_sections(
    config: &Config,
    request: &BillingRequest,
) -> Result<Vec<SectionOutput>, BillingError> {
    let sections: Vec<Box<dyn Section>> = vec![
        Box::new(RentalSection::new(
            config.sections.rental,
            config.default_context,
        )),
        Box::new(HaulSection::new(config.sections.haul, config.haul.clone())),
        Box::new(UsageSection::new(config.sections.usage)),
    ];

    let mut outputs = Vec::new();
    for section in &sections {
        if let Some(output) = section.render(request)? {
            outputs.push(output);
        }
    }

    Ok(outputs)
}

/// Formats section outputs into the final statement text
#[derive(Default)]
pub struct StatementGenerator;

impl StatementGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, outputs: Vec<SectionOutput>) -> String {
        let mut lines = Vec::new();
        let mut total = 0.0;
        let mut billed_sections = 0;

        for output in &outputs {
            match output.amount {
                Some(amount) => {
                    total += amount;
                    billed_sections += 1;
                    lines.push(format!(
                        "{:<8}{:>12}  {}",
                        output.label,
                        format!("${:.2}", amount),
                        output.detail
                    ));
                }
                None => {
                    lines.push(format!("{:<8}{:>12}  {}", output.label, "", output.detail));
                }
            }
        }

        // A single billed line is its own total
        if billed_sections > 1 {
            lines.push(format!(
                "{:<8}{:>12}",
                "total",
                format!("${:.2}", round_currency(total))
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(label: &'static str, amount: Option<f64>, detail: &str) -> SectionOutput {
        SectionOutput {
            label,
            detail: detail.to_string(),
            amount,
        }
    }

    #[test]
    fn test_generate_sums_billed_sections() {
        let generator = StatementGenerator::new();
        let statement = generator.generate(vec![
            output("rental", Some(13920.0), "monthly tier"),
            output("haul", Some(439.875), "45 mi"),
            output("usage", None, "200.0h logged this month"),
        ]);

        assert!(statement.contains("$13920.00"));
        assert!(statement.contains("$439.88"));
        assert!(statement.contains("total"));
        assert!(statement.contains("$14359.88"));
    }

    #[test]
    fn test_generate_single_section_has_no_total_line() {
        let generator = StatementGenerator::new();
        let statement = generator.generate(vec![output("rental", Some(3400.0), "daily tier")]);

        assert!(statement.contains("$3400.00"));
        assert!(!statement.contains("total"));
    }

    #[test]
    fn test_generate_empty_outputs() {
        let generator = StatementGenerator::new();
        assert_eq!(generator.generate(Vec::new()), "");
    }
}
