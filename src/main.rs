use fleetrate::billing::{BillingContext, UsagePeriod};
use fleetrate::cli::Cli;
use fleetrate::config::{BillingRequest, Config, ContextOverrideManager, HaulLeg};
use fleetrate::core::{collect_all_sections, StatementGenerator};
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // Handle configuration commands
    if cli.init {
        Config::init()?;
        return Ok(());
    }

    if cli.print {
        let config = Config::load().unwrap_or_else(|_| Config::default());
        config.print()?;
        return Ok(());
    }

    if cli.check {
        let config = Config::load()?;
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    // Handle context override management
    if cli.set_context.is_some() || cli.clear_context.is_some() || cli.show_contexts {
        handle_context_management(&cli)?;
        return Ok(());
    }

    // Load configuration
    let config = Config::load().unwrap_or_else(|_| Config::default());

    // Build the billing request from flags, or read it from stdin as JSON
    let request = match build_request_from_flags(&cli)? {
        Some(request) => request,
        None => {
            let stdin = io::stdin();
            serde_json::from_reader(stdin.lock())?
        }
    };

    // Render the statement
    let outputs = collect_all_sections(&config, &request)?;
    let generator = StatementGenerator::new();
    let statement = generator.generate(outputs);

    println!("{}", statement);

    Ok(())
}

/// Assemble a billing request from CLI flags; None means "read stdin"
fn build_request_from_flags(cli: &Cli) -> Result<Option<BillingRequest>, Box<dyn std::error::Error>> {
    let Some(equipment_id) = cli.equipment.clone() else {
        return Ok(None);
    };

    let usage = match (cli.hours, cli.days) {
        (Some(hours), _) => Some(UsagePeriod::Hours { hours }),
        (None, Some(days)) => Some(UsagePeriod::Days { days }),
        (None, None) => None,
    };

    let context = cli
        .context
        .as_deref()
        .map(str::parse::<BillingContext>)
        .transpose()?;

    let haul = cli.miles.map(|miles| HaulLeg {
        miles,
        requires_permit: cli.permit,
        requires_pilot_car: cli.pilot_car,
    });

    Ok(Some(BillingRequest {
        equipment_id,
        usage,
        context,
        haul,
    }))
}

/// Handle context override CLI commands
fn handle_context_management(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = ContextOverrideManager::new()?;
    manager.load()?;

    if let Some(spec) = &cli.set_context {
        let (equipment_id, context) = ContextOverrideManager::parse_override_spec(spec)?;
        manager.set_override(&equipment_id, context, "manual".to_string(), None)?;
        println!("Context override set: {} → {:?}", equipment_id, context);
        return Ok(());
    }

    if let Some(equipment_id) = &cli.clear_context {
        if manager.clear_override(equipment_id)? {
            println!("Context override cleared for {}", equipment_id);
        } else {
            println!("No context override stored for {}", equipment_id);
        }
        return Ok(());
    }

    if cli.show_contexts {
        if manager.override_count() == 0 {
            println!("No context overrides stored");
        } else {
            println!("Context overrides ({}):", manager.override_count());
            for equipment_id in manager.get_all_equipment() {
                if let Some(entry) = manager.get_override(&equipment_id) {
                    println!(
                        "  {} → {:?} (set {}, source: {})",
                        equipment_id,
                        entry.context,
                        entry.created_at.format("%Y-%m-%d"),
                        entry.source
                    );
                }
            }
        }
    }

    Ok(())
}
