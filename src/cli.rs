use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "fleetrate")]
#[command(version, about = "Tiered equipment rental billing calculator")]
pub struct Cli {
    /// Equipment unit or class to bill (e.g. "excavator-30t")
    #[arg(short = 'e', long = "equipment")]
    pub equipment: Option<String>,

    /// Usage in engine hours
    #[arg(long = "hours", value_name = "HOURS", conflicts_with = "days")]
    pub hours: Option<f64>,

    /// Usage as a day-count span (converted at 8h/day)
    #[arg(long = "days", value_name = "DAYS")]
    pub days: Option<f64>,

    /// Billing context: internal, external or owner
    #[arg(short = 'x', long = "context")]
    pub context: Option<String>,

    /// Haul distance in miles
    #[arg(long = "miles", value_name = "MILES")]
    pub miles: Option<f64>,

    /// Haul requires an oversize permit
    #[arg(long)]
    pub permit: bool,

    /// Haul requires a pilot car escort
    #[arg(long = "pilot-car")]
    pub pilot_car: bool,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Initialize config file and rate catalog
    #[arg(long = "init")]
    pub init: bool,

    /// Check configuration and rate catalog
    #[arg(long = "check")]
    pub check: bool,

    /// Set a billing-context override (format: EQUIPMENT=CONTEXT)
    #[arg(long, value_name = "SPEC")]
    pub set_context: Option<String>,

    /// Clear the billing-context override for an equipment unit
    #[arg(long, value_name = "EQUIPMENT")]
    pub clear_context: Option<String>,

    /// Show stored billing-context overrides
    #[arg(long)]
    pub show_contexts: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
