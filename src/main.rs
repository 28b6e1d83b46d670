use std::path::PathBuf;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use donor_registry::{DonationRegistry, RegistryConfig, View};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "donor-registry")]
#[command(version)]
#[command(about = "Blood and organ donation registry", long_about = None)]
struct Cli {
    /// JSON configuration file; DONOR_REGISTRY_* variables override it
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Print dashboard counts and recent donations (default)
    Dashboard,

    /// Expire available blood units past their expiry date
    Expire {
        /// Reference date, YYYY-MM-DD; today if omitted
        date: Option<NaiveDate>,
    },

    /// Print one listing as a table
    View {
        /// donors, patients, donations, recent, blood, organs or hospitals
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Load configuration: optional JSON file, then environment overrides
    let config = match &cli.config {
        Some(path) => RegistryConfig::from_json_file(path)?,
        None => RegistryConfig::default(),
    }
    .with_env_overrides()?;

    info!("Using configuration:\n{config}");
    if config.is_in_memory() {
        warn!("No database file configured, the registry will not persist");
    }

    let start = Instant::now();
    let registry = DonationRegistry::open(config)
        .map_err(|e| anyhow::anyhow!("{}: {e}", e.user_message()))?;

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            let dashboard = registry.dashboard()?;
            println!("{}", dashboard.summary);
            println!();
            println!("Recent Donations");
            println!("{}", dashboard.recent_donations.render());
        }
        Commands::Expire { date } => {
            let as_of = date.unwrap_or_else(|| Local::now().date_naive());
            let expired = registry.expire_blood_units(as_of)?;
            println!("Expired {expired} blood unit(s) as of {as_of}");
        }
        Commands::View { name } => {
            let view: View = name.parse()?;
            let table = registry.view(&view)?;
            println!("{view}");
            println!("{}", table.render());
        }
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}
