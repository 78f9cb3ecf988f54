use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use mobile_dashboard::loader::load_csv_path;
use mobile_dashboard::{BatterySortOrder, Dashboard, DashboardSnapshot, FilterEvent, Settings};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mobile-dashboard")]
#[command(about = "Filter and summarise a mobile phone specification data set")]
struct Args {
    /// CSV data set (overrides DASHBOARD_DATA_PATH)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply filters and print the dashboard snapshot as JSON
    Snapshot {
        #[command(flatten)]
        filters: FilterArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the companies and RAM labels available for filtering
    Options,
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
    /// Company to include (repeatable; omit for all)
    #[arg(long = "company")]
    companies: Vec<String>,

    #[arg(long, default_value_t = 2014)]
    year_min: i64,

    #[arg(long, default_value_t = 2025)]
    year_max: i64,

    #[arg(long, default_value_t = 0)]
    price_min: i64,

    #[arg(long, default_value_t = 3000)]
    price_max: i64,

    /// RAM label to include (repeatable; omit for all)
    #[arg(long = "ram")]
    ram: Vec<String>,

    /// RAM label shown in the RAM chart only (repeatable)
    #[arg(long = "ram-compare")]
    ram_compare: Vec<String>,

    #[arg(long, default_value_t = 0)]
    battery_min: i64,

    #[arg(long, default_value_t = 10000)]
    battery_max: i64,

    /// value-asc, value-desc, count-asc or count-desc
    #[arg(long, default_value = "count-desc")]
    battery_sort: BatterySortOrder,
}

impl FilterArgs {
    fn into_events(self) -> Vec<FilterEvent> {
        vec![
            FilterEvent::SetCompanies(self.companies),
            FilterEvent::SetYearBounds { min: self.year_min, max: self.year_max },
            FilterEvent::SetPriceBounds { min: self.price_min, max: self.price_max },
            FilterEvent::SetRam(self.ram),
            FilterEvent::SetRamComparison(self.ram_compare),
            FilterEvent::SetBatteryBounds { min: self.battery_min, max: self.battery_max },
            FilterEvent::SetBatterySort(self.battery_sort),
        ]
    }
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    total_devices: usize,
    snapshot: &'a DashboardSnapshot,
}

#[derive(Serialize)]
struct FilterOptions {
    companies: Vec<String>,
    ram_labels: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = Settings::from_env().context("Failed to read settings")?;
    if let Some(data) = args.data {
        settings.data_path = data;
    }

    info!("Mobile dashboard starting...");
    let dataset = load_csv_path(&settings.data_path)
        .with_context(|| format!("Failed to load data from {}", settings.data_path.display()))?;

    match args.command {
        Commands::Snapshot { filters, pretty } => {
            let mut dashboard = Dashboard::with_limits(dataset, settings.limits);
            dashboard.apply_all(filters.into_events());
            let report = Report {
                generated_at: Utc::now(),
                source: settings.data_path.display().to_string(),
                total_devices: dashboard.dataset().len(),
                snapshot: dashboard.snapshot(),
            };
            print_json(&report, pretty)
        }
        Commands::Options => {
            let options = FilterOptions {
                companies: dataset.companies(),
                ram_labels: dataset.ram_labels(),
            };
            print_json(&options, true)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
