//! aws-orphans: find unused security groups, Elastic IPs and EBS volumes
//! across AWS regions.
//!
//! `scan` prints a live report, `populate` replaces the stored table for a
//! resource kind and `list` shows what the last `populate` stored.

use anyhow::{Result, bail};
use aws_orphans::aws::{AwsContext, get_current_account_id};
use aws_orphans::config::{ConfigError, ScanSettings, require_database_url};
use aws_orphans::report;
use aws_orphans::scanner::{SdkInventoryFactory, scan_fleet};
use aws_orphans::state::{fetch_orphans, open_db, replace_orphans};
use aws_orphans_common::defaults::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_CONCURRENCY, DEFAULT_OPERATION_TIMEOUT_SECS,
    DEFAULT_REGION_TIMEOUT_SECS,
};
use aws_orphans_common::{FleetOutcome, RegionCatalog, ResourceKind};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "aws-orphans")]
#[command(about = "Find unused AWS security groups, Elastic IPs and EBS volumes across regions")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Options shared by every command that scans AWS
#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// Resource kind (security-groups, elastic-ips, volumes)
    #[arg(short, long)]
    kind: ResourceKind,

    /// Regions to scan, comma-separated (default: the whole catalog)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    regions: Option<Vec<String>>,

    /// Report security groups named "default" too
    #[arg(long)]
    include_default_sg: bool,

    /// AWS profile to use (overrides default credential resolution)
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// Regions scanned at the same time
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    concurrency: usize,

    /// Time budget for one region, in seconds
    #[arg(long, default_value_t = DEFAULT_REGION_TIMEOUT_SECS)]
    region_timeout: u64,

    /// Time budget for one AWS API call including retries, in seconds
    #[arg(long, default_value_t = DEFAULT_OPERATION_TIMEOUT_SECS)]
    operation_timeout: u64,

    /// Attempts per AWS API call before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Verify credentials with STS before scanning
    #[arg(long)]
    check_credentials: bool,
}

impl ScanArgs {
    fn settings(&self) -> ScanSettings {
        ScanSettings {
            exclude_default_sg: !self.include_default_sg,
            max_concurrency: self.concurrency,
            region_timeout: Duration::from_secs(self.region_timeout),
            operation_timeout: Duration::from_secs(self.operation_timeout),
            max_attempts: self.max_attempts,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the region catalog
    Regions,

    /// Scan AWS and print orphaned resources per region
    Scan {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },

    /// Scan AWS and replace the stored table for the resource kind
    Populate {
        #[command(flatten)]
        scan: ScanArgs,

        /// Database URL (e.g. sqlite://orphans.db)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },

    /// Show the stored orphans of a resource kind with a per-region summary
    List {
        /// Resource kind (security-groups, elastic-ips, volumes)
        #[arg(short, long)]
        kind: ResourceKind,

        /// Database URL (e.g. sqlite://orphans.db)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
                // Reduce noise from the AWS SDK
                .add_directive("aws_config=warn".parse()?)
                .add_directive("aws_smithy_runtime=warn".parse()?)
                .add_directive("aws_sdk_ec2=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    match args.command {
        Command::Regions => {
            for region in RegionCatalog::default().list_all() {
                println!("{region}");
            }
        }

        Command::Scan { scan, output } => handle_scan(scan, output).await?,

        Command::Populate { scan, database_url } => {
            // Fail before touching AWS when there is nowhere to store results
            let url = require_database_url(database_url.as_deref())?;
            handle_populate(scan, &url).await?;
        }

        Command::List {
            kind,
            database_url,
            output,
        } => {
            let url = require_database_url(database_url.as_deref())?;
            handle_list(kind, &url, output).await?;
        }
    }

    Ok(())
}

/// Validate settings and regions, load credentials and run the fleet scan.
async fn scan(args: &ScanArgs) -> Result<FleetOutcome> {
    let settings = args.settings();
    settings.validate()?;

    let catalog = RegionCatalog::default();
    if let Some(requested) = &args.regions {
        let unknown = catalog.unknown(requested);
        if !unknown.is_empty() {
            warn!(regions = ?unknown, "Ignoring unknown regions");
        }
        if catalog.filter(Some(requested.as_slice())).is_empty() {
            return Err(ConfigError::NoRegionsSelected {
                requested: requested.clone(),
            }
            .into());
        }
    }

    if let Some(profile) = &args.profile {
        info!(profile = %profile, "Using AWS profile");
    }
    let aws = AwsContext::load(args.profile.as_deref(), &settings).await;
    if args.check_credentials {
        get_current_account_id(&aws).await?;
    }

    let factory = SdkInventoryFactory::new(aws);
    Ok(scan_fleet(
        &factory,
        &catalog,
        args.kind,
        args.regions.as_deref(),
        &settings,
    )
    .await)
}

/// Handle the scan command
async fn handle_scan(args: ScanArgs, output: OutputFormat) -> Result<()> {
    let fleet = scan(&args).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fleet.to_json())?),
        OutputFormat::Table => print!("{}", report::render_fleet_text(&fleet)),
    }

    Ok(())
}

/// Handle the populate command
async fn handle_populate(args: ScanArgs, database_url: &str) -> Result<()> {
    let kind = args.kind;
    let pool = open_db(database_url).await?;

    println!("Scanning AWS regions for {}...", kind.label_plural());
    let fleet = scan(&args).await?;
    let scanned_at = Utc::now();

    for outcome in fleet.failures() {
        if let Some(error) = outcome.error() {
            println!("  Skip {}: {}", outcome.region(), error.message);
        }
    }

    if fleet.all_failed() {
        bail!(
            "All {} regions failed; table {} left unchanged",
            fleet.regions.len(),
            kind.table_name()
        );
    }

    let records = fleet.into_orphans();
    println!("Found {} {}.", records.len(), kind.label_plural());

    replace_orphans(&pool, kind, &records, scanned_at).await?;
    println!("Database table {} updated.", kind.table_name());

    Ok(())
}

/// Handle the list command
async fn handle_list(kind: ResourceKind, database_url: &str, output: OutputFormat) -> Result<()> {
    let pool = open_db(database_url).await?;
    let rows = fetch_orphans(&pool, kind).await?;

    if output == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report::stored_json(kind, &rows))?
        );
        return Ok(());
    }

    if rows.is_empty() {
        println!("No stored orphaned {}.", kind.label_plural());
        return Ok(());
    }

    println!("{}", report::stored_table(kind, &rows));
    let summary = report::region_summary(rows.iter().map(|r| &r.record));
    println!("{}", report::summary_table(&summary));

    let last_scan = rows.iter().map(|r| r.scanned_at).max();
    match last_scan {
        Some(at) => println!(
            "Total: {} (scanned {})",
            rows.len(),
            at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => println!("Total: {}", rows.len()),
    }

    Ok(())
}
