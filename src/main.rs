use anyhow::Context;
use cfc_parties::prelude::*;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG: &str = "parties.yml";

/// Find every unique PAC and candidate committee in the campaign finance
/// extracts and reconcile them into one JSON file
#[derive(Parser, Debug)]
#[command(name = "generate-parties")]
#[command(about = "Reconcile campaign finance organizations into a canonical JSON dataset")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile all inputs and write the output file (default)
    Generate,

    /// Reconcile all inputs and print the report without writing
    Check,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// YAML configuration file (default: parties.yml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the extracts (overrides config; or PARTIES_DATA_DIR env var)
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    /// Year tag for newly found organizations
    #[arg(long, global = true)]
    year: Option<String>,

    /// Pretty-print the output with sorted keys
    #[arg(long, global = true, conflicts_with = "compact")]
    pretty: bool,

    /// Write the output on a single line
    #[arg(long, global = true)]
    compact: bool,
}

fn load_config(args: &RunArgs) -> anyhow::Result<Config> {
    let base = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::from_file(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("Failed to load config file: {}", DEFAULT_CONFIG))?,
        None => Config::default(),
    };

    let mut builder = ConfigBuilder::from_config(base);

    // Flag first, then environment variable, then whatever the file said
    if let Some(dir) = &args.data_dir {
        builder = builder.data_dir(dir);
    } else if let Ok(dir) = std::env::var("PARTIES_DATA_DIR") {
        builder = builder.data_dir(dir);
    }

    if let Some(year) = &args.year {
        builder = builder.year(year);
    }

    if args.pretty {
        builder = builder.pretty_print(true);
    } else if args.compact {
        builder = builder.pretty_print(false);
    }

    Ok(builder.build()?)
}

fn print_report(report: &RunReport) {
    println!("Found {} unique parties", report.organizations_found);
    println!(
        "Modified {} party records with additional info ({} matched, {} added from party info)",
        report.attribute_merge.touched(),
        report.attribute_merge.matched,
        report.attribute_merge.synthesized
    );
    println!("Added District IDs to {} records", report.districts_assigned);
    if report.existing.loaded > 0 {
        println!(
            "Merged with {} party records on the disk. There were {} duplicates",
            report.existing.loaded, report.existing.duplicates
        );
    }
    println!("Total records: {}", report.total_records);

    if report.anomalies.is_empty() {
        println!("No anomalies");
    } else {
        println!("\n{} anomalies need review:", report.anomalies.len());
        for anomaly in &report.anomalies {
            println!("  - {}", anomaly);
        }
    }
}

fn run(args: &RunArgs, write: bool) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let processor = PartyProcessor::new(config);

    let result = if write {
        processor.process_and_write()?
    } else {
        processor.process()?
    };

    print_report(&result.report);

    if write {
        println!(
            "\n✅ Wrote {} records to {}",
            result.records.len(),
            processor.config().output_path().display()
        );
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => run(&cli.run, true),
        Command::Check => run(&cli.run, false),
    }
}
