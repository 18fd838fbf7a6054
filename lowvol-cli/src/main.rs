//! Lowvol CLI - command-line interface for the low-volume fixture suite

#![deny(warnings)]

// Global invariants enforced:
// - Fixtures run and print in a deterministic order
// - CLI flags override config file values

use clap::{Parser, Subcommand};
use lowvol_core::config::{self, ResolvedConfig};
use lowvol_core::{
    classify, collect_fixtures, render_json, render_text, run_suite_with, suite_options,
    validate_row, MemorySink, ReportRow, SuiteReport, TracingSink,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lowvol")]
#[command(about = "Classify shopping products as low volume or ramped up")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the fixture suite
    Run {
        /// JSON fixture file to run in addition to the shipped fixtures
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Path to config file (default: .lowvolrc.json or lowvol.config.json)
        #[arg(long = "config")]
        config_file: Option<PathBuf>,

        /// Skip the shipped fixtures
        #[arg(long)]
        no_builtin: bool,

        /// Record unparsable clicks/threshold as failures
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(long, default_value = "log")]
        format: OutputFormat,

        /// Exit with an error if any assertion fails
        #[arg(long)]
        deny_failures: bool,
    },
    /// Classify a single row
    Classify {
        /// Click count
        #[arg(long)]
        clicks: String,

        /// Low-volume threshold
        #[arg(long)]
        threshold: String,

        /// Product item id
        #[arg(long)]
        product_id: String,

        /// Uppercase the product id
        #[arg(long)]
        capitalize: bool,

        /// Reject unparsable clicks/threshold instead of treating them as ramped up
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Per-assertion log lines through the tracing subscriber
    Log,
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            fixtures,
            config_file,
            no_builtin,
            strict,
            format,
            deny_failures,
        } => {
            let cwd = std::env::current_dir()?;
            let mut resolved = config::load_and_resolve(&cwd, config_file.as_deref())?;
            apply_overrides(&mut resolved, fixtures, no_builtin, strict, deny_failures)?;

            if let Some(ref path) = resolved.config_path {
                tracing::debug!("Using config: {}", path.display());
            }

            let fixtures = collect_fixtures(&resolved)?;
            let options = suite_options(&resolved);

            let report = match format {
                OutputFormat::Log => run_suite_with(&fixtures, options, TracingSink),
                OutputFormat::Text | OutputFormat::Json => {
                    run_suite_with(&fixtures, options, MemorySink::new())
                }
            };
            if let Some(output) = render_report(&report, format) {
                print!("{}", output);
            }

            if resolved.deny_failures && !report.counters.all_passed() {
                anyhow::bail!(
                    "{} of {} assertions failed",
                    report.counters.failed,
                    report.counters.ran
                );
            }
        }
        Commands::Classify {
            clicks,
            threshold,
            product_id,
            capitalize,
            strict,
        } => {
            let row = ReportRow::new(capitalize, threshold, clicks, product_id);
            println!("{}", classify_line(&row, strict)?);
        }
    }

    Ok(())
}

/// Classify one row into `<volume> <product_id>`
fn classify_line(row: &ReportRow, strict: bool) -> anyhow::Result<String> {
    if strict {
        validate_row(row)?;
    }
    let result = classify(row);
    Ok(format!("{} {}", result.volume, result.product_id))
}

/// Render a finished report for stdout; `log` output already went through tracing
fn render_report(report: &SuiteReport, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Log => None,
        OutputFormat::Text => Some(render_text(report)),
        OutputFormat::Json => Some(format!("{}\n", render_json(report))),
    }
}

/// Apply CLI flags on top of the resolved config
fn apply_overrides(
    resolved: &mut ResolvedConfig,
    fixtures: Option<PathBuf>,
    no_builtin: bool,
    strict: bool,
    deny_failures: bool,
) -> anyhow::Result<()> {
    if let Some(path) = fixtures {
        if !path.exists() {
            anyhow::bail!("Fixture file does not exist: {}", path.display());
        }
        resolved.fixtures = Some(path);
    }
    if no_builtin {
        if resolved.fixtures.is_none() {
            anyhow::bail!("--no-builtin requires a fixture file (--fixtures or config)");
        }
        resolved.include_builtin = false;
    }
    resolved.strict_numbers |= strict;
    resolved.deny_failures |= deny_failures;
    Ok(())
}
