//! Wisectl - Wiseway3 UPS check runner
//!
//! Replays raw SNMP rows through the monitoring pipeline: inspect the OID
//! tables, run service discovery and evaluate the check plugins against a
//! captured device row.

mod input;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

use wiseway_ups::{checks, parse_section, CheckParams, Profile, UpsError};

#[derive(Parser)]
#[command(name = "wisectl")]
#[command(about = "Wiseway3 UPS check runner")]
#[command(long_about = "Wiseway3 UPS check runner

Commands:
  oids        Show the OID table of a device profile
  discover    Run service discovery against a captured row
  check       Evaluate the check plugins against a captured row

A captured row is a text file with one raw SNMP value per line, in the
order of the profile's OID table. Use '-' to read from stdin.

Examples:
  wisectl oids --profile wiseway3-ext
  wisectl discover --profile wiseway3 --input row.txt
  wisectl check --profile wiseway3-ext --input row.txt --params levels.yaml
  wisectl check --profile wiseway3 --input - --plugin battery --json")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the OID table of a device profile
    Oids {
        /// Device profile (wiseway3, wiseway3-ext)
        #[arg(short, long)]
        profile: Profile,
    },
    /// Run service discovery against a captured row
    Discover {
        /// Device profile (wiseway3, wiseway3-ext)
        #[arg(short, long)]
        profile: Profile,

        /// Captured row file, '-' for stdin
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Evaluate the check plugins against a captured row
    Check {
        /// Device profile (wiseway3, wiseway3-ext)
        #[arg(short, long)]
        profile: Profile,

        /// Captured row file, '-' for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Threshold parameter file (YAML)
        #[arg(long)]
        params: Option<PathBuf>,

        /// Run a single plugin instead of all discovered ones
        #[arg(long)]
        plugin: Option<String>,

        /// Emit machine-readable JSON instead of the human report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Oids { profile } => output::print_oid_table(profile),
        Commands::Discover { profile, input } => run_discover(profile, &input),
        Commands::Check {
            profile,
            input,
            params,
            plugin,
            json,
        } => run_check(profile, &input, params.as_deref(), plugin.as_deref(), json),
    }
}

fn run_discover(profile: Profile, input: &std::path::Path) -> Result<()> {
    let row = input::read_row(input)?;
    debug!(profile = %profile, columns = row.len(), "row loaded");

    let Some(section) = parse_section(profile.oid_table(), &row) else {
        println!("{}", "Device delivered no data, nothing discovered".yellow());
        return Ok(());
    };

    let mut discovered = 0;
    for plugin in checks::plugins(profile) {
        if (plugin.discovery)(&section) {
            println!("{}  {}", plugin.name.bold(), plugin.service_name);
            discovered += 1;
        } else {
            debug!(plugin = plugin.name, "not discovered");
        }
    }
    println!(
        "\n{} of {} services discovered",
        discovered,
        checks::plugins(profile).len()
    );
    Ok(())
}

fn run_check(
    profile: Profile,
    input: &std::path::Path,
    params_path: Option<&std::path::Path>,
    plugin_name: Option<&str>,
    json: bool,
) -> Result<()> {
    let row = input::read_row(input)?;

    let params = match params_path {
        Some(path) => CheckParams::load(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => CheckParams::default(),
    };

    let selected: Vec<_> = match plugin_name {
        Some(name) => {
            let plugin = checks::plugin(profile, name)
                .ok_or_else(|| UpsError::UnknownPlugin(name.to_string()))
                .with_context(|| format!("profile {}", profile))?;
            vec![plugin]
        },
        None => checks::plugins(profile).iter().collect(),
    };

    let section = parse_section(profile.oid_table(), &row);
    let report = output::build_report(profile, &params, section.as_ref(), &selected);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_report(&report);
    }

    // Non-zero exit mirrors the worst service state, like monitoring
    // agents do
    std::process::exit(report.exit_code());
}
