//! Command-line interface for `gdbmeta`, a metadata reader for Esri
//! geodatabase containers.
//!
//! The CLI is built using [`clap`] for argument parsing and [`tracing`] for
//! structured logging. It is a thin façade: each subcommand opens an
//! accessor from [`gdbmeta_core`], runs one query, and hands the result to
//! the `display` module (or serializes it as JSON).
//!
//! # Available Commands
//!
//! - `info` - Show workspace-level properties of a geodatabase
//! - `domains` - List attribute domains
//! - `tables` - List non-spatial tables
//! - `feature-classes` - List spatial layers
//! - `backends` - Report which backends can read a container

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{Level, info};
use tracing_log::LogTracer;
use tracing_subscriber::FmtSubscriber;

use gdbmeta_core::{BackendKind, Geodatabase, Properties, available_backends};

mod display;

#[derive(Parser)]
#[command(
    name = "gdbmeta",
    version,
    about = "Metadata reader for Esri geodatabase containers",
    long_about = "gdbmeta reads descriptive metadata out of Esri geodatabase containers:\n\
                  release version, workspace type, attribute domains, tables and feature\n\
                  classes, through either the Esri system catalog or a generic SQLite walk."
)]
struct Cli {
    /// Enable verbose (INFO level) logging output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug (DEBUG level) logging output with detailed diagnostics.
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Backend choice exposed on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    /// Structured walk of the Esri system catalog.
    Catalog,
    /// Generic SQLite table and layer enumeration.
    Generic,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Catalog => BackendKind::Catalog,
            BackendArg::Generic => BackendKind::Generic,
        }
    }
}

/// The container a query subcommand runs against.
#[derive(Args)]
struct Target {
    /// Path to the geodatabase container.
    #[arg(value_name = "GEODATABASE")]
    path: PathBuf,

    /// Force a specific backend instead of probing the container.
    #[arg(long, value_enum, value_name = "BACKEND")]
    backend: Option<BackendArg>,

    /// Emit JSON instead of human-readable tables.
    #[arg(long)]
    json: bool,
}

/// Available subcommands for the `gdbmeta` CLI.
#[derive(Subcommand)]
enum Commands {
    /// Shows workspace-level properties: path, release, workspace type.
    Info {
        #[command(flatten)]
        target: Target,
    },

    /// Lists attribute domains with their types, policies and values.
    Domains {
        #[command(flatten)]
        target: Target,
    },

    /// Lists non-spatial tables with field and row counts.
    Tables {
        #[command(flatten)]
        target: Target,
    },

    /// Lists feature classes, including feature-dataset membership.
    FeatureClasses {
        #[command(flatten)]
        target: Target,
    },

    /// Reports which backends can read a container and which one is used.
    Backends {
        /// Path to the geodatabase container.
        #[arg(value_name = "GEODATABASE")]
        path: PathBuf,
    },
}

/// Entry point for the `gdbmeta` command-line interface.
///
/// # Errors
///
/// Returns an error if command execution fails or if the logging system
/// cannot be initialized.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity flags
    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // Bridge logs from the `log` crate to the `tracing` ecosystem.
    LogTracer::init()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true) // Show module paths for better context
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Info { target } => handle_info(&target),
        Commands::Domains { target } => handle_domains(&target),
        Commands::Tables { target } => handle_tables(&target),
        Commands::FeatureClasses { target } => handle_feature_classes(&target),
        Commands::Backends { path } => handle_backends(&path),
    }
}

fn open_target(target: &Target) -> Result<Geodatabase> {
    let gdb = match target.backend {
        Some(backend) => Geodatabase::open_with(&target.path, backend.into()),
        None => Geodatabase::open(&target.path),
    }
    .with_context(|| format!("could not read geodatabase '{}'", target.path.display()))?;
    info!(backend = %gdb.backend_kind(), "opened {}", target.path.display());
    Ok(gdb)
}

fn emit_json(props: &[Properties]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(props)?);
    Ok(())
}

fn handle_info(target: &Target) -> Result<()> {
    let gdb = open_target(target)?;
    if target.json {
        println!("{}", serde_json::to_string_pretty(&gdb.pretty_props())?);
        return Ok(());
    }
    display::print_properties(&gdb.pretty_props());
    Ok(())
}

fn handle_domains(target: &Target) -> Result<()> {
    let gdb = open_target(target)?;
    let domains = gdb.domains().context("could not list attribute domains")?;
    if target.json {
        let props: Vec<Properties> = domains.iter().map(|d| d.pretty_props()).collect();
        return emit_json(&props);
    }
    display::print_domains(&domains);
    Ok(())
}

fn handle_tables(target: &Target) -> Result<()> {
    let gdb = open_target(target)?;
    let tables = gdb.tables().context("could not list tables")?;
    if target.json {
        let props: Vec<Properties> = tables.iter().map(|t| t.pretty_props()).collect();
        return emit_json(&props);
    }
    display::print_tables(&tables);
    Ok(())
}

fn handle_feature_classes(target: &Target) -> Result<()> {
    let gdb = open_target(target)?;
    let fcs = gdb
        .feature_classes()
        .context("could not list feature classes")?;
    if target.json {
        let props: Vec<Properties> = fcs.iter().map(|fc| fc.pretty_props()).collect();
        return emit_json(&props);
    }
    display::print_feature_classes(&fcs);
    Ok(())
}

fn handle_backends(path: &Path) -> Result<()> {
    let kinds = available_backends(path)
        .with_context(|| format!("could not probe '{}'", path.display()))?;
    display::print_backends(&kinds);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_arg_maps_onto_backend_kind() {
        assert_eq!(BackendKind::from(BackendArg::Catalog), BackendKind::Catalog);
        assert_eq!(BackendKind::from(BackendArg::Generic), BackendKind::Generic);
    }

    #[test]
    fn test_cli_parses_query_subcommands() {
        let cli = Cli::try_parse_from([
            "gdbmeta",
            "domains",
            "water.geodatabase",
            "--backend",
            "generic",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Domains { target } => {
                assert_eq!(target.path, PathBuf::from("water.geodatabase"));
                assert!(target.json);
                assert!(matches!(target.backend, Some(BackendArg::Generic)));
            },
            _ => panic!("expected the domains subcommand"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_backend() {
        let result =
            Cli::try_parse_from(["gdbmeta", "info", "water.geodatabase", "--backend", "esri"]);
        assert!(result.is_err());
    }
}
