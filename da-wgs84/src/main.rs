//! Point d'entrée CLI pour da-wgs84

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use da_wgs84::cli::{self, Commands, CommonArgs, RegionArgs, RunContext};

/// Reprojeter les limites de Statistique Canada vers WGS84
#[derive(Parser)]
#[command(name = "da-wgs84")]
#[command(author, version)]
#[command(about = "Reproject Statistics Canada GeoJSON boundaries from EPSG:3347 to WGS84")]
#[command(long_about = "Reprojects every coordinate of a GeoJSON file from Statistics Canada Lambert (EPSG:3347) to WGS84 longitude/latitude (EPSG:4326).\n\nBy default converts <base-dir>/da_<CODE>_<ABBR>.geojson into <base-dir>/da_<CODE>_<ABBR>_wgs84.geojson. Use 'provinces' or 'elections' for batch conversion.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    common: CommonArgs,

    /// Sous-commande (défaut: conversion d'une région)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Province/territory code (e.g., 35)
    code: Option<String>,

    /// Province/territory abbreviation (e.g., ON)
    abbr: Option<String>,
}

/// Travail demandé sur la ligne de commande
enum Task {
    Region(RegionArgs),
    Batch(Commands),
}

impl Cli {
    /// Sans sous-commande, `<CODE> <ABBR>` sont obligatoires ; avec une
    /// sous-commande, ils sont interdits
    fn task(&mut self) -> Result<Task, clap::Error> {
        match (self.command.take(), self.code.take(), self.abbr.take()) {
            (Some(_), Some(code), _) => {
                let mut cmd = Cli::command();
                Err(cmd.error(
                    ErrorKind::ArgumentConflict,
                    format!("<CODE> ({}) cannot be combined with a subcommand", code),
                ))
            }
            (Some(command), None, _) => Ok(Task::Batch(command)),
            (None, Some(code), Some(abbr)) => Ok(Task::Region(RegionArgs { code, abbr })),
            (None, code, _) => {
                let missing = if code.is_none() { "<CODE> <ABBR>" } else { "<ABBR>" };
                let mut cmd = Cli::command();
                Err(cmd.error(
                    ErrorKind::MissingRequiredArgument,
                    format!(
                        "missing {} (e.g. `da-wgs84 35 ON`) or a subcommand",
                        missing
                    ),
                ))
            }
        }
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Erreur d'usage : rien n'est lu ni écrit
    let task = cli.task().unwrap_or_else(|e| e.exit());

    init_logging(cli.verbose, cli.quiet);

    let ctx = RunContext::from_args(&cli.common, cli.quiet)?;

    match task {
        Task::Region(region) => {
            info!(code = %region.code, abbr = %region.abbr, "Conversion d'une région");
            cli::cmd_convert(&ctx, &region)?;
        }
        Task::Batch(Commands::Provinces { codes }) => {
            info!(codes = ?codes, "Conversion des provinces");
            cli::cmd_provinces(&ctx, &codes)?;
        }
        Task::Batch(Commands::Elections { years, kinds }) => {
            info!(years = ?years, kinds = ?kinds, "Conversion des limites électorales");
            cli::cmd_elections(&ctx, &years, &kinds)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
