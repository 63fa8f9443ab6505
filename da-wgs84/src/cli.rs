//! Définition et implémentation des commandes CLI
//!
//! - par défaut : `<CODE> <ABBR>` → un fichier `da_<code>_<abbr>.geojson`
//! - `provinces` : toutes les provinces configurées
//! - `elections` : limites électorales fédérales

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use tracing::{info, warn};

use crate::config::{Config, FilePair};
use crate::export::geojson::{convert_file, TransformOptions};
use crate::report::ConversionReport;

/// Région à convertir (forme par défaut)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionArgs {
    /// Code numérique (ex: 35)
    pub code: String,

    /// Abréviation (ex: ON)
    pub abbr: String,
}

/// Options communes à toutes les commandes
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory holding da_<code>_<abbr>.geojson files
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// JSON config file (default: embedded "canada" preset)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Transform features in parallel (output order is preserved)
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Use the PROJ library instead of the built-in Lambert implementation
    #[arg(long, global = true)]
    pub proj: bool,

    /// Write a JSON run report to this path
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every configured province and territory (missing inputs are skipped)
    Provinces {
        /// Province codes to convert (default: all configured)
        codes: Vec<String>,
    },

    /// Convert federal election boundary files (missing inputs are skipped)
    Elections {
        /// Election years (default: from config)
        #[arg(long = "year")]
        years: Vec<String>,

        /// Boundary kinds: riding, poll, adv (default: from config)
        #[arg(long = "kind")]
        kinds: Vec<String>,
    },
}

/// Contexte d'exécution résolu depuis la config et les arguments
pub struct RunContext {
    pub config: Config,
    pub options: TransformOptions,
    pub report_path: Option<PathBuf>,
    pub quiet: bool,
}

impl RunContext {
    /// Charge la config et applique les surcharges de la ligne de commande
    pub fn from_args(common: &CommonArgs, quiet: bool) -> Result<Self> {
        let mut config = match &common.config {
            Some(path) => Config::load(path)?,
            None => Config::from_preset("canada")?,
        };

        if let Some(dir) = &common.base_dir {
            config.base_dir = dir.clone();
        }
        if common.pretty {
            config.pretty = true;
        }

        let options = TransformOptions {
            parallel: common.parallel,
            force_proj: common.proj,
            progress_interval: config.progress_interval,
            show_progress: !quiet,
            ..Default::default()
        };

        Ok(Self {
            config,
            options,
            report_path: common.report.clone(),
            quiet,
        })
    }

    fn new_report(&self) -> Result<ConversionReport> {
        let reprojector = self.options.reprojector()?;
        Ok(ConversionReport::new(reprojector.description()))
    }

    fn finish(&self, report: &mut ConversionReport, started: Instant) -> Result<()> {
        report.set_duration(started.elapsed());

        if !self.quiet {
            report.display();
        }
        if let Some(path) = &self.report_path {
            report
                .save_to_file(path)
                .context(format!("Failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "Report saved");
        }
        Ok(())
    }

    fn say(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }
}

/// Convertit une région : `da_<code>_<abbr>.geojson` → `da_<code>_<abbr>_wgs84.geojson`
pub fn cmd_convert(ctx: &RunContext, region: &RegionArgs) -> Result<()> {
    let started = Instant::now();
    let mut report = ctx.new_report()?;
    let pair = ctx.config.region_paths(&region.code, &region.abbr);

    info!(
        code = %region.code,
        abbr = %region.abbr,
        input = %pair.input.display(),
        "Converting region"
    );
    ctx.say(&format!("Transforming {}...", region.abbr));

    let file_started = Instant::now();
    let stats = convert_file(&pair.input, &pair.output, &ctx.options, ctx.config.pretty)?;
    ctx.say(&format!("Saved {}", pair.output.display()));
    report.record_converted(&pair.input, &pair.output, stats, file_started.elapsed());

    ctx.finish(&mut report, started)
}

/// Convertit toutes les provinces configurées (ou celles demandées)
pub fn cmd_provinces(ctx: &RunContext, codes: &[String]) -> Result<()> {
    let provinces: Vec<_> = if codes.is_empty() {
        ctx.config.provinces.iter().collect()
    } else {
        codes
            .iter()
            .map(|code| {
                ctx.config
                    .get_province(code)
                    .with_context(|| format!("Unknown province code: {}", code))
            })
            .collect::<Result<_>>()?
    };

    let jobs = provinces
        .iter()
        .map(|p| {
            (
                p.abbr.clone(),
                ctx.config.region_paths(&p.code, &p.abbr),
            )
        })
        .collect();

    run_batch(ctx, jobs)?;
    ctx.say("All provinces transformed to WGS84.");
    Ok(())
}

/// Convertit les limites électorales (années × types)
pub fn cmd_elections(ctx: &RunContext, years: &[String], kinds: &[String]) -> Result<()> {
    let years = if years.is_empty() {
        ctx.config.elections.years.as_slice()
    } else {
        years
    };
    let kinds = if kinds.is_empty() {
        ctx.config.elections.kinds.as_slice()
    } else {
        kinds
    };

    let mut jobs = Vec::with_capacity(years.len() * kinds.len());
    for year in years {
        for kind in kinds {
            jobs.push((
                format!("{} {} boundaries", year, kind),
                ctx.config.election_paths(year, kind),
            ));
        }
    }

    run_batch(ctx, jobs)?;
    ctx.say("All election boundaries transformed to WGS84.");
    Ok(())
}

/// Convertit une liste de fichiers ; les entrées absentes sont ignorées,
/// la première erreur de conversion arrête le lot
fn run_batch(ctx: &RunContext, jobs: Vec<(String, FilePair)>) -> Result<ConversionReport> {
    if jobs.is_empty() {
        bail!("Nothing to convert: the configuration lists no input files");
    }

    let started = Instant::now();
    let mut report = ctx.new_report()?;

    info!(files = jobs.len(), "Starting batch");

    for (label, pair) in jobs {
        if !pair.input.exists() {
            warn!(input = %pair.input.display(), "Input not found, skipping");
            ctx.say(&format!("File not found: {}", pair.input.display()));
            report.record_missing(&pair.input, &pair.output);
            continue;
        }

        ctx.say(&format!("Transforming {}...", label));
        let file_started = Instant::now();
        let stats = convert_file(&pair.input, &pair.output, &ctx.options, ctx.config.pretty)?;
        ctx.say(&format!(
            "Saved {} ({} features)",
            pair.output.display(),
            stats.transformed
        ));
        report.record_converted(&pair.input, &pair.output, stats, file_started.elapsed());
    }

    ctx.finish(&mut report, started)?;
    Ok(report)
}
