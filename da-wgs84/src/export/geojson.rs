//! Lecture, reprojection et écriture de documents GeoJSON
//!
//! Le document est conservé en `serde_json::Value` (ordre des clés préservé) :
//! seuls les membres `geometry.coordinates` sont réécrits, tout le reste est
//! recopié à l'identique.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use rayon::prelude::*;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::report::{Progress, TransformStats};
use crate::reproject_lite::{SmartReprojector, STATCAN_LAMBERT, WGS84};

/// Options de transformation d'un document (EPSG:3347 → EPSG:4326)
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Transformer les features en parallèle (ordre conservé)
    pub parallel: bool,
    /// Forcer PROJ plutôt que reproject_lite
    pub force_proj: bool,
    pub progress_interval: usize,
    /// Afficher la progression sur stdout
    pub show_progress: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            force_proj: false,
            progress_interval: 1000,
            show_progress: false,
        }
    }
}

impl TransformOptions {
    /// Construit le reprojector décrit par les options
    pub fn reprojector(&self) -> Result<SmartReprojector> {
        if self.force_proj {
            SmartReprojector::with_proj(STATCAN_LAMBERT, WGS84)
        } else {
            SmartReprojector::new(STATCAN_LAMBERT, WGS84)
        }
    }
}

/// Résultat du traitement d'une feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeatureOutcome {
    Transformed { positions: usize },
    Passthrough,
}

/// Lit et parse un document GeoJSON
pub fn read_document(path: &Path) -> Result<Value> {
    let bytes =
        std::fs::read(path).context(format!("Failed to read file: {}", path.display()))?;

    let doc: Value = serde_json::from_slice(&bytes)
        .context(format!("Failed to parse JSON: {}", path.display()))?;

    if !doc.get("features").map_or(false, Value::is_array) {
        bail!("{} has no `features` array", path.display());
    }

    Ok(doc)
}

/// Écrit un document GeoJSON (compact par défaut)
pub fn write_document(doc: &Value, path: &Path, pretty: bool) -> Result<()> {
    let file =
        File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, doc)?;
    } else {
        serde_json::to_writer(&mut writer, doc)?;
    }
    writer.flush()?;

    Ok(())
}

/// Reprojette toutes les features du document, en place.
///
/// La première erreur interrompt la transformation ; le document ne doit
/// alors pas être écrit.
pub fn transform_document(doc: &mut Value, options: &TransformOptions) -> Result<TransformStats> {
    // Valider le reprojector avant de toucher au document
    let reprojector = options.reprojector()?;
    debug!(backend = reprojector.description(), "Reprojector ready");

    let features = doc
        .get_mut("features")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| anyhow!("Document has no `features` array"))?;

    let progress = Progress::new(
        features.len(),
        options.progress_interval,
        options.show_progress,
    );

    let outcomes: Vec<FeatureOutcome> = if options.parallel {
        // Un reprojector par thread (les contextes PROJ ne sont pas partagés)
        features
            .par_iter_mut()
            .enumerate()
            .map_init(
                || options.reprojector(),
                |reprojector, (index, feature)| -> Result<FeatureOutcome> {
                    let reprojector = reprojector.as_ref().map_err(|e| anyhow!("{:#}", e))?;
                    let outcome = transform_feature(feature, index, reprojector)?;
                    progress.tick();
                    Ok(outcome)
                },
            )
            .collect::<Result<Vec<_>>>()?
    } else {
        features
            .iter_mut()
            .enumerate()
            .map(|(index, feature)| -> Result<FeatureOutcome> {
                let outcome = transform_feature(feature, index, &reprojector)?;
                progress.tick();
                Ok(outcome)
            })
            .collect::<Result<Vec<_>>>()?
    };
    progress.finish();
    debug!(features = progress.done(), "Features processed");

    let mut stats = TransformStats {
        features: outcomes.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            FeatureOutcome::Transformed { positions } => {
                stats.transformed += 1;
                stats.positions += positions;
            }
            FeatureOutcome::Passthrough => stats.passthrough += 1,
        }
    }

    update_crs_member(doc);

    Ok(stats)
}

/// Reprojette les coordonnées d'une feature.
///
/// Sans `geometry` ou sans `coordinates` (absents ou `null`), la feature est
/// recopiée telle quelle.
fn transform_feature(
    feature: &mut Value,
    index: usize,
    reprojector: &SmartReprojector,
) -> Result<FeatureOutcome> {
    let geometry = match feature.get_mut("geometry") {
        None | Some(Value::Null) => return Ok(FeatureOutcome::Passthrough),
        Some(Value::Object(geometry)) => geometry,
        Some(other) => bail!("Feature {}: geometry is not an object ({})", index, other),
    };

    if geometry.get("coordinates").map_or(true, Value::is_null) {
        if geometry.contains_key("geometries") {
            debug!(index, "GeometryCollection left unchanged");
        }
        return Ok(FeatureOutcome::Passthrough);
    }
    let Some(coordinates) = geometry.get_mut("coordinates") else {
        return Ok(FeatureOutcome::Passthrough);
    };

    let (transformed, positions) = coordtree::transform_value(coordinates, &|x: f64, y: f64| {
        reprojector.transform_point(x, y)
    })
    .with_context(|| format!("Feature {}", index))?;

    *coordinates = transformed;
    Ok(FeatureOutcome::Transformed { positions })
}

/// Réécrit le membre `crs` de premier niveau s'il est présent
fn update_crs_member(doc: &mut Value) {
    if let Some(crs) = doc.get_mut("crs") {
        *crs = json!({ "type": "name", "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" } });
    }
}

/// Convertit un fichier : lecture, reprojection, écriture.
///
/// La sortie n'est écrite qu'après la reprojection complète du document.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &TransformOptions,
    pretty: bool,
) -> Result<TransformStats> {
    let say = |msg: &str| {
        if options.show_progress {
            println!("{}", msg);
        }
    };

    say("Reading and parsing JSON...");
    let mut doc = read_document(input)?;

    let total = doc["features"].as_array().map_or(0, Vec::len);
    say(&format!("Transforming {} features...", total));

    let stats = transform_document(&mut doc, options)
        .with_context(|| format!("Failed to transform {}", input.display()))?;

    say("Writing output...");
    write_document(&doc, output, pretty)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        features = stats.features,
        positions = stats.positions,
        "Converted"
    );

    Ok(stats)
}
