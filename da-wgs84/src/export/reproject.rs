//! Reprojection de coordonnées avec PROJ
//!
//! Ce module est disponible uniquement avec le feature `reproject`.

#[cfg(feature = "reproject")]
use anyhow::{Context, Result};
#[cfg(feature = "reproject")]
use geo::Coord;
#[cfg(feature = "reproject")]
use proj::Proj;

/// Reprojection de points entre deux systèmes de coordonnées
#[cfg(feature = "reproject")]
pub struct Reprojector {
    proj: Proj,
}

#[cfg(feature = "reproject")]
impl Reprojector {
    /// Crée un nouveau reprojector entre deux EPSG
    ///
    /// `new_known_crs` normalise l'ordre des axes : les sorties géographiques
    /// sont en (longitude, latitude).
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self> {
        let source = format!("EPSG:{}", source_epsg);
        let target = format!("EPSG:{}", target_epsg);

        let proj = Proj::new_known_crs(&source, &target, None).context(format!(
            "Failed to create projection from {} to {}",
            source, target
        ))?;

        Ok(Self { proj })
    }

    /// Transforme un point unique
    pub fn transform_point(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        self.proj
            .convert((x, y))
            .context("Coordinate transformation failed")
    }

    /// Transforme une coordonnée
    pub fn transform_coord(&self, coord: Coord) -> Result<Coord> {
        let (x, y) = self.transform_point(coord.x, coord.y)?;
        Ok(Coord { x, y })
    }
}
