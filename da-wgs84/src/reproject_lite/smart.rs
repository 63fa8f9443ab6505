//! Reprojection intelligente : reproject_lite en priorité, fallback sur proj
//!
//! Utilise automatiquement la meilleure option disponible.

use super::ReprojectorLite;
use anyhow::{bail, Result};
use geo::Coord;

/// Reprojection intelligente
///
/// Essaie d'abord reproject_lite (pure Rust), puis fallback sur proj si disponible.
pub enum SmartReprojector {
    /// Reprojection légère (pure Rust)
    Lite(ReprojectorLite),
    /// Reprojection via PROJ (si feature activée)
    #[cfg(feature = "reproject")]
    Proj(crate::export::reproject::Reprojector),
}

impl SmartReprojector {
    /// Crée un nouveau reprojector
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self> {
        if ReprojectorLite::is_supported(source_epsg, target_epsg) {
            let lite = ReprojectorLite::new(source_epsg, target_epsg)?;
            return Ok(Self::Lite(lite));
        }

        #[cfg(feature = "reproject")]
        {
            let proj = crate::export::reproject::Reprojector::new(source_epsg, target_epsg)?;
            return Ok(Self::Proj(proj));
        }

        #[cfg(not(feature = "reproject"))]
        bail!(
            "Reprojection EPSG:{} → EPSG:{} non supportée.\n\
             Projections supportées (reproject_lite) : 3347 ↔ 4326\n\
             Pour d'autres projections, compilez avec: cargo build --features reproject",
            source_epsg,
            target_epsg
        );
    }

    /// Force l'utilisation de PROJ
    pub fn with_proj(source_epsg: u32, target_epsg: u32) -> Result<Self> {
        #[cfg(feature = "reproject")]
        {
            let proj = crate::export::reproject::Reprojector::new(source_epsg, target_epsg)?;
            return Ok(Self::Proj(proj));
        }

        #[cfg(not(feature = "reproject"))]
        bail!(
            "PROJ backend requested for EPSG:{} → EPSG:{} but the 'reproject' feature is disabled. \
             Build with: cargo build --features reproject",
            source_epsg,
            target_epsg
        );
    }

    /// Transforme un point
    pub fn transform_point(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        match self {
            Self::Lite(lite) => lite.transform_point(x, y),
            #[cfg(feature = "reproject")]
            Self::Proj(proj) => proj.transform_point(x, y),
        }
    }

    /// Transforme une coordonnée
    pub fn transform_coord(&self, coord: Coord) -> Result<Coord> {
        let (x, y) = self.transform_point(coord.x, coord.y)?;
        Ok(Coord { x, y })
    }

    /// Retourne une description du reprojector utilisé
    pub fn description(&self) -> &'static str {
        match self {
            Self::Lite(_) => "reproject_lite (pure Rust)",
            #[cfg(feature = "reproject")]
            Self::Proj(_) => "proj (PROJ library)",
        }
    }
}
