//! Reprojection légère en Rust pur (sans dépendances externes)
//!
//! Supporte la projection des fichiers de Statistique Canada :
//! - Statistics Canada Lambert (EPSG:3347) - NAD83
//!
//! Cible supportée :
//! - WGS84 (EPSG:4326), longitude/latitude en degrés
//!
//! NAD83 est considéré confondu avec WGS84 (pas de changement de datum),
//! comme la définition `+datum=NAD83` sans paramètres de transformation.

mod ellipsoid;
mod lambert;
mod smart;

pub use ellipsoid::Ellipsoid;
pub use lambert::{LambertConic, LambertParams};
pub use smart::SmartReprojector;

use anyhow::{bail, Result};
use geo::Coord;

/// EPSG de Statistics Canada Lambert
pub const STATCAN_LAMBERT: u32 = 3347;

/// EPSG de WGS84 géographique
pub const WGS84: u32 = 4326;

/// Point en coordonnées géographiques (radians)
#[derive(Debug, Clone, Copy)]
pub struct Geographic {
    /// Longitude en radians
    pub lon: f64,
    /// Latitude en radians
    pub lat: f64,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convertit en degrés
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }

    /// Crée depuis des degrés
    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon: lon_deg.to_radians(),
            lat: lat_deg.to_radians(),
        }
    }

    /// Ramène la longitude dans [-π, π]
    pub fn normalized(self) -> Self {
        let pi = std::f64::consts::PI;
        let mut lon = self.lon;
        if lon.abs() > pi {
            lon = (lon + pi).rem_euclid(2.0 * pi) - pi;
        }
        Self { lon, lat: self.lat }
    }
}

/// Reprojection légère EPSG:3347 ↔ EPSG:4326
pub struct ReprojectorLite {
    source_epsg: u32,
    conic: LambertConic,
}

impl ReprojectorLite {
    /// Crée un nouveau reprojector
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self> {
        if !Self::is_supported(source_epsg, target_epsg) {
            bail!(
                "EPSG:{} → EPSG:{} non supporté. Paires supportées: 3347 → 4326, 4326 → 3347",
                source_epsg,
                target_epsg
            );
        }

        Ok(Self {
            source_epsg,
            conic: LambertConic::statcan(),
        })
    }

    /// Vérifie si la reprojection est supportée
    pub fn is_supported(source: u32, target: u32) -> bool {
        matches!(
            (source, target),
            (STATCAN_LAMBERT, WGS84) | (WGS84, STATCAN_LAMBERT)
        )
    }

    /// Transforme un point (x, y) de la source vers la cible
    pub fn transform_point(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        if self.source_epsg == STATCAN_LAMBERT {
            let geo = self.conic.inverse(x, y)?;
            Ok(geo.normalized().to_degrees())
        } else {
            self.conic.forward(Geographic::from_degrees(x, y))
        }
    }

    /// Transforme une coordonnée
    pub fn transform_coord(&self, coord: Coord) -> Result<Coord> {
        let (x, y) = self.transform_point(coord.x, coord.y)?;
        Ok(Coord { x, y })
    }
}
