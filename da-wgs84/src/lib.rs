//! # da-wgs84
//!
//! Reprojection des limites de Statistique Canada (EPSG:3347, Lambert NAD83)
//! vers WGS84 (EPSG:4326, longitude/latitude).
//!
//! ## Features
//!
//! - Lambert conique conforme en Rust pur (sans PROJ)
//! - Fallback PROJ avec le feature `reproject`
//! - Propriétés et membres GeoJSON recopiés à l'identique
//! - Conversion par lot (provinces, limites électorales)
//! - CLI simple
//!
//! ## Usage CLI
//!
//! ```bash
//! # new_boundaries/provinces/da_35_ON.geojson → da_35_ON_wgs84.geojson
//! da-wgs84 35 ON
//!
//! # Toutes les provinces présentes
//! da-wgs84 provinces
//!
//! # Limites électorales 2021
//! da-wgs84 elections --year 2021
//! ```

pub mod cli;
pub mod config;
pub mod export;
pub mod report;
pub mod reproject_lite;

pub use config::Config;
pub use export::geojson::{convert_file, TransformOptions};
pub use report::{ConversionReport, TransformStats};
pub use reproject_lite::SmartReprojector;
