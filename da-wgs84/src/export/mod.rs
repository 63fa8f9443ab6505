//! Modules d'export (GeoJSON, reprojection PROJ)

pub mod geojson;
pub mod reproject;

pub use geojson::{convert_file, read_document, transform_document, write_document, TransformOptions};
