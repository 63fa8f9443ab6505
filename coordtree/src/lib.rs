//! # coordtree
//!
//! Arbres de coordonnées GeoJSON typés, transformés en place.
//!
//! ## Features
//!
//! - Distinction feuille/nœud faite une seule fois à la construction
//! - Transformation point par point avec une fonction injectée
//! - Dimensions au-delà de 2 (élévation) conservées à l'identique
//! - Erreurs explicites pour les géométries malformées
//!
//! ## Usage
//!
//! ```rust
//! use coordtree::transform_value;
//! use serde_json::json;
//!
//! let swap = |x: f64, y: f64| Ok::<_, String>((y, x));
//! let (out, count) = transform_value(&json!([[1.0, 2.0], [3.0, 4.0, 9.0]]), &swap).unwrap();
//!
//! assert_eq!(count, 2);
//! assert_eq!(out, json!([[2.0, 1.0], [4.0, 3.0, 9.0]]));
//! ```

pub mod error;
pub mod transform;
pub mod types;

pub use error::CoordError;
pub use transform::transform_value;
pub use types::{CoordinateTree, Position, Shape};
