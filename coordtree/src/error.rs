//! Types d'erreurs pour le crate coordtree

use thiserror::Error;

/// Erreurs pouvant survenir lors de la construction ou de la transformation
/// d'un arbre de coordonnées
#[derive(Debug, Error)]
pub enum CoordError {
    /// Le nœud ne respecte pas la forme attendue (arité, type numérique)
    #[error("Malformed geometry at {path}: {reason}")]
    MalformedGeometry { path: String, reason: String },

    /// La fonction de transformation a rejeté le point
    #[error("Projection failed for ({x}, {y}): {reason}")]
    Projection { x: f64, y: f64, reason: String },
}

impl CoordError {
    /// Crée une erreur de géométrie malformée avec son chemin JSON
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedGeometry {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Crée une erreur de projection pour le point (x, y)
    pub fn projection(x: f64, y: f64, reason: impl Into<String>) -> Self {
        Self::Projection {
            x,
            y,
            reason: reason.into(),
        }
    }

    /// Vrai si l'erreur vient de la forme des données
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedGeometry { .. })
    }
}
