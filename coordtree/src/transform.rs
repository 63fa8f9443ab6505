//! Transformation récursive des positions d'un arbre de coordonnées

use std::fmt::Display;

use serde_json::Value;

use crate::{CoordError, CoordinateTree};

impl CoordinateTree {
    /// Applique `f` à chaque position, en place.
    ///
    /// Seules les composantes 0 et 1 sont réécrites ; la structure et les
    /// dimensions supplémentaires restent identiques. Retourne le nombre de
    /// positions transformées.
    ///
    /// # Errors
    ///
    /// `CoordError::Projection` si `f` échoue ou retourne une valeur non finie.
    /// L'arbre peut alors être partiellement transformé : l'appelant ne doit
    /// pas le sérialiser.
    pub fn transform<F, E>(&mut self, f: &F) -> Result<usize, CoordError>
    where
        F: Fn(f64, f64) -> Result<(f64, f64), E>,
        E: Display,
    {
        match self {
            Self::Leaf(pos) => {
                let (x, y) = f(pos.x, pos.y)
                    .map_err(|e| CoordError::projection(pos.x, pos.y, e.to_string()))?;
                if !x.is_finite() || !y.is_finite() {
                    return Err(CoordError::projection(
                        pos.x,
                        pos.y,
                        format!("non-finite result ({}, {})", x, y),
                    ));
                }
                pos.x = x;
                pos.y = y;
                Ok(1)
            }
            Self::Node(children) => {
                if children.is_empty() {
                    tracing::trace!("Empty coordinate node, nothing to transform");
                }
                let mut count = 0;
                for child in children.iter_mut() {
                    count += child.transform(f)?;
                }
                Ok(count)
            }
        }
    }
}

/// Transforme la valeur JSON d'un membre `coordinates`.
///
/// Retourne la nouvelle valeur et le nombre de positions transformées. La
/// valeur d'entrée n'est jamais modifiée : en cas d'erreur, rien n'est
/// partiellement réécrit.
pub fn transform_value<F, E>(value: &Value, f: &F) -> Result<(Value, usize), CoordError>
where
    F: Fn(f64, f64) -> Result<(f64, f64), E>,
    E: Display,
{
    let mut tree = CoordinateTree::from_value(value)?;
    let count = tree.transform(f)?;
    Ok((tree.into_value()?, count))
}
