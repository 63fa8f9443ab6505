//! Représentation typée des coordonnées GeoJSON
//!
//! Un membre `coordinates` est soit une position (`[x, y, ...]`), soit une
//! séquence de sous-arbres. La distinction se fait une seule fois, à la
//! construction depuis la valeur JSON.

use serde_json::{Number, Value};

use crate::CoordError;

/// Position feuille : `[x, y]` suivie d'éventuelles dimensions supplémentaires
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,

    /// Dimensions au-delà de 2 (élévation, mesure), conservées telles quelles
    pub extra: Vec<Number>,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            extra: Vec::new(),
        }
    }

    /// Nombre total de composantes
    pub fn arity(&self) -> usize {
        2 + self.extra.len()
    }
}

/// Arbre de coordonnées d'une géométrie
///
/// Profondeur selon le type : Point → 0, LineString/MultiPoint → 1,
/// Polygon/MultiLineString → 2, MultiPolygon → 3.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateTree {
    Leaf(Position),
    Node(Vec<CoordinateTree>),
}

/// Empreinte structurelle d'un arbre (profondeurs et longueurs)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Feuille avec son arité
    Leaf(usize),
    Node(Vec<Shape>),
}

impl CoordinateTree {
    /// Construit un arbre depuis la valeur JSON d'un membre `coordinates`
    pub fn from_value(value: &Value) -> Result<Self, CoordError> {
        build(value, &mut String::from("coordinates"))
    }

    /// Reconstruit la valeur JSON (inverse de `from_value`)
    pub fn into_value(self) -> Result<Value, CoordError> {
        match self {
            Self::Leaf(pos) => {
                let x = Number::from_f64(pos.x)
                    .ok_or_else(|| CoordError::projection(pos.x, pos.y, "non-finite x"))?;
                let y = Number::from_f64(pos.y)
                    .ok_or_else(|| CoordError::projection(pos.x, pos.y, "non-finite y"))?;

                let mut items = Vec::with_capacity(pos.arity());
                items.push(Value::Number(x));
                items.push(Value::Number(y));
                items.extend(pos.extra.into_iter().map(Value::Number));
                Ok(Value::Array(items))
            }
            Self::Node(children) => children
                .into_iter()
                .map(Self::into_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }

    /// Empreinte structurelle
    pub fn shape(&self) -> Shape {
        match self {
            Self::Leaf(pos) => Shape::Leaf(pos.arity()),
            Self::Node(children) => Shape::Node(children.iter().map(Self::shape).collect()),
        }
    }

    /// Nombre de positions dans l'arbre
    pub fn point_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node(children) => children.iter().map(Self::point_count).sum(),
        }
    }

    /// Profondeur d'imbrication (0 pour une position seule)
    ///
    /// Un nœud vide compte pour un niveau.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Node(children) => 1 + children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }
}

fn build(value: &Value, path: &mut String) -> Result<CoordinateTree, CoordError> {
    let items = value.as_array().ok_or_else(|| {
        CoordError::malformed(path.as_str(), format!("expected an array, got {}", kind(value)))
    })?;

    match items.first() {
        None => Ok(CoordinateTree::Node(Vec::new())),
        Some(Value::Array(_)) => {
            let mut children = Vec::with_capacity(items.len());
            for (i, child) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{}]", i));
                children.push(build(child, path)?);
                path.truncate(len);
            }
            Ok(CoordinateTree::Node(children))
        }
        Some(Value::Number(_)) => build_position(items, path).map(CoordinateTree::Leaf),
        Some(other) => Err(CoordError::malformed(
            path.as_str(),
            format!("first element is {}, expected a number or an array", kind(other)),
        )),
    }
}

fn build_position(items: &[Value], path: &str) -> Result<Position, CoordError> {
    if items.len() < 2 {
        return Err(CoordError::malformed(
            path,
            format!("position has {} element(s), expected at least 2", items.len()),
        ));
    }

    let mut numbers = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::Number(n) => numbers.push(n.clone()),
            other => {
                return Err(CoordError::malformed(
                    format!("{}[{}]", path, i),
                    format!("expected a number, got {}", kind(other)),
                ))
            }
        }
    }

    let extra = numbers.split_off(2);
    let x = as_f64(&numbers[0], path)?;
    let y = as_f64(&numbers[1], path)?;

    Ok(Position { x, y, extra })
}

fn as_f64(n: &Number, path: &str) -> Result<f64, CoordError> {
    n.as_f64()
        .ok_or_else(|| CoordError::malformed(path, format!("{} is not representable as f64", n)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
