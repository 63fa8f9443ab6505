//! Tests d'intégration sur des géométries GeoJSON complètes

use coordtree::{transform_value, CoordError, CoordinateTree, Shape};
use serde_json::{json, Value};

fn offset(x: f64, y: f64) -> Result<(f64, f64), String> {
    Ok((x / 1000.0, y / 1000.0))
}

/// Toutes les géométries GeoJSON à coordonnées, avec leur profondeur
fn geometries() -> Vec<(&'static str, Value, usize)> {
    vec![
        ("Point", json!([1000.0, 2000.0]), 0),
        ("MultiPoint", json!([[1000.0, 2000.0], [3000.0, 4000.0]]), 1),
        ("LineString", json!([[0, 0], [1000, 1000], [2000, 0]]), 1),
        (
            "MultiLineString",
            json!([[[0, 0], [1000, 1000]], [[5000, 5000], [6000, 6000], [7000, 5000]]]),
            2,
        ),
        (
            "Polygon",
            json!([
                [[0, 0], [4000, 0], [4000, 4000], [0, 4000], [0, 0]],
                [[1000, 1000], [2000, 1000], [2000, 2000], [1000, 1000]]
            ]),
            2,
        ),
        (
            "MultiPolygon",
            json!([
                [[[0, 0], [1000, 0], [1000, 1000], [0, 0]]],
                [[[9000, 9000], [9500, 9000], [9500, 9500], [9000, 9000]]]
            ]),
            3,
        ),
    ]
}

#[test]
fn test_every_geometry_type_keeps_shape() {
    for (name, value, depth) in geometries() {
        let before = CoordinateTree::from_value(&value).unwrap();
        assert_eq!(before.depth(), depth, "{} depth", name);

        let (out, count) = transform_value(&value, &offset).unwrap();
        let after = CoordinateTree::from_value(&out).unwrap();

        assert_eq!(after.shape(), before.shape(), "{} shape", name);
        assert_eq!(count, before.point_count(), "{} point count", name);
    }
}

#[test]
fn test_polygon_every_ring_transformed() {
    let value = json!([
        [[0, 0], [4000, 0], [4000, 4000], [0, 0]],
        [[1000, 1000], [2000, 1000], [2000, 2000], [1000, 1000]]
    ]);

    let (out, count) = transform_value(&value, &offset).unwrap();

    assert_eq!(count, 8);
    assert_eq!(
        out,
        json!([
            [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]],
            [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]]
        ])
    );
}

#[test]
fn test_point_single_leaf() {
    let (out, count) = transform_value(&json!([1000.0, 2000.0]), &offset).unwrap();
    assert_eq!(count, 1);
    assert_eq!(out, json!([1.0, 2.0]));
}

#[test]
fn test_elevation_bit_identical() {
    let z = 1234.567_890_123_f64;
    let value = json!([[1000.0, 2000.0, z], [3000.0, 4000.0, 12]]);

    let (out, _) = transform_value(&value, &offset).unwrap();

    assert_eq!(out[0][2].as_f64().unwrap().to_bits(), z.to_bits());
    assert_eq!(out[1][2], json!(12));
    assert!(out[1][2].is_u64());
}

#[test]
fn test_shapes_differ_on_ring_length() {
    let a = CoordinateTree::from_value(&json!([[0, 0], [1, 1]])).unwrap();
    let b = CoordinateTree::from_value(&json!([[0, 0], [1, 1], [2, 2]])).unwrap();
    assert_ne!(a.shape(), b.shape());
    assert_eq!(a.shape(), Shape::Node(vec![Shape::Leaf(2), Shape::Leaf(2)]));
}

#[test]
fn test_malformed_deep_leaf() {
    let value = json!([[[0, 0], [1, 1]], [[2, 2], [3]]]);
    match transform_value(&value, &offset) {
        Err(CoordError::MalformedGeometry { path, .. }) => assert_eq!(path, "coordinates[1][1]"),
        other => panic!("Expected MalformedGeometry, got {:?}", other),
    }
}
