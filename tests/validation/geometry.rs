//! Geometry checks through parsing and the public API

use gocad_qc::validator::{validate_document_geometry, validate_object_geometry};
use gocad_qc::{LineMap, MeshDocument, MeshObject, Severity, Triangle, Vertex};

use crate::common::{surface, tetra_vertices};

#[test]
fn test_missing_vertex_reported_once_with_line() {
    let text = surface(
        "SRF_0001_001",
        &tetra_vertices(),
        &[(1, 2, 3), (2, 3, 4), (3, 4, 99)],
    );
    let document = MeshDocument::parse(&text);
    let results = validate_document_geometry(&document, None);
    let findings = &results[0].findings;
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.starts_with("Triangle 2 references missing vertices: (3, 4, 99)"));
    assert_eq!(findings[0].line, Some(12));
    assert!(!results[0].is_valid());
}

#[test]
fn test_degenerate_triangle_with_existing_vertices() {
    let text = surface("SRF_0001_001", &tetra_vertices(), &[(1, 1, 2)]);
    let document = MeshDocument::parse(&text);
    let findings = validate_object_geometry(&document.objects[0], None);
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.contains("repeated vertices: (1, 1, 2)"));
}

#[test]
fn test_elevation_heuristic() {
    let flat: Vec<(i64, f64, f64, f64)> =
        (1..=4).map(|id| (id, id as f64, 0.0, 0.0)).collect();
    let document = MeshDocument::parse(&surface("SRF_0001_001", &flat, &[(1, 2, 3)]));
    let findings = validate_object_geometry(&document.objects[0], None);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Warning);

    let document = MeshDocument::parse(&surface("SRF_0001_001", &tetra_vertices(), &[(1, 2, 3)]));
    assert!(validate_object_geometry(&document.objects[0], None).is_empty());
}

#[test]
fn test_empty_object_is_invalid_with_two_errors() {
    let document = MeshDocument::parse("GOCAD TSurf 1\nname:SRF_0001_001\nEND\n");
    let results = validate_document_geometry(&document, None);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].findings.len(), 2);
    assert!(results[0].findings.iter().all(|f| f.severity == Severity::Error));
    assert!(!results[0].is_valid());
}

#[test]
fn test_built_objects_located_through_line_map() {
    let text = "\
GOCAD TSurf 1
name:SRF_0001_001
TRGL 1 2 3
GOCAD TSurf 1
name:SRF_0001_002
TRGL 1 2 3
";
    let mut object = MeshObject::new("SRF_0001_002");
    for (id, x, y, z) in tetra_vertices() {
        object.vertices.push(Vertex::new(id, x, y, z));
    }
    object.triangles.push(Triangle::new(1, 2, 3));
    object.triangles.push(Triangle::new(2, 2, 3));

    let map = LineMap::from_text(text);
    let findings = validate_object_geometry(&object, Some(&map));
    assert_eq!(findings.len(), 1);
    // the tuple does not appear in the text
    assert_eq!(findings[0].line, None);

    object.triangles[1] = Triangle::new(1, 2, 2);
    object.triangles.push(Triangle::new(1, 2, 7));
    let findings = validate_object_geometry(&object, Some(&map));
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].message, "Triangle 2 references missing vertices: (1, 2, 7) - available vertices: 4");
    assert_eq!(findings[0].line, None);

    let mut located = object.clone();
    located.triangles = vec![Triangle::new(1, 2, 3), Triangle::new(1, 2, 3)];
    located.vertices.truncate(2);
    let findings = validate_object_geometry(&located, Some(&map));
    assert_eq!(findings.iter().filter(|f| f.line == Some(6)).count(), 2);
}
