//! Geometric integrity checks for parsed mesh objects
//!
//! All checks run on every object; none short-circuits the others. Only
//! errors affect validity. The elevation-diversity check is a heuristic and
//! only ever warns.

use std::collections::HashSet;

use crate::lines::LineMap;
use crate::model::{
    FindingSource, MeshDocument, MeshObject, PrimitiveKind, ValidationFinding, VertexId,
};

/// Objects with fewer distinct z values than this are flagged as suspicious
pub const MIN_DISTINCT_ELEVATIONS: usize = 4;

/// Geometry findings for one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectValidation {
    /// Object name
    pub name: String,
    /// Findings in check order
    pub findings: Vec<ValidationFinding>,
}

impl ObjectValidation {
    /// True when no error was found
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(ValidationFinding::is_error)
    }
}

/// Validate the geometry of one object
///
/// Primitive line numbers come from the records themselves; when a record has
/// none and a [`LineMap`] is supplied, the line is recovered from the text.
pub fn validate_object_geometry(
    object: &MeshObject,
    line_map: Option<&LineMap>,
) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();
    let object_line = object
        .line
        .or_else(|| line_map.and_then(|m| m.find_object_line(&object.name)));

    let error = |message: String, line: Option<usize>| {
        ValidationFinding::error(FindingSource::Geometry, message)
            .subject(object.name.as_str())
            .line(line)
    };

    let locate = |kind: PrimitiveKind, ids: &[VertexId], recorded: Option<usize>| {
        recorded.or_else(|| {
            line_map.and_then(|m| m.find_primitive_line(kind, ids, object_line.unwrap_or(1)))
        })
    };

    if object.vertices.is_empty() {
        findings.push(error("no vertices defined".to_string(), object_line));
    }

    if object.triangles.is_empty() && object.tetrahedra.is_empty() {
        findings.push(error(
            "no primitives defined (no triangles or tetrahedra)".to_string(),
            object_line,
        ));
    }

    let vertex_ids = object.vertex_ids();

    for (i, triangle) in object.triangles.iter().enumerate() {
        let ids = triangle.ids();
        if !ids.iter().all(|id| vertex_ids.contains(id)) {
            findings.push(error(
                format!(
                    "{} {} references missing vertices: {} - available vertices: {}",
                    PrimitiveKind::Triangle.label(),
                    i,
                    format_ids(&ids),
                    vertex_ids.len()
                ),
                locate(PrimitiveKind::Triangle, &ids, triangle.line),
            ));
        }
    }

    for (i, tetrahedron) in object.tetrahedra.iter().enumerate() {
        let ids = tetrahedron.ids();
        if !ids.iter().all(|id| vertex_ids.contains(id)) {
            findings.push(error(
                format!(
                    "{} {} references missing vertices: {}",
                    PrimitiveKind::Tetrahedron.label(),
                    i,
                    format_ids(&ids)
                ),
                locate(PrimitiveKind::Tetrahedron, &ids, tetrahedron.line),
            ));
        }
    }

    for (i, triangle) in object.triangles.iter().enumerate() {
        if triangle.is_degenerate() {
            let ids = triangle.ids();
            findings.push(error(
                format!(
                    "{} {} has repeated vertices: {}",
                    PrimitiveKind::Triangle.label(),
                    i,
                    format_ids(&ids)
                ),
                locate(PrimitiveKind::Triangle, &ids, triangle.line),
            ));
        }
    }

    for (i, tetrahedron) in object.tetrahedra.iter().enumerate() {
        if tetrahedron.is_degenerate() {
            let ids = tetrahedron.ids();
            findings.push(error(
                format!(
                    "{} {} has repeated vertices: {}",
                    PrimitiveKind::Tetrahedron.label(),
                    i,
                    format_ids(&ids)
                ),
                locate(PrimitiveKind::Tetrahedron, &ids, tetrahedron.line),
            ));
        }
    }

    if !object.vertices.is_empty() {
        let elevations = distinct_elevations(object);
        if elevations < MIN_DISTINCT_ELEVATIONS {
            findings.push(
                ValidationFinding::warning(
                    FindingSource::Geometry,
                    format!(
                        "geometry might not be valid: only {} distinct elevation value(s), expected at least {}",
                        elevations, MIN_DISTINCT_ELEVATIONS
                    ),
                )
                .subject(object.name.as_str())
                .line(object_line),
            );
        }
    }

    findings
}

/// Validate every object of a document
pub fn validate_document_geometry(
    document: &MeshDocument,
    line_map: Option<&LineMap>,
) -> Vec<ObjectValidation> {
    document
        .objects
        .iter()
        .map(|object| ObjectValidation {
            name: object.name.clone(),
            findings: validate_object_geometry(object, line_map),
        })
        .collect()
}

fn distinct_elevations(object: &MeshObject) -> usize {
    object
        .vertices
        .iter()
        .map(|v| if v.z == 0.0 { 0.0f64.to_bits() } else { v.z.to_bits() })
        .collect::<HashSet<u64>>()
        .len()
}

/// Format an id tuple as `(a, b, c)`
fn format_ids(ids: &[VertexId]) -> String {
    let inner: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("({})", inner.join(", "))
}
