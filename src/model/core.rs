//! Core GOCAD mesh types

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::PathBuf;

use super::finding::ValidationFinding;

/// Vertex identifier as written in the file
///
/// Ids are neither required to start at zero nor to be contiguous.
pub type VertexId = i64;

/// A vertex record (`VRTX` / `PVRTX`)
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Id used by primitives to reference this vertex
    pub id: VertexId,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate (elevation)
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(id: VertexId, x: f64, y: f64, z: f64) -> Self {
        Self { id, x, y, z }
    }
}

/// A triangle (`TRGL`) referencing three vertex ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triangle {
    /// First vertex id
    pub v1: VertexId,
    /// Second vertex id
    pub v2: VertexId,
    /// Third vertex id
    pub v3: VertexId,
    /// 1-based source line, when parsed from text
    pub line: Option<usize>,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v1: VertexId, v2: VertexId, v3: VertexId) -> Self {
        Self {
            v1,
            v2,
            v3,
            line: None,
        }
    }

    /// Attach the source line the record was read from
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Vertex ids in file order
    pub fn ids(&self) -> [VertexId; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// True when two of the vertex ids are equal
    pub fn is_degenerate(&self) -> bool {
        self.v1 == self.v2 || self.v1 == self.v3 || self.v2 == self.v3
    }
}

/// A tetrahedron (`TETRA`) referencing four vertex ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetrahedron {
    /// First vertex id
    pub v1: VertexId,
    /// Second vertex id
    pub v2: VertexId,
    /// Third vertex id
    pub v3: VertexId,
    /// Fourth vertex id
    pub v4: VertexId,
    /// 1-based source line, when parsed from text
    pub line: Option<usize>,
}

impl Tetrahedron {
    /// Create a new tetrahedron
    pub fn new(v1: VertexId, v2: VertexId, v3: VertexId, v4: VertexId) -> Self {
        Self {
            v1,
            v2,
            v3,
            v4,
            line: None,
        }
    }

    /// Attach the source line the record was read from
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Vertex ids in file order
    pub fn ids(&self) -> [VertexId; 4] {
        [self.v1, self.v2, self.v3, self.v4]
    }

    /// True when any two of the four vertex ids are equal
    pub fn is_degenerate(&self) -> bool {
        let ids = self.ids();
        (0..4).any(|i| (i + 1..4).any(|j| ids[i] == ids[j]))
    }
}

/// Kind of connectivity primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `TRGL` record
    Triangle,
    /// `TETRA` record
    Tetrahedron,
}

impl PrimitiveKind {
    /// Keyword introducing records of this kind
    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::Triangle => "TRGL",
            PrimitiveKind::Tetrahedron => "TETRA",
        }
    }

    /// Human-readable name used in findings
    pub fn label(&self) -> &'static str {
        match self {
            PrimitiveKind::Triangle => "Triangle",
            PrimitiveKind::Tetrahedron => "Tetrahedron",
        }
    }
}

/// Object type token of a solid
pub const SOLID_TYPE: &str = "TSolid";
/// Object type token of a triangulated surface
pub const SURFACE_TYPE: &str = "TSurf";

/// One named surface or solid parsed from a mesh file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshObject {
    /// Object identifier from the `name:` line
    pub name: String,
    /// 1-based line of the `name:` line, when parsed from text
    pub line: Option<usize>,
    /// Type token of the opening line (`TSurf`, `TSolid`), when parsed from text
    pub object_type: Option<String>,
    /// Header and metadata lines kept verbatim, including parser warnings
    pub header_lines: Vec<String>,
    /// Vertex records in file order
    pub vertices: Vec<Vertex>,
    /// Triangle records in file order
    pub triangles: Vec<Triangle>,
    /// Tetrahedron records in file order
    pub tetrahedra: Vec<Tetrahedron>,
    /// Extra numeric attributes trailing a vertex record, keyed by vertex id
    pub vertex_properties: BTreeMap<VertexId, Vec<f64>>,
    /// Names declared on `PROPERTY` lines
    pub property_names: BTreeSet<String>,
}

impl MeshObject {
    /// Create an empty object with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set of vertex ids present in this object
    pub fn vertex_ids(&self) -> HashSet<VertexId> {
        self.vertices.iter().map(|v| v.id).collect()
    }

    /// True for a `TSolid`: declared so on its opening line, or carrying tetrahedra
    pub fn is_solid(&self) -> bool {
        self.object_type.as_deref() == Some(SOLID_TYPE) || !self.tetrahedra.is_empty()
    }

    /// Parser warnings archived in the header
    pub fn parse_warnings(&self) -> impl Iterator<Item = &str> {
        self.header_lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.starts_with(super::PARSE_WARNING_PREFIX))
    }
}

/// All objects parsed from one mesh file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshDocument {
    /// File the document was read from
    pub path: Option<PathBuf>,
    /// Objects in file order
    pub objects: Vec<MeshObject>,
    /// Parser diagnostics: demoted records and skipped unnamed objects
    pub diagnostics: Vec<ValidationFinding>,
}

impl MeshDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the file held no named object
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Find an object by name
    pub fn object(&self, name: &str) -> Option<&MeshObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Object names in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|o| o.name.as_str())
    }
}
