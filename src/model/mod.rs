//! Data structures for GOCAD mesh analysis

mod config;
mod core;
mod finding;

pub use config::{KeywordConfig, NamingRule, ObjectClass, SpecialKeyword, SpecialRule};
pub use core::{
    MeshDocument, MeshObject, PrimitiveKind, SOLID_TYPE, SURFACE_TYPE, Tetrahedron, Triangle,
    Vertex, VertexId,
};
pub use finding::{FindingSource, Severity, ValidationFinding};

pub(crate) use finding::error_count;

/// Prefix of parser warnings archived in an object's header lines
pub const PARSE_WARNING_PREFIX: &str = "WARNING:";
