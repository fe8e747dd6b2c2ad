//! Validation of parsed GOCAD meshes
//!
//! Three independent validators contribute findings for a file:
//! - keywords: each line's leading keyword must be legal in its section
//! - geometry: primitives must reference existing vertices and must not repeat one
//! - identifiers: object names must follow the naming rule and match the table
//!
//! None of them fails. Problems are reported as [`ValidationFinding`]s and only
//! errors affect validity.
//!
//! [`ValidationFinding`]: crate::model::ValidationFinding

mod geometry;
mod identifiers;
mod keywords;

pub use geometry::{
    MIN_DISTINCT_ELEVATIONS, ObjectValidation, validate_document_geometry,
    validate_object_geometry,
};
pub use identifiers::{IdentifierCheck, NameCollector, NameOccurrence, check_identifiers};
pub use keywords::{KeywordReport, KeywordValidator, SectionState, validate_keywords};
