//! # gocad-qc
//!
//! Quality control for GOCAD ASCII (`.ts`) mesh exports.
//!
//! A mesh file is read in a single pass that parses its objects, validates
//! its section/keyword grammar and collects object names. Each object is then
//! checked for referential integrity and degenerate primitives, and names are
//! checked against a naming convention and an expected identifier table.
//! Problems never abort a file: they are reported as findings with line
//! numbers, and a batch run always yields a report.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Tolerant parsing of surfaces (`TSurf`) and solids (`TSolid`)
//! - Keyword vocabularies supplied as data, loadable from JSON
//! - Identifier tables read from CSV
//! - Text summary, detail report and JSON output
//!
//! ## Example
//!
//! ```no_run
//! use gocad_qc::{KeywordConfig, MeshFileSpec, ObjectClass, analyze_batch};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = KeywordConfig::default();
//! let specs = vec![
//!     MeshFileSpec::new("faults.ts")
//!         .with_class(ObjectClass::Fault)?
//!         .with_identifier_table("faults.csv"),
//! ];
//!
//! let batch = analyze_batch(&specs, &config);
//! println!("{}", batch.summary_table());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod error;
pub mod identifiers;
pub mod lines;
pub mod model;
pub mod parser;
pub mod report;
pub mod validator;
pub mod writer;

pub use analysis::{IdentifierSource, MeshFileSpec, analyze_batch, analyze_file, analyze_text};
pub use error::{Error, Result};
pub use identifiers::IdentifierSet;
pub use lines::LineMap;
pub use model::{
    FindingSource, KeywordConfig, MeshDocument, MeshObject, NamingRule, ObjectClass,
    PrimitiveKind, Severity, SpecialKeyword, SpecialRule, Tetrahedron, Triangle,
    ValidationFinding, Vertex, VertexId,
};
pub use report::{BatchReport, CrossReference, FileReport, ObjectReport, SummaryRow};

use std::path::Path;

impl MeshDocument {
    /// Read and parse a mesh file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gocad_qc::MeshDocument;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let document = MeshDocument::from_path("horizons.ts")?;
    /// for object in &document.objects {
    ///     println!("{}: {} vertices", object.name, object.vertices.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        parser::parse_file(path)
    }

    /// Parse mesh text
    pub fn parse(text: &str) -> Self {
        parser::parse_str(text)
    }

    /// Serialize back to GOCAD ASCII
    pub fn to_gocad_string(&self) -> String {
        writer::write_document(self)
    }
}
