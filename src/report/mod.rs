//! Per-file and per-batch QC reports
//!
//! Findings from the parser and the three validators are merged here into a
//! uniform structure: one [`FileReport`] per mesh file, each holding one
//! [`ObjectReport`] per parsed object, gathered into a [`BatchReport`].

mod render;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{FindingSource, MeshObject, Severity, ValidationFinding, error_count};

/// Outcome for one mesh object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectReport {
    /// Object name
    pub name: String,
    /// Number of vertices
    pub vertex_count: usize,
    /// Number of triangles
    pub triangle_count: usize,
    /// Number of tetrahedra
    pub tetrahedron_count: usize,
    /// True when no issue is an error
    pub valid: bool,
    /// Geometry findings for this object
    pub issues: Vec<ValidationFinding>,
}

impl ObjectReport {
    /// Summarize an object and its geometry findings
    pub fn new(object: &MeshObject, issues: Vec<ValidationFinding>) -> Self {
        Self {
            name: object.name.clone(),
            vertex_count: object.vertices.len(),
            triangle_count: object.triangles.len(),
            tetrahedron_count: object.tetrahedra.len(),
            valid: error_count(&issues) == 0,
            issues,
        }
    }
}

/// Result of comparing a file's identifiers with its table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CrossReference {
    /// No table was given for this file
    NotRequested,
    /// The found identifiers equal the table
    Matches,
    /// Identifiers differ from the table
    Mismatch {
        /// In the mesh but not the table
        missing_from_table: usize,
        /// In the table but not the mesh
        missing_from_mesh: usize,
    },
    /// The table could not be loaded
    CannotVerify {
        /// Why the table was unusable
        reason: String,
    },
}

/// Outcome for one mesh file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    /// File name shown in tables
    pub file: String,
    /// Path as given
    pub path: PathBuf,
    /// File-level errors: keywords, identifiers, unreadable input
    pub errors: Vec<ValidationFinding>,
    /// File-level warnings: parser diagnostics, special values, table-only ids
    pub warnings: Vec<ValidationFinding>,
    /// Distinct rejected keywords, in order of first appearance
    pub invalid_keywords: Vec<String>,
    /// True when keyword validation found no error
    pub keywords_valid: bool,
    /// Identifier table comparison
    pub cross_reference: CrossReference,
    /// Per-object outcomes in file order
    pub objects: Vec<ObjectReport>,
}

impl FileReport {
    /// Create an empty report for a path
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            file: display_name(path),
            path: path.to_path_buf(),
            errors: Vec::new(),
            warnings: Vec::new(),
            invalid_keywords: Vec::new(),
            keywords_valid: true,
            cross_reference: CrossReference::NotRequested,
            objects: Vec::new(),
        }
    }

    /// Report for a file that could not be analyzed at all
    pub fn failed(path: impl AsRef<Path>, error: &Error) -> Self {
        let mut report = Self::new(path);
        report.keywords_valid = false;
        report.push(ValidationFinding::error(FindingSource::File, error.to_string()));
        report
    }

    /// File a finding under errors or warnings
    pub fn push(&mut self, finding: ValidationFinding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
    }

    /// File several findings
    pub fn extend(&mut self, findings: impl IntoIterator<Item = ValidationFinding>) {
        for finding in findings {
            self.push(finding);
        }
    }

    /// True when no file-level error was found and every object is valid
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.objects.iter().all(|o| o.valid)
    }

    /// Number of valid objects
    pub fn valid_objects(&self) -> usize {
        self.objects.iter().filter(|o| o.valid).count()
    }

    /// Number of invalid objects
    pub fn invalid_objects(&self) -> usize {
        self.objects.len() - self.valid_objects()
    }

    /// Errors at file level and in every object
    pub fn total_errors(&self) -> usize {
        self.errors.len()
            + self
                .objects
                .iter()
                .map(|o| error_count(&o.issues))
                .sum::<usize>()
    }

    /// Warnings at file level and in every object
    pub fn total_warnings(&self) -> usize {
        self.warnings.len()
            + self
                .objects
                .iter()
                .map(|o| o.issues.len() - error_count(&o.issues))
                .sum::<usize>()
    }

    /// File-level findings from one stage, errors first
    pub fn findings_from(&self, source: FindingSource) -> impl Iterator<Item = &ValidationFinding> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(move |f| f.source == source)
    }
}

/// One row of the batch summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// File name
    pub file: String,
    /// Number of objects
    pub objects: usize,
    /// Number of valid objects
    pub valid: usize,
    /// Number of invalid objects
    pub invalid: usize,
    /// Keyword validity flag
    pub keywords_ok: bool,
    /// Distinct invalid keywords
    pub invalid_keywords: Vec<String>,
}

/// Reports for every file of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Per-file reports in input order
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file report
    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    /// True when every file is valid
    pub fn is_valid(&self) -> bool {
        self.files.iter().all(FileReport::is_valid)
    }

    /// Report for a file name or path
    pub fn file(&self, name: &str) -> Option<&FileReport> {
        self.files
            .iter()
            .find(|f| f.file == name || f.path == Path::new(name))
    }

    /// One summary row per file
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.files
            .iter()
            .map(|f| SummaryRow {
                file: f.file.clone(),
                objects: f.objects.len(),
                valid: f.valid_objects(),
                invalid: f.invalid_objects(),
                keywords_ok: f.keywords_valid,
                invalid_keywords: f.invalid_keywords.clone(),
            })
            .collect()
    }

    /// Fixed-width summary table with a totals row
    pub fn summary_table(&self) -> String {
        render::summary_table(&self.summary_rows())
    }

    /// Line-annotated detail report for every file
    pub fn detail_report(&self) -> String {
        render::detail_report(&self.files)
    }

    /// One cross-reference status line per file that had a table
    pub fn identifier_summary(&self) -> Vec<String> {
        self.files
            .iter()
            .filter_map(|f| render::cross_reference_line(&f.file, &f.cross_reference))
            .collect()
    }

    /// Serialize the batch as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vertex;

    fn object_report(name: &str, issues: Vec<ValidationFinding>) -> ObjectReport {
        let mut object = MeshObject::new(name);
        object.vertices.push(Vertex::new(1, 0.0, 0.0, 0.0));
        ObjectReport::new(&object, issues)
    }

    #[test]
    fn test_object_warnings_keep_validity() {
        let warning = ValidationFinding::warning(FindingSource::Geometry, "flat");
        let report = object_report("SRF_0001_001", vec![warning]);
        assert!(report.valid);
        assert_eq!(report.vertex_count, 1);
    }

    #[test]
    fn test_file_validity() {
        let mut report = FileReport::new("data/faults.ts");
        assert_eq!(report.file, "faults.ts");
        report.objects.push(object_report("FLT_0001_001", Vec::new()));
        report.push(ValidationFinding::warning(FindingSource::Identifiers, "table-only id"));
        assert!(report.is_valid());

        report.objects.push(object_report(
            "FLT_0001_002",
            vec![ValidationFinding::error(FindingSource::Geometry, "no primitives")],
        ));
        assert!(!report.is_valid());
        assert_eq!(report.valid_objects(), 1);
        assert_eq!(report.invalid_objects(), 1);
        assert_eq!(report.total_errors(), 1);
        assert_eq!(report.total_warnings(), 1);
    }

    #[test]
    fn test_failed_file() {
        let error = Error::FileNotFound(PathBuf::from("missing.ts"));
        let report = FileReport::failed("missing.ts", &error);
        assert!(!report.is_valid());
        assert!(!report.keywords_valid);
        assert!(report.errors[0].message.contains("[E1002]"));
    }

    #[test]
    fn test_batch_json() {
        let mut batch = BatchReport::new();
        let mut report = FileReport::new("units.ts");
        report.objects.push(object_report("UNT_0001_001", Vec::new()));
        report.cross_reference = CrossReference::Matches;
        batch.push(report);

        let json = batch.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["files"][0]["file"], "units.ts");
        assert_eq!(value["files"][0]["objects"][0]["valid"], true);
        assert_eq!(value["files"][0]["cross_reference"]["status"], "matches");
        assert!(batch.is_valid());
        assert!(batch.file("units.ts").is_some());
    }
}
