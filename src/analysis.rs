//! Per-file and batch QC runs
//!
//! A file is read once. The object builder, the keyword validator and the
//! name collector consume the same scan; geometry and identifier checks then
//! run on what they collected, and every finding lands in a [`FileReport`].

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::identifiers::IdentifierSet;
use crate::lines::LineMap;
use crate::model::{
    FindingSource, KeywordConfig, MeshDocument, NamingRule, ObjectClass, ValidationFinding,
};
use crate::parser::{DocumentBuilder, read_mesh_file, scan};
use crate::report::{BatchReport, CrossReference, FileReport, ObjectReport};
use crate::validator::{
    IdentifierCheck, KeywordValidator, NameCollector, check_identifiers,
    validate_document_geometry,
};

/// Where a file's expected identifiers come from
#[derive(Debug, Clone, Default)]
pub enum IdentifierSource {
    /// No cross-reference
    #[default]
    None,
    /// Identifiers already in memory
    Set(IdentifierSet),
    /// CSV table read before analysis, column 0
    CsvTable(PathBuf),
}

/// One mesh file of a batch and the rules it is checked against
#[derive(Debug, Clone)]
pub struct MeshFileSpec {
    /// Mesh file path
    pub path: PathBuf,
    /// Naming rule for object names, if any
    pub naming: Option<NamingRule>,
    /// Expected identifiers
    pub identifiers: IdentifierSource,
}

impl MeshFileSpec {
    /// A file checked for keywords and geometry only
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            naming: None,
            identifiers: IdentifierSource::None,
        }
    }

    /// Require names of the form `PREFIX_NNNN_NNN`
    pub fn with_prefix(mut self, prefix: &str) -> Result<Self> {
        self.naming = Some(NamingRule::new(prefix)?);
        Ok(self)
    }

    /// Use the naming rule of an object class
    pub fn with_class(mut self, class: ObjectClass) -> Result<Self> {
        self.naming = class.naming_rule()?;
        Ok(self)
    }

    /// Use an already built naming rule
    pub fn with_naming_rule(mut self, rule: NamingRule) -> Self {
        self.naming = Some(rule);
        self
    }

    /// Cross-reference against identifiers in memory
    pub fn with_identifiers(mut self, identifiers: IdentifierSet) -> Self {
        self.identifiers = IdentifierSource::Set(identifiers);
        self
    }

    /// Cross-reference against column 0 of a CSV table
    pub fn with_identifier_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.identifiers = IdentifierSource::CsvTable(path.into());
        self
    }
}

/// Identifier table as available at analysis time
#[derive(Debug)]
enum LoadedTable<'a> {
    Absent,
    Borrowed(&'a IdentifierSet),
    Owned(IdentifierSet),
    Unavailable(String),
}

impl LoadedTable<'_> {
    fn get(&self) -> Option<&IdentifierSet> {
        match self {
            LoadedTable::Borrowed(set) => Some(*set),
            LoadedTable::Owned(set) => Some(set),
            LoadedTable::Absent | LoadedTable::Unavailable(_) => None,
        }
    }
}

fn load_table(source: &IdentifierSource) -> LoadedTable<'_> {
    match source {
        IdentifierSource::None => LoadedTable::Absent,
        IdentifierSource::Set(set) => LoadedTable::Borrowed(set),
        IdentifierSource::CsvTable(path) => match IdentifierSet::from_csv_path(path) {
            Ok(set) => LoadedTable::Owned(set),
            Err(e) => {
                warn!("Cannot load identifier table {}: {}", path.display(), e);
                LoadedTable::Unavailable(e.to_string())
            }
        },
    }
}

/// Analyze mesh text already in memory
///
/// Identifier checks run when a naming rule or a table is given.
pub fn analyze_text(
    text: &str,
    path: &Path,
    config: &KeywordConfig,
    naming: Option<&NamingRule>,
    table: Option<&IdentifierSet>,
) -> FileReport {
    let mut builder = DocumentBuilder::new();
    let mut keywords = KeywordValidator::new(config);
    let mut names = NameCollector::new();
    scan(text, &mut [&mut builder, &mut keywords, &mut names]);

    let document = builder.finish(Some(path.to_path_buf()));
    let keyword_report = keywords.finish();
    let names = names.finish();

    let mut report = FileReport::new(path);
    report.extend(document.diagnostics.iter().cloned());
    report.keywords_valid = keyword_report.is_valid();
    report.invalid_keywords = keyword_report.invalid_keywords;
    report.extend(keyword_report.findings);

    let line_map = needs_line_map(&document).then(|| LineMap::from_text(text));
    let validations = validate_document_geometry(&document, line_map.as_ref());
    report.objects = document
        .objects
        .iter()
        .zip(validations)
        .map(|(object, validation)| ObjectReport::new(object, validation.findings))
        .collect();

    if naming.is_some() || table.is_some() {
        let check = check_identifiers(&names, naming, table);
        if let Some(table) = table {
            report.cross_reference = cross_reference(&check, table);
        }
        report.extend(check.findings);
    }

    info!(
        "{}: {} object(s), {} error(s), {} warning(s), {}",
        report.file,
        report.objects.len(),
        report.total_errors(),
        report.total_warnings(),
        if report.is_valid() { "valid" } else { "INVALID" }
    );
    report
}

/// Analyze one file
///
/// Fails only when the mesh file cannot be read. An identifier table that
/// cannot be loaded skips the cross-reference with a warning.
pub fn analyze_file(spec: &MeshFileSpec, config: &KeywordConfig) -> Result<FileReport> {
    let table = load_table(&spec.identifiers);
    analyze_with_table(spec, &table, config)
}

fn analyze_with_table(
    spec: &MeshFileSpec,
    table: &LoadedTable<'_>,
    config: &KeywordConfig,
) -> Result<FileReport> {
    let text = read_mesh_file(&spec.path)?;
    let mut report = analyze_text(&text, &spec.path, config, spec.naming.as_ref(), table.get());

    if let LoadedTable::Unavailable(reason) = table {
        report.push(ValidationFinding::warning(
            FindingSource::File,
            format!("cannot verify against table: {}", reason),
        ));
        report.cross_reference = CrossReference::CannotVerify {
            reason: reason.clone(),
        };
    }
    Ok(report)
}

/// Analyze every file of a batch
///
/// Identifier tables are loaded before any mesh is read. A file that cannot
/// be read becomes a failed report and the batch goes on.
pub fn analyze_batch(specs: &[MeshFileSpec], config: &KeywordConfig) -> BatchReport {
    let tables: Vec<LoadedTable<'_>> = specs.iter().map(|s| load_table(&s.identifiers)).collect();

    let mut batch = BatchReport::new();
    for (spec, table) in specs.iter().zip(&tables) {
        debug!("Analyzing {}", spec.path.display());
        let report = match analyze_with_table(spec, table, config) {
            Ok(report) => report,
            Err(e) => {
                warn!("Skipping {}: {}", spec.path.display(), e);
                FileReport::failed(&spec.path, &e)
            }
        };
        batch.push(report);
    }

    let valid = batch.files.iter().filter(|f| f.is_valid()).count();
    info!("Analyzed {} file(s), {} valid", batch.files.len(), valid);
    batch
}

fn needs_line_map(document: &MeshDocument) -> bool {
    document.objects.iter().any(|o| {
        o.line.is_none()
            || o.triangles.iter().any(|t| t.line.is_none())
            || o.tetrahedra.iter().any(|t| t.line.is_none())
    })
}

fn cross_reference(check: &IdentifierCheck, table: &IdentifierSet) -> CrossReference {
    match check.matches_table {
        Some(true) => CrossReference::Matches,
        _ => CrossReference::Mismatch {
            missing_from_table: check.found.iter().filter(|id| !table.contains(id)).count(),
            missing_from_mesh: table.iter().filter(|id| !check.found.contains(*id)).count(),
        },
    }
}
