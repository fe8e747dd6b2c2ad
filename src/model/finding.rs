//! Validation findings shared by every validator

use serde::Serialize;
use std::fmt;

/// Severity of a finding
///
/// Only errors make an object or file invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Structural defect; the subject is invalid
    Error,
    /// Suspicious but tolerated
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Which stage produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSource {
    /// File could not be read or a table could not be loaded
    File,
    /// Demoted records and skipped objects
    Parser,
    /// Section/keyword grammar
    Keywords,
    /// Referential integrity and degeneracy
    Geometry,
    /// Naming convention and table cross-reference
    Identifiers,
}

/// A single defect or suspicion found in a mesh file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFinding {
    /// Error or warning
    pub severity: Severity,
    /// Stage that raised the finding
    pub source: FindingSource,
    /// Object name (or identifier) the finding is about
    pub subject: Option<String>,
    /// Description of the problem
    pub message: String,
    /// 1-based line number, when it could be determined
    pub line: Option<usize>,
}

impl ValidationFinding {
    /// Create an error finding
    pub fn error(source: FindingSource, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            source,
            subject: None,
            message: message.into(),
            line: None,
        }
    }

    /// Create a warning finding
    pub fn warning(source: FindingSource, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(source, message)
        }
    }

    /// Set the subject
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the line number if known
    pub fn line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// True for error severity
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Message with its line annotation, without the subject
    ///
    /// Messages that already end with their annotation are left as they are.
    pub fn annotated_message(&self) -> String {
        match self.line {
            Some(line) => {
                let annotation = format!("(line {})", line);
                if self.message.ends_with(&annotation) {
                    self.message.clone()
                } else {
                    format!("{} {}", self.message, annotation)
                }
            }
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref subject) = self.subject {
            write!(f, "[{}] ", subject)?;
        }
        write!(f, "{}", self.annotated_message())
    }
}

/// Count errors in a list of findings
pub(crate) fn error_count(findings: &[ValidationFinding]) -> usize {
    findings.iter().filter(|f| f.is_error()).count()
}
