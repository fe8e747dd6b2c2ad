//! Object naming and table cross-reference checks
//!
//! Names are collected from the raw `name:` lines, independently of the
//! object builder, so a name attached to an unnamed-then-skipped object or a
//! repeated `name:` line is still seen here.

use std::collections::{BTreeMap, BTreeSet};

use crate::identifiers::IdentifierSet;
use crate::model::{FindingSource, NamingRule, ValidationFinding};
use crate::parser::{LineSink, SourceLine};

const NAME_PREFIX: &str = "name:";

/// A `name:` value and the line it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameOccurrence {
    /// Trimmed value after `name:`
    pub name: String,
    /// 1-based line
    pub line: usize,
}

/// Line sink collecting every `name:` value
#[derive(Debug, Default)]
pub struct NameCollector {
    names: Vec<NameOccurrence>,
}

impl NameCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected names in file order
    pub fn finish(self) -> Vec<NameOccurrence> {
        self.names
    }
}

impl LineSink for NameCollector {
    fn accept(&mut self, line: &SourceLine<'_>) {
        if let Some(value) = line.text.strip_prefix(NAME_PREFIX) {
            self.names.push(NameOccurrence {
                name: value.trim().to_string(),
                line: line.number,
            });
        }
    }
}

/// Outcome of the identifier checks for one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierCheck {
    /// Well-formed identifiers found in the file
    pub found: BTreeSet<String>,
    /// Naming, uniqueness and cross-reference findings
    pub findings: Vec<ValidationFinding>,
    /// Whether the found set equals the table, when a table was given
    pub matches_table: Option<bool>,
}

impl IdentifierCheck {
    /// True when no error was found
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(ValidationFinding::is_error)
    }
}

/// Check names against a naming rule and an identifier table
///
/// - a name breaking `rule` is an error and is left out of the found set;
/// - an identifier appearing more than once is an error naming it;
/// - an identifier in the file but not the table is an error;
/// - an identifier in the table but not the file is a warning.
///
/// Without a rule every name counts as well-formed; without a table the
/// cross-reference is skipped.
pub fn check_identifiers(
    names: &[NameOccurrence],
    rule: Option<&NamingRule>,
    table: Option<&IdentifierSet>,
) -> IdentifierCheck {
    let mut check = IdentifierCheck::default();
    let mut occurrences: BTreeMap<&str, Vec<usize>> = BTreeMap::new();

    for occurrence in names {
        if let Some(rule) = rule {
            if !rule.matches(&occurrence.name) {
                check.findings.push(
                    ValidationFinding::error(
                        FindingSource::Identifiers,
                        format!(
                            "invalid id format '{}', expected {}",
                            occurrence.name,
                            rule.expected_format()
                        ),
                    )
                    .subject(occurrence.name.as_str())
                    .line(Some(occurrence.line)),
                );
                continue;
            }
        }
        occurrences
            .entry(occurrence.name.as_str())
            .or_default()
            .push(occurrence.line);
    }

    check.found = occurrences.keys().map(|k| k.to_string()).collect();

    for (name, lines) in &occurrences {
        if lines.len() > 1 {
            check.findings.push(
                ValidationFinding::error(
                    FindingSource::Identifiers,
                    format!("non-unique id '{}' appears {} times", name, lines.len()),
                )
                .subject(*name)
                .line(lines.get(1).copied()),
            );
        }
    }

    if let Some(table) = table {
        for (name, lines) in &occurrences {
            if !table.contains(name) {
                check.findings.push(
                    ValidationFinding::error(
                        FindingSource::Identifiers,
                        format!("id '{}' present in mesh but missing from table", name),
                    )
                    .subject(*name)
                    .line(lines.first().copied()),
                );
            }
        }
        for id in table.iter().filter(|id| !check.found.contains(*id)) {
            check.findings.push(
                ValidationFinding::warning(
                    FindingSource::Identifiers,
                    format!("id '{}' present in table but missing from mesh", id),
                )
                .subject(id),
            );
        }
        check.matches_table =
            Some(check.found.len() == table.len() && table.iter().all(|id| check.found.contains(id)));
    }

    check
}
