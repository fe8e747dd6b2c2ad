//! Expected object identifiers supplied by attribute tables

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Set of identifiers an export bundle is expected to contain
///
/// Read-only once built; shared across analyses by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    ids: BTreeSet<String>,
}

impl IdentifierSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Read column 0 of a CSV table
    ///
    /// The first row is treated as a header. Values are trimmed and blank
    /// cells skipped; rows may have any number of columns.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut ids = BTreeSet::new();
        for record in csv_reader.records() {
            let record = record?;
            if let Some(value) = record.get(0).map(str::trim) {
                if !value.is_empty() {
                    ids.insert(value.to_string());
                }
            }
        }

        Ok(Self { ids })
    }

    /// Read column 0 of a CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::IdentifierTable(format!(
                "table {} not found",
                path.display()
            )));
        }
        let set = Self::from_csv_reader(File::open(path)?)?;
        debug!("Loaded {} identifier(s) from {}", set.len(), path.display());
        Ok(set)
    }

    /// Number of identifiers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when the table held no identifier
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Membership test
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Identifiers in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
