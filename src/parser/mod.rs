//! GOCAD ASCII parsing
//!
//! Parsing is a single pass over the file's lines. Each line is trimmed and
//! numbered once, then handed to every [`LineSink`] taking part in the pass.
//! The object builder in this module is one such sink; the keyword validator
//! and the identifier name collector are others, so a file is read exactly
//! once however many checks run over it.

mod core;

pub use self::core::DocumentBuilder;

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::MeshDocument;

/// One trimmed line of a mesh file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number
    pub number: usize,
    /// Line content without surrounding whitespace
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    /// Leading whitespace-separated token, if any
    pub fn keyword(&self) -> Option<&'a str> {
        self.text.split_whitespace().next()
    }

    /// True for blank lines
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Consumer of numbered lines during a scan
pub trait LineSink {
    /// Handle the next line of the file
    fn accept(&mut self, line: &SourceLine<'_>);
}

/// Split text into numbered, trimmed lines
pub fn source_lines(text: &str) -> impl Iterator<Item = SourceLine<'_>> {
    text.lines().enumerate().map(|(i, raw)| SourceLine {
        number: i + 1,
        text: raw.trim(),
    })
}

/// Feed every line of `text` to each sink, in order
pub fn scan(text: &str, sinks: &mut [&mut dyn LineSink]) {
    for line in source_lines(text) {
        for sink in sinks.iter_mut() {
            sink.accept(&line);
        }
    }
}

/// Parse mesh text into a document
///
/// Never fails: malformed records become header warnings and document
/// diagnostics.
pub fn parse_str(text: &str) -> MeshDocument {
    let mut builder = DocumentBuilder::new();
    scan(text, &mut [&mut builder]);
    builder.finish(None)
}

/// Read and parse a mesh file
///
/// Fails with [`Error::FileNotFound`] before any parsing when the path does
/// not exist.
pub fn parse_file(path: impl AsRef<Path>) -> Result<MeshDocument> {
    let path = path.as_ref();
    let text = read_mesh_file(path)?;
    let mut builder = DocumentBuilder::new();
    scan(&text, &mut [&mut builder]);
    Ok(builder.finish(Some(path.to_path_buf())))
}

/// Read a mesh file to a string
pub fn read_mesh_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    debug!("Reading mesh file {}", path.display());
    Ok(fs::read_to_string(path)?)
}
