//! Line-number recovery for findings
//!
//! Records parsed from text carry their own line numbers. Objects built in
//! code, or findings whose record lost its position, are located after the
//! fact by searching the raw text. The search is best effort: duplicate id
//! tuples in different objects can match the wrong line, and a miss simply
//! leaves the finding without a line number.

use crate::model::{PrimitiveKind, VertexId};
use crate::parser::source_lines;

const NAME_PREFIX: &str = "name:";

/// Map from 1-based line number to trimmed line content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap {
    lines: Vec<String>,
}

impl LineMap {
    /// Build the map from file text
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: source_lines(text).map(|l| l.text.to_string()).collect(),
        }
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True for an empty file
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Content of a 1-based line
    pub fn get(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    fn numbered(&self, from: usize) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(from.saturating_sub(1))
            .map(|(i, l)| (i + 1, l.as_str()))
    }

    /// Line of the `name:` line introducing an object
    ///
    /// An exact name match wins; otherwise the first `name:` line whose value
    /// contains `name` is returned.
    pub fn find_object_line(&self, name: &str) -> Option<usize> {
        let names = || {
            self.numbered(1)
                .filter_map(|(n, l)| l.strip_prefix(NAME_PREFIX).map(|v| (n, v.trim())))
        };
        names()
            .find(|(_, value)| *value == name)
            .or_else(|| names().find(|(_, value)| value.contains(name)))
            .map(|(n, _)| n)
    }

    /// Line of a primitive record with the given vertex ids, searching from `start`
    pub fn find_primitive_line(
        &self,
        kind: PrimitiveKind,
        ids: &[VertexId],
        start: usize,
    ) -> Option<usize> {
        self.numbered(start)
            .find(|(_, text)| {
                let mut tokens = text.split_whitespace();
                if !tokens.next().is_some_and(|k| k.starts_with(kind.keyword())) {
                    return false;
                }
                let fields: Vec<&str> = tokens.take(ids.len()).collect();
                fields.len() == ids.len()
                    && fields
                        .iter()
                        .zip(ids)
                        .all(|(f, id)| f.parse::<VertexId>().is_ok_and(|v| v == *id))
            })
            .map(|(n, _)| n)
    }

    /// Line of a primitive inside the named object
    pub fn locate_primitive(
        &self,
        object_name: &str,
        kind: PrimitiveKind,
        ids: &[VertexId],
    ) -> Option<usize> {
        let start = self.find_object_line(object_name).unwrap_or(1);
        self.find_primitive_line(kind, ids, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "\
GOCAD TSurf 1
HEADER {
name:FLT_0001_001
}
TRGL 1 2 3
GOCAD TSurf 1
HEADER {
name:FLT_0001_002
}
TRGL 1 2 3
TETRA 4 5 6 7
";

    #[test]
    fn test_get() {
        let map = LineMap::from_text(TEXT);
        assert_eq!(map.len(), 11);
        assert_eq!(map.get(1), Some("GOCAD TSurf 1"));
        assert_eq!(map.get(0), None);
        assert_eq!(map.get(12), None);
    }

    #[test]
    fn test_find_object_line() {
        let map = LineMap::from_text(TEXT);
        assert_eq!(map.find_object_line("FLT_0001_001"), Some(3));
        assert_eq!(map.find_object_line("FLT_0001_002"), Some(8));
        assert_eq!(map.find_object_line("0001_002"), Some(8));
        assert_eq!(map.find_object_line("SRF_0001_001"), None);
    }

    #[test]
    fn test_primitive_search_starts_at_object() {
        let map = LineMap::from_text(TEXT);
        assert_eq!(map.find_primitive_line(PrimitiveKind::Triangle, &[1, 2, 3], 1), Some(5));
        assert_eq!(
            map.locate_primitive("FLT_0001_002", PrimitiveKind::Triangle, &[1, 2, 3]),
            Some(10)
        );
        assert_eq!(
            map.locate_primitive("FLT_0001_002", PrimitiveKind::Tetrahedron, &[4, 5, 6, 7]),
            Some(11)
        );
    }

    #[test]
    fn test_primitive_not_found() {
        let map = LineMap::from_text(TEXT);
        assert_eq!(map.find_primitive_line(PrimitiveKind::Triangle, &[3, 2, 1], 1), None);
        assert_eq!(map.find_primitive_line(PrimitiveKind::Triangle, &[1, 2, 3], 11), None);
    }
}
