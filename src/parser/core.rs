//! Object builder for GOCAD ASCII records
//!
//! Keeps one object under construction. An object-open line (`GOCAD <type> 1`)
//! seals the current object and starts a new one; end of input seals the
//! last. Only named objects are emitted.

use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::*;

use super::{LineSink, SourceLine};

/// Marker opening a new object
const OBJECT_OPEN: &str = "GOCAD ";
/// Marker carrying the object name
const NAME_PREFIX: &str = "name:";
/// Vertex record keywords
const VERTEX_KEYWORDS: [&str; 2] = ["VRTX", "PVRTX"];
/// Property declaration keyword
const PROPERTY_KEYWORD: &str = "PROPERTY";
/// Lines archived verbatim into the header
const ARCHIVED_PREFIXES: [&str; 7] = [
    "HEADER",
    "GEOLOGICAL",
    "STRATIGRAPHIC",
    "PROPERTY",
    "SOLID",
    "*",
    "END",
];

/// Accumulator for the object currently being read
#[derive(Debug, Default)]
struct ObjectBuilder {
    object: MeshObject,
    named: bool,
    start_line: Option<usize>,
    warnings: Vec<(usize, String)>,
}

impl ObjectBuilder {
    fn opened_at(line: &SourceLine<'_>) -> Self {
        let mut builder = Self {
            start_line: Some(line.number),
            ..Self::default()
        };
        builder.object.object_type = line.text.split_whitespace().nth(1).map(str::to_string);
        builder.object.header_lines.push(line.text.to_string());
        builder
    }

    fn touch(&mut self, line: usize) {
        self.start_line.get_or_insert(line);
    }

    fn set_name(&mut self, line: &SourceLine<'_>, name: &str) {
        self.touch(line.number);
        self.object.header_lines.push(line.text.to_string());

        if name.is_empty() {
            self.warn(line, "empty object name".to_string());
        } else if self.named {
            self.warn(
                line,
                format!(
                    "second name '{}' ignored, object is already named '{}'",
                    name, self.object.name
                ),
            );
        } else {
            self.object.name = name.to_string();
            self.object.line = Some(line.number);
            self.named = true;
        }
    }

    fn add_vertex(&mut self, line: &SourceLine<'_>, fields: &[&str]) {
        self.touch(line.number);
        match parse_vertex(fields) {
            Ok((vertex, properties)) => {
                if !properties.is_empty() {
                    self.object.vertex_properties.insert(vertex.id, properties);
                }
                self.object.vertices.push(vertex);
            }
            Err(e) => self.warn(line, format!("malformed vertex '{}': {}", line.text, e)),
        }
    }

    fn add_triangle(&mut self, line: &SourceLine<'_>, fields: &[&str]) {
        self.touch(line.number);
        match parse_indices::<3>(fields, "triangle") {
            Ok([v1, v2, v3]) => self
                .object
                .triangles
                .push(Triangle::new(v1, v2, v3).at_line(line.number)),
            Err(e) => self.warn(line, format!("malformed triangle '{}': {}", line.text, e)),
        }
    }

    fn add_tetrahedron(&mut self, line: &SourceLine<'_>, fields: &[&str]) {
        self.touch(line.number);
        match parse_indices::<4>(fields, "tetrahedron") {
            Ok([v1, v2, v3, v4]) => self
                .object
                .tetrahedra
                .push(Tetrahedron::new(v1, v2, v3, v4).at_line(line.number)),
            Err(e) => self.warn(line, format!("malformed tetrahedron '{}': {}", line.text, e)),
        }
    }

    fn archive(&mut self, line: &SourceLine<'_>) {
        self.touch(line.number);
        self.object.header_lines.push(line.text.to_string());

        let mut tokens = line.text.split_whitespace();
        if tokens.next() == Some(PROPERTY_KEYWORD) {
            if let Some(name) = tokens.next() {
                self.object.property_names.insert(name.to_string());
            }
        }
    }

    fn warn(&mut self, line: &SourceLine<'_>, message: String) {
        debug!("Line {}: {}", line.number, message);
        self.object.header_lines.push(format!(
            "{} line {}: {}",
            PARSE_WARNING_PREFIX, line.number, message
        ));
        self.warnings.push((line.number, message));
    }

    fn is_untouched(&self) -> bool {
        self.start_line.is_none()
    }
}

/// Builds a [`MeshDocument`] from scanned lines
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    current: ObjectBuilder,
    objects: Vec<MeshObject>,
    diagnostics: Vec<ValidationFinding>,
}

impl DocumentBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Seal the object under construction and return the document
    pub fn finish(mut self, path: Option<PathBuf>) -> MeshDocument {
        self.seal();
        debug!(
            "Parsed {} object(s) with {} diagnostic(s)",
            self.objects.len(),
            self.diagnostics.len()
        );
        MeshDocument {
            path,
            objects: self.objects,
            diagnostics: self.diagnostics,
        }
    }

    fn seal(&mut self) {
        let builder = std::mem::take(&mut self.current);
        if builder.is_untouched() {
            return;
        }

        let subject = builder.named.then(|| builder.object.name.clone());
        for (line, message) in builder.warnings {
            let mut finding =
                ValidationFinding::warning(FindingSource::Parser, message).line(Some(line));
            finding.subject = subject.clone();
            self.diagnostics.push(finding);
        }

        if builder.named {
            let object = builder.object;
            debug!(
                "Sealed object '{}': {} vertices, {} triangles, {} tetrahedra",
                object.name,
                object.vertices.len(),
                object.triangles.len(),
                object.tetrahedra.len()
            );
            self.objects.push(object);
        } else {
            warn!(
                "Object starting at line {:?} has no name and was skipped",
                builder.start_line
            );
            self.diagnostics.push(
                ValidationFinding::warning(
                    FindingSource::Parser,
                    "object has no name: skipped",
                )
                .line(builder.start_line),
            );
        }
    }
}

impl LineSink for DocumentBuilder {
    fn accept(&mut self, line: &SourceLine<'_>) {
        let text = line.text;
        if text.is_empty() {
            return;
        }

        if text.starts_with(OBJECT_OPEN) {
            self.seal();
            self.current = ObjectBuilder::opened_at(line);
        } else if let Some(name) = text.strip_prefix(NAME_PREFIX) {
            self.current.set_name(line, name.trim());
        } else if VERTEX_KEYWORDS.iter().any(|k| text.starts_with(k)) {
            let fields: Vec<&str> = text.split_whitespace().skip(1).collect();
            self.current.add_vertex(line, &fields);
        } else if text.starts_with(PrimitiveKind::Triangle.keyword()) {
            let fields: Vec<&str> = text.split_whitespace().skip(1).collect();
            self.current.add_triangle(line, &fields);
        } else if text.starts_with(PrimitiveKind::Tetrahedron.keyword()) {
            let fields: Vec<&str> = text.split_whitespace().skip(1).collect();
            self.current.add_tetrahedron(line, &fields);
        } else if ARCHIVED_PREFIXES.iter().any(|p| text.starts_with(p)) {
            self.current.archive(line);
        }
    }
}

/// Parse `id x y z [extra...]`; any failure rejects the whole record
fn parse_vertex(fields: &[&str]) -> Result<(Vertex, Vec<f64>)> {
    if fields.len() < 4 {
        return Err(Error::ParseError(format!(
            "expected id x y z, found {} field(s)",
            fields.len()
        )));
    }

    let id = fields[0]
        .parse::<VertexId>()
        .map_err(|_| Error::parse_error_with_context("vertex id", fields[0], "integer"))?;
    let x = parse_coordinate(fields[1], "vertex x")?;
    let y = parse_coordinate(fields[2], "vertex y")?;
    let z = parse_coordinate(fields[3], "vertex z")?;
    let properties = fields[4..]
        .iter()
        .map(|p| parse_coordinate(p, "vertex property"))
        .collect::<Result<Vec<f64>>>()?;

    Ok((Vertex::new(id, x, y, z), properties))
}

fn parse_coordinate(value: &str, field_name: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| Error::parse_error_with_context(field_name, value, "floating-point number"))
}

/// Parse the first `N` vertex ids of a primitive record
fn parse_indices<const N: usize>(fields: &[&str], kind: &str) -> Result<[VertexId; N]> {
    if fields.len() < N {
        return Err(Error::ParseError(format!(
            "{} needs {} vertex ids, found {}",
            kind,
            N,
            fields.len()
        )));
    }

    let mut ids = [0; N];
    for (slot, field) in ids.iter_mut().zip(fields) {
        *slot = field
            .parse::<VertexId>()
            .map_err(|_| Error::parse_error_with_context("vertex index", field, "integer"))?;
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::super::parse_str;
    use super::*;

    const TWO_OBJECTS: &str = "\
GOCAD TSurf 1
HEADER {
name:FLT_0001_001
*visible:true
}
PROPERTY thickness
TFACE
VRTX 1 0.0 0.0 0.0
VRTX 2 1.0 0.0 1.0
PVRTX 3 0.0 1.0 2.0 7.5 8.5
TRGL 1 2 3
END
GOCAD TSolid 1
HEADER {
name:UNT_0001_001
}
TSOLID
VRTX 10 0 0 0
VRTX 11 1 0 0
VRTX 12 0 1 0
VRTX 13 0 0 1
TETRA 10 11 12 13
END
";

    #[test]
    fn test_objects_in_file_order() {
        let doc = parse_str(TWO_OBJECTS);
        assert_eq!(doc.len(), 2);
        let names: Vec<&str> = doc.names().collect();
        assert_eq!(names, vec!["FLT_0001_001", "UNT_0001_001"]);
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_records_and_properties() {
        let doc = parse_str(TWO_OBJECTS);
        let surface = &doc.objects[0];
        assert_eq!(surface.line, Some(3));
        assert_eq!(surface.vertices.len(), 3);
        assert_eq!(surface.triangles, vec![Triangle::new(1, 2, 3).at_line(11)]);
        assert_eq!(surface.vertex_properties.get(&3), Some(&vec![7.5, 8.5]));
        assert!(surface.property_names.contains("thickness"));
        assert!(surface.header_lines.iter().any(|l| l == "*visible:true"));

        let solid = &doc.objects[1];
        assert!(solid.is_solid());
        assert_eq!(solid.tetrahedra[0].ids(), [10, 11, 12, 13]);
        assert_eq!(solid.tetrahedra[0].line, Some(22));
    }

    #[test]
    fn test_malformed_vertex_is_demoted() {
        let doc = parse_str("GOCAD TSurf 1\nname:A\nVRTX 1 0 0 abc\nVRTX 2 0 0 1\n");
        let object = &doc.objects[0];
        assert_eq!(object.vertices.len(), 1);
        assert_eq!(object.parse_warnings().count(), 1);
        assert_eq!(doc.diagnostics.len(), 1);
        assert_eq!(doc.diagnostics[0].line, Some(3));
        assert_eq!(doc.diagnostics[0].subject.as_deref(), Some("A"));
    }

    #[test]
    fn test_malformed_property_drops_whole_vertex() {
        let doc = parse_str("GOCAD TSurf 1\nname:A\nPVRTX 1 0 0 0 oops\n");
        let object = &doc.objects[0];
        assert!(object.vertices.is_empty());
        assert!(object.vertex_properties.is_empty());
    }

    #[test]
    fn test_short_records_are_demoted() {
        let doc = parse_str("GOCAD TSurf 1\nname:A\nVRTX 1 0 0\nTRGL 1 2\nTETRA 1 2 3\n");
        let object = &doc.objects[0];
        assert!(object.vertices.is_empty());
        assert!(object.triangles.is_empty());
        assert!(object.tetrahedra.is_empty());
        assert_eq!(object.parse_warnings().count(), 3);
    }

    #[test]
    fn test_extra_triangle_fields_ignored() {
        let doc = parse_str("GOCAD TSurf 1\nname:A\nTRGL 1 2 3 4\n");
        assert_eq!(doc.objects[0].triangles[0].ids(), [1, 2, 3]);
    }

    #[test]
    fn test_bad_triangle_index() {
        let doc = parse_str("GOCAD TSurf 1\nname:A\nTRGL 1 x 3\n");
        assert!(doc.objects[0].triangles.is_empty());
        assert!(doc.diagnostics[0].message.contains("malformed triangle"));
    }

    #[test]
    fn test_unnamed_object_skipped() {
        let doc = parse_str("GOCAD TSurf 1\nVRTX 1 0 0 0\nGOCAD TSurf 1\nname:B\n");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.objects[0].name, "B");
        assert_eq!(doc.diagnostics.len(), 1);
        assert_eq!(doc.diagnostics[0].line, Some(1));
        assert!(doc.diagnostics[0].message.contains("no name"));
    }

    #[test]
    fn test_first_name_wins() {
        let doc = parse_str("GOCAD TSurf 1\nname:FIRST\nname:SECOND\n");
        assert_eq!(doc.objects[0].name, "FIRST");
        assert_eq!(doc.diagnostics.len(), 1);
        assert!(doc.diagnostics[0].message.contains("SECOND"));
    }

    #[test]
    fn test_empty_input() {
        let doc = parse_str("");
        assert!(doc.is_empty());
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_property_classes_not_registered() {
        let doc = parse_str("GOCAD TSurf 1\nname:A\nPROPERTIES a b\nPROPERTY_CLASS_HEADER a {\n");
        assert!(doc.objects[0].property_names.is_empty());
        assert_eq!(doc.objects[0].header_lines.len(), 4);
    }
}
