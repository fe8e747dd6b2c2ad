//! GOCAD ASCII writing
//!
//! Serializes mesh objects back to the text format read by
//! [`parser`](crate::parser). Output passes keyword validation with the
//! default [`KeywordConfig`](crate::model::KeywordConfig) and re-parses to the
//! same geometry.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::model::{MeshDocument, MeshObject, SOLID_TYPE, SURFACE_TYPE};

/// Write one object to a string
pub fn write_object(object: &MeshObject) -> String {
    let mut out = String::new();

    let solid = object.is_solid();
    out.push_str("GOCAD ");
    out.push_str(if solid { SOLID_TYPE } else { SURFACE_TYPE });
    out.push_str(" 1\n");
    out.push_str("HEADER {\n");
    out.push_str("name:");
    out.push_str(&object.name);
    out.push('\n');
    out.push_str("}\n");

    if !object.property_names.is_empty() {
        out.push_str("GOCAD_ORIGINAL_COORDINATE_SYSTEM\n");
        out.push_str("NAME Default\n");
        out.push_str("ZPOSITIVE Elevation\n");
        out.push_str("END_ORIGINAL_COORDINATE_SYSTEM\n");
        let names: Vec<&str> = object.property_names.iter().map(String::as_str).collect();
        out.push_str("PROPERTIES ");
        out.push_str(&names.join(" "));
        out.push('\n');
        for name in &names {
            out.push_str("PROPERTY ");
            out.push_str(name);
            out.push('\n');
        }
    }

    out.push_str(if solid { "TSOLID\n" } else { "TFACE\n" });

    for vertex in &object.vertices {
        let properties = object
            .vertex_properties
            .get(&vertex.id)
            .filter(|p| !p.is_empty());
        match properties {
            Some(values) => {
                out.push_str(&format!(
                    "PVRTX {} {} {} {}",
                    vertex.id, vertex.x, vertex.y, vertex.z
                ));
                for value in values {
                    out.push(' ');
                    out.push_str(&value.to_string());
                }
                out.push('\n');
            }
            None => out.push_str(&format!(
                "VRTX {} {} {} {}\n",
                vertex.id, vertex.x, vertex.y, vertex.z
            )),
        }
    }

    for tetrahedron in &object.tetrahedra {
        out.push_str(&format!(
            "TETRA {} {} {} {}\n",
            tetrahedron.v1, tetrahedron.v2, tetrahedron.v3, tetrahedron.v4
        ));
    }
    for triangle in &object.triangles {
        out.push_str(&format!(
            "TRGL {} {} {}\n",
            triangle.v1, triangle.v2, triangle.v3
        ));
    }

    out.push_str("END\n");
    out
}

/// Write every object of a document, in order
pub fn write_document(document: &MeshDocument) -> String {
    document.objects.iter().map(write_object).collect()
}

/// Write a document to any writer
pub fn write_document_to<W: Write>(document: &MeshDocument, mut writer: W) -> Result<()> {
    for object in &document.objects {
        writer.write_all(write_object(object).as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a document to a file, replacing it
pub fn write_file(document: &MeshDocument, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_document_to(document, BufWriter::new(file))
}
