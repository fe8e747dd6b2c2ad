//! Shared fixtures for integration tests
//!
//! Mesh text is built from small pieces so each test states only what it
//! cares about.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A clean two-object fault file
pub const FAULTS: &str = "\
GOCAD TSurf 1
HEADER {
name:FLT_0001_001
*visible:true
*solid*color:0.8 0.1 0.1 1
}
GOCAD_ORIGINAL_COORDINATE_SYSTEM
NAME Default
AXIS_NAME \"X\" \"Y\" \"Z\"
AXIS_UNIT \"m\" \"m\" \"m\"
ZPOSITIVE Elevation
END_ORIGINAL_COORDINATE_SYSTEM
TFACE
VRTX 1 0 0 -100
VRTX 2 10 0 -110
VRTX 3 0 10 -120
VRTX 4 10 10 -130
TRGL 1 2 3
TRGL 2 4 3
END
GOCAD TSurf 1
HEADER {
name:FLT_0001_002
}
TFACE
VRTX 1 0 0 -200
VRTX 2 10 0 -210
VRTX 3 0 10 -220
VRTX 4 10 10 -230
TRGL 1 2 3
TRGL 2 4 3
END
";

/// A solid with one property per vertex
pub const UNITS: &str = "\
GOCAD TSolid 1
HEADER {
name:UNT_0001_001
}
GOCAD_ORIGINAL_COORDINATE_SYSTEM
NAME Default
ZPOSITIVE Elevation
END_ORIGINAL_COORDINATE_SYSTEM
PROPERTIES porosity
PROPERTY porosity
TSOLID
PVRTX 1 0 0 0 0.1
PVRTX 2 1 0 1 0.2
PVRTX 3 0 1 2 0.3
PVRTX 4 1 1 3 0.4
TETRA 1 2 3 4
END
";

/// Surface text for one object with the given vertex and triangle records
pub fn surface(name: &str, vertices: &[(i64, f64, f64, f64)], triangles: &[(i64, i64, i64)]) -> String {
    let mut text = format!("GOCAD TSurf 1\nHEADER {{\nname:{}\n}}\nTFACE\n", name);
    for (id, x, y, z) in vertices {
        text.push_str(&format!("VRTX {} {} {} {}\n", id, x, y, z));
    }
    for (a, b, c) in triangles {
        text.push_str(&format!("TRGL {} {} {}\n", a, b, c));
    }
    text.push_str("END\n");
    text
}

/// Four vertices with four distinct elevations
pub fn tetra_vertices() -> Vec<(i64, f64, f64, f64)> {
    vec![
        (1, 0.0, 0.0, 0.0),
        (2, 1.0, 0.0, 1.0),
        (3, 0.0, 1.0, 2.0),
        (4, 1.0, 1.0, 3.0),
    ]
}

/// Write a file into a directory and return its path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture should be writable");
    path
}
