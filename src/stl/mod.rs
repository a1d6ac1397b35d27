//! STL decoding: a binary reader, an ASCII reader, and the dispatcher that
//! tries them in that order.

pub mod ascii;
pub mod binary;

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use bevy::log::{debug, info};
use bevy_math::DVec3;
use serde::{Deserialize, Serialize};

use crate::AnalysisError;

pub use binary::FormatMismatch;

/// Result of offering a stream to a reader.
#[derive(Debug)]
pub enum ReadOutcome {
    Parsed(Vec<DVec3>),
    NotThisFormat(FormatMismatch),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StlFormat {
    Binary,
    Ascii,
}

/// Vertices of a decoded mesh, three per triangle, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct StlGeometry {
    pub format: StlFormat,
    pub vertices: Vec<DVec3>,
}

/// Decodes the STL file at `path`.
///
/// The file is first read as binary STL, using its on-disk size for the
/// length check. If that is rejected or yields no triangles, the file is
/// reopened and scanned as ASCII.
pub fn read_path(path: impl AsRef<Path>) -> Result<StlGeometry, AnalysisError> {
    let path = path.as_ref();
    let source = path.display().to_string();

    let file = File::open(path)?;
    let file_size = file.metadata()?.len();
    let outcome = binary::read_vertices(BufReader::new(file), file_size)?;

    dispatch(&source, outcome, || {
        let file = File::open(path)?;
        ascii::read_vertices(BufReader::new(file))
    })
}

/// Decodes an STL held in memory. The buffer length stands in for the file size.
pub fn read_bytes(bytes: &[u8]) -> Result<StlGeometry, AnalysisError> {
    let source = format!("<{} bytes>", bytes.len());
    let outcome = binary::read_vertices(Cursor::new(bytes), bytes.len() as u64)?;

    dispatch(&source, outcome, || ascii::read_vertices(Cursor::new(bytes)))
}

fn dispatch<F>(source: &str, binary: ReadOutcome, ascii: F) -> Result<StlGeometry, AnalysisError>
where
    F: FnOnce() -> Result<Vec<DVec3>, AnalysisError>,
{
    match binary {
        ReadOutcome::Parsed(vertices) if !vertices.is_empty() => {
            info!("{}: binary STL, {} vertices", source, vertices.len());
            return Ok(StlGeometry {
                format: StlFormat::Binary,
                vertices,
            });
        }
        ReadOutcome::Parsed(_) => debug!("{}: binary STL without triangles", source),
        ReadOutcome::NotThisFormat(reason) => debug!("{}: not binary STL ({})", source, reason),
    }

    let vertices = ascii()?;
    if vertices.is_empty() {
        return Err(AnalysisError::NoGeometryFound);
    }
    info!("{}: ASCII STL, {} vertices", source, vertices.len());
    Ok(StlGeometry {
        format: StlFormat::Ascii,
        vertices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_cube_corner() -> Vec<u8> {
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&1u32.to_le_bytes());
        for value in [0.0f32, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.extend_from_slice(&[0, 0]);
        bytes
    }

    #[test]
    fn prefers_binary() {
        let geometry = read_bytes(&binary_cube_corner()).unwrap();
        assert_eq!(geometry.format, StlFormat::Binary);
        assert_eq!(geometry.vertices.len(), 3);
        assert_eq!(geometry.vertices[1], DVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn falls_back_to_ascii() {
        let text = b"solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid t\n";
        let geometry = read_bytes(text).unwrap();
        assert_eq!(geometry.format, StlFormat::Ascii);
        assert_eq!(geometry.vertices.len(), 3);
    }

    #[test]
    fn empty_binary_falls_back_to_ascii() {
        // a valid zero-triangle binary file has no vertex lines either
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&0u32.to_le_bytes());
        assert!(matches!(
            read_bytes(&bytes),
            Err(AnalysisError::NoGeometryFound)
        ));
    }

    #[test]
    fn nothing_found_in_empty_input() {
        assert!(matches!(read_bytes(&[]), Err(AnalysisError::NoGeometryFound)));
        assert!(matches!(
            read_bytes(b"solid nothing\nendsolid nothing\n"),
            Err(AnalysisError::NoGeometryFound)
        ));
    }

    #[test]
    fn ascii_errors_surface() {
        assert!(matches!(
            read_bytes(b"vertex 1 2 3.4.5\n"),
            Err(AnalysisError::MalformedVertex { line: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let path = std::env::temp_dir().join("stl_levels_missing_file.stl");
        assert!(matches!(
            read_path(path),
            Err(AnalysisError::FileUnreadable(_))
        ));
    }
}
