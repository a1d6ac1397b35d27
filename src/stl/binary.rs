use std::io::{ErrorKind, Read};

use bevy::log::{debug, warn};
use bevy_math::DVec3;
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use thiserror::Error;

use super::ReadOutcome;
use crate::AnalysisError;

pub const HEADER_SIZE: u64 = 80;
pub const TRIANGLE_SIZE: u64 = 50;

const COUNT_SIZE: u64 = 4;

/// Why a stream was not accepted as binary STL.
///
/// These never leave the dispatcher; they only decide whether the ASCII
/// reader gets a turn.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FormatMismatch {
    #[error("stream is shorter than the 80 byte header")]
    ShortHeader,

    #[error("stream ends before the triangle count")]
    MissingTriangleCount,

    #[error("{triangles} triangles need {expected} bytes but the file has {actual}")]
    SizeMismatch {
        triangles: u32,
        expected: u64,
        actual: u64,
    },

    #[error("read failed: {0}")]
    Io(std::io::Error),
}

impl FormatMismatch {
    fn from_io(err: std::io::Error, on_eof: FormatMismatch) -> Self {
        match err.kind() {
            ErrorKind::UnexpectedEof => on_eof,
            _ => FormatMismatch::Io(err),
        }
    }
}

/// Total byte length of a well-formed binary STL holding `triangles` records.
pub fn expected_size(triangles: u32) -> u64 {
    HEADER_SIZE + COUNT_SIZE + TRIANGLE_SIZE * triangles as u64
}

/// Reads a binary STL from `reader`, whose total length is `file_size`.
///
/// The declared triangle count has to account for exactly `file_size` bytes,
/// otherwise the stream is reported as [`ReadOutcome::NotThisFormat`]. Once
/// that check passes, a record stream that ends early is not an error: the
/// vertices of every complete record read so far are returned.
///
/// Only allocation failure escapes as an [`AnalysisError`].
pub fn read_vertices<R: Read>(mut reader: R, file_size: u64) -> Result<ReadOutcome, AnalysisError> {
    let mut header = [0u8; HEADER_SIZE as usize];
    if let Err(err) = reader.read_exact(&mut header) {
        return Ok(ReadOutcome::NotThisFormat(FormatMismatch::from_io(
            err,
            FormatMismatch::ShortHeader,
        )));
    }

    let triangles = match reader.read_u32::<LittleEndian>() {
        Ok(count) => count,
        Err(err) => {
            return Ok(ReadOutcome::NotThisFormat(FormatMismatch::from_io(
                err,
                FormatMismatch::MissingTriangleCount,
            )))
        }
    };

    let expected = expected_size(triangles);
    if expected != file_size {
        return Ok(ReadOutcome::NotThisFormat(FormatMismatch::SizeMismatch {
            triangles,
            expected,
            actual: file_size,
        }));
    }
    debug!("binary STL header declares {} triangles", triangles);

    let mut vertices = Vec::new();
    vertices.try_reserve_exact((triangles as usize).saturating_mul(3))?;

    // normal (12 bytes), three vertices (36 bytes), attribute (2 bytes)
    let mut record = [0u8; TRIANGLE_SIZE as usize];
    let mut coords = [0f32; 9];
    for index in 0..triangles {
        if let Err(err) = reader.read_exact(&mut record) {
            warn!(
                "binary STL ended after {} of {} triangles: {}",
                index, triangles, err
            );
            break;
        }
        LittleEndian::read_f32_into(&record[12..48], &mut coords);
        for v in coords.chunks_exact(3) {
            vertices.push(DVec3::new(v[0] as f64, v[1] as f64, v[2] as f64));
        }
    }

    Ok(ReadOutcome::Parsed(vertices))
}
