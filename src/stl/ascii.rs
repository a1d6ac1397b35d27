use std::io::{self, BufRead, Read};

use bevy::log::debug;
use bevy_math::DVec3;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::AnalysisError;

/// Longer lines are skipped without being buffered in full.
pub const MAX_LINE_LEN: u64 = 4096;

// Tokens are runs of number characters; whatever follows a run is ignored,
// so `vertex 1 2 3abc` reads as (1, 2, 3).
static VERTEX_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*vertex\s+([-+\d.eE]+)\s+([-+\d.eE]+)\s+([-+\d.eE]+)")
        .expect("vertex pattern is valid")
});

/// What a single ASCII STL line contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    Vertex(DVec3),
    Other,
}

/// A token shaped like a number that is not one, e.g. `1.2.3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedToken(pub String);

fn parse_coordinate(token: &str) -> Result<f64, MalformedToken> {
    token
        .parse::<f64>()
        .map_err(|_| MalformedToken(token.to_string()))
}

/// Classifies one line of an ASCII STL.
///
/// A vertex line is optional leading whitespace, the keyword `vertex`, then
/// three whitespace separated numbers. Anything following the third number
/// is ignored. Every other line (`solid`, `facet normal`, `outer loop`, ...)
/// is [`Line::Other`].
pub fn classify_line(line: &str) -> Result<Line, MalformedToken> {
    let Some(caps) = VERTEX_LINE.captures(line) else {
        return Ok(Line::Other);
    };

    Ok(Line::Vertex(DVec3::new(
        parse_coordinate(&caps[1])?,
        parse_coordinate(&caps[2])?,
        parse_coordinate(&caps[3])?,
    )))
}

/// Reads the next line into `buf`, keeping at most [`MAX_LINE_LEN`] bytes.
///
/// Returns `None` at end of input and `Some(false)` for a line that was too
/// long; the rest of such a line is consumed and dropped.
fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<bool>> {
    buf.clear();
    if (&mut *reader).take(MAX_LINE_LEN).read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") || (buf.len() as u64) < MAX_LINE_LEN {
        return Ok(Some(true));
    }

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        match chunk.iter().position(|&b| b == b'\n') {
            Some(end) => {
                reader.consume(end + 1);
                break;
            }
            None => {
                let len = chunk.len();
                reader.consume(len);
            }
        }
    }
    Ok(Some(false))
}

/// Collects every `vertex` line of an ASCII STL, in file order.
///
/// Bytes that are not valid UTF-8 are replaced before classification, so a
/// binary file handed to this reader yields no vertices instead of failing.
/// The first malformed number aborts the read.
pub fn read_vertices<R: BufRead>(mut reader: R) -> Result<Vec<DVec3>, AnalysisError> {
    let mut vertices = Vec::new();
    let mut buf = Vec::new();
    let mut line_number = 0;

    while let Some(complete) = next_line(&mut reader, &mut buf)? {
        line_number += 1;
        if !complete {
            debug!("skipping line {}: longer than {} bytes", line_number, MAX_LINE_LEN);
            continue;
        }

        match classify_line(&String::from_utf8_lossy(&buf)) {
            Ok(Line::Vertex(vertex)) => {
                vertices.try_reserve(1)?;
                vertices.push(vertex);
            }
            Ok(Line::Other) => {}
            Err(MalformedToken(token)) => {
                return Err(AnalysisError::MalformedVertex {
                    line: line_number,
                    token,
                })
            }
        }
    }

    debug!(
        "ASCII scan of {} lines found {} vertices",
        line_number,
        vertices.len()
    );
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn classifies_vertex_lines() {
        assert_eq!(
            classify_line("      vertex 1.0 2.0 3.0"),
            Ok(Line::Vertex(DVec3::new(1.0, 2.0, 3.0)))
        );
        assert_eq!(
            classify_line("vertex\t-1.5e+1 .5 4.\r\n"),
            Ok(Line::Vertex(DVec3::new(-15.0, 0.5, 4.0)))
        );
        assert_eq!(
            classify_line("vertex 1 2 3 trailing words"),
            Ok(Line::Vertex(DVec3::new(1.0, 2.0, 3.0)))
        );
    }

    #[test]
    fn trailing_characters_end_the_last_token() {
        assert_eq!(
            classify_line("vertex 1 2 3abc"),
            Ok(Line::Vertex(DVec3::new(1.0, 2.0, 3.0)))
        );
        assert_eq!(
            classify_line("  vertex 4 5 6;"),
            Ok(Line::Vertex(DVec3::new(4.0, 5.0, 6.0)))
        );
        // only the last token may carry a suffix: `2x` breaks the separator
        assert_eq!(classify_line("vertex 1 2x 3"), Ok(Line::Other));
    }

    #[test]
    fn other_lines_are_skipped() {
        for line in [
            "solid cube",
            "  facet normal 0 0 1",
            "    outer loop",
            "    endloop",
            "  endfacet",
            "endsolid cube",
            "",
            "vertex",
            "vertex 1 2",
            "vertexes 1 2 3",
            "vertex a b c",
            "vertex 1 2 nan",
        ] {
            assert_eq!(classify_line(line), Ok(Line::Other), "{:?}", line);
        }
    }

    #[test]
    fn malformed_number_is_reported() {
        assert_eq!(
            classify_line("vertex 1.0 1.2.3 0"),
            Err(MalformedToken("1.2.3".to_string()))
        );
        assert_eq!(
            classify_line("vertex 1e 0 0"),
            Err(MalformedToken("1e".to_string()))
        );
    }

    #[test]
    fn reads_facet_block() {
        let text = "facet normal 0 0 1\n outer loop\n vertex 1.0 2.0 3.0\n vertex -1.5 0.0 2.25e1\n endloop\nendfacet\n";
        let vertices = read_vertices(Cursor::new(text)).unwrap();
        assert_eq!(
            vertices,
            vec![DVec3::new(1.0, 2.0, 3.0), DVec3::new(-1.5, 0.0, 22.5)]
        );
    }

    #[test]
    fn malformed_vertex_aborts_with_line_number() {
        let text = "solid s\n vertex 0 0 0\n vertex 0 --1 0\n vertex 1 1 1\n";
        match read_vertices(Cursor::new(text)) {
            Err(AnalysisError::MalformedVertex { line, token }) => {
                assert_eq!(line, 3);
                assert_eq!(token, "--1");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn invalid_utf8_is_not_an_error() {
        let mut bytes = vec![0xff, 0xfe, 0x00, b'\n'];
        bytes.extend_from_slice(b"vertex 4 5 6\n");
        let vertices = read_vertices(Cursor::new(bytes)).unwrap();
        assert_eq!(vertices, vec![DVec3::new(4.0, 5.0, 6.0)]);
    }

    #[test]
    fn over_long_lines_are_skipped() {
        let mut text = "a".repeat(3 * MAX_LINE_LEN as usize);
        text.push_str(" vertex 9 9 9\nvertex 1 2 3\n");
        let vertices = read_vertices(Cursor::new(text)).unwrap();
        assert_eq!(vertices, vec![DVec3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn input_without_newlines_is_bounded() {
        let text = "vertex 1 2 3 ".repeat(10_000);
        let vertices = read_vertices(Cursor::new(text)).unwrap();
        assert!(vertices.is_empty());
    }

    #[test]
    fn line_at_the_limit_is_read() {
        let mut text = "vertex 7 8 9".to_string();
        text.push_str(&" ".repeat(MAX_LINE_LEN as usize - text.len() - 1));
        text.push('\n');
        assert_eq!(text.len() as u64, MAX_LINE_LEN);
        let vertices = read_vertices(Cursor::new(text)).unwrap();
        assert_eq!(vertices, vec![DVec3::new(7.0, 8.0, 9.0)]);
    }

    #[test]
    fn no_vertex_lines_is_empty() {
        let vertices = read_vertices(Cursor::new("solid empty\nendsolid empty\n")).unwrap();
        assert!(vertices.is_empty());
    }
}
