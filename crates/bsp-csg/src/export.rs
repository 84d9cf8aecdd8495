//! Plain-text mesh formats.
//!
//! The vertex/face text format is a flat dump of a solid:
//!
//! ```text
//! x y z nx ny nz                  one line per vertex
//! <count> i0 i1 ... i(count-1)    one line per face
//! ```
//!
//! Vertices are the concatenation of every polygon's vertices in order, so
//! each face owns the contiguous index range following the previous face's
//! and the face counts add up to the number of vertex lines. There is no
//! header; the reader finds the first face line from that sum.
//! Floats are written in their shortest round-trip form, so reading a file
//! back reproduces the exact `f32` values.
//!
//! ASCII PLY output carries the same vertices and faces with a constant grey
//! vertex colour, for inspection in external viewers.

use std::io::{BufRead, Write};

use nalgebra::{Point3, Vector3};

use crate::{Csg, Error, Polygon, Result, SimpleVertex, Vertex};

/// Writes `csg` in the vertex/face text format.
pub fn write_text<V: Vertex, W: Write>(csg: &Csg<V>, mut writer: W) -> Result<()> {
    for line in text_lines(csg) {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Formats `csg` in the vertex/face text format.
pub fn to_text<V: Vertex>(csg: &Csg<V>) -> String {
    text_lines(csg).map(|line| line + "\n").collect()
}

/// Writes `csg` as an ASCII PLY file.
pub fn write_ply<V: Vertex, W: Write>(csg: &Csg<V>, mut writer: W) -> Result<()> {
    for line in ply_lines(csg) {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Formats `csg` as an ASCII PLY file.
pub fn to_ply<V: Vertex>(csg: &Csg<V>) -> String {
    ply_lines(csg).map(|line| line + "\n").collect()
}

fn vertex_fields<V: Vertex>(vertex: &V) -> String {
    let p = vertex.position();
    let n = vertex.normal();
    format!("{} {} {} {} {} {}", p.x, p.y, p.z, n.x, n.y, n.z)
}

/// One `<count> i0 i1 ...` line per polygon, indices assigned contiguously.
fn face_lines<V: Vertex>(csg: &Csg<V>) -> impl Iterator<Item = String> + '_ {
    csg.polygons().iter().scan(0usize, |next, polygon| {
        let start = *next;
        *next += polygon.len();
        let mut line = polygon.len().to_string();
        for index in start..*next {
            line.push(' ');
            line.push_str(&index.to_string());
        }
        Some(line)
    })
}

fn vertex_lines<V: Vertex>(csg: &Csg<V>) -> impl Iterator<Item = &V> + '_ {
    csg.polygons().iter().flat_map(Polygon::vertices)
}

fn text_lines<V: Vertex>(csg: &Csg<V>) -> impl Iterator<Item = String> + '_ {
    vertex_lines(csg)
        .map(vertex_fields)
        .chain(face_lines(csg))
}

fn ply_lines<V: Vertex>(csg: &Csg<V>) -> impl Iterator<Item = String> + '_ {
    let header = [
        "ply".to_string(),
        "format ascii 1.0".to_string(),
        format!("element vertex {}", csg.vertex_count()),
        "property float x".to_string(),
        "property float y".to_string(),
        "property float z".to_string(),
        "property float nx".to_string(),
        "property float ny".to_string(),
        "property float nz".to_string(),
        "property uchar red".to_string(),
        "property uchar green".to_string(),
        "property uchar blue".to_string(),
        format!("element face {}", csg.len()),
        "property list uchar int vertex_indices".to_string(),
        "end_header".to_string(),
    ];
    header
        .into_iter()
        .chain(vertex_lines(csg).map(|v| vertex_fields(v) + " 128 128 128"))
        .chain(face_lines(csg))
}

/// Non-blank lines paired with their 1-based line numbers.
fn numbered_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>> {
    let mut numbered = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.trim().is_empty() {
            numbered.push((index + 1, line));
        }
    }
    Ok(numbered)
}

fn parse_field<T: std::str::FromStr>(line: usize, token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::parse(line, format!("invalid {what} `{token}`")))
}

fn parse_floats<const N: usize>(line: usize, text: &str) -> Result<[f32; N]> {
    let mut values = [0.0; N];
    let mut tokens = text.split_whitespace();
    for value in values.iter_mut() {
        let token = tokens
            .next()
            .ok_or_else(|| Error::parse(line, format!("expected {N} numbers")))?;
        *value = parse_field(line, token, "number")?;
    }
    if tokens.next().is_some() {
        return Err(Error::parse(line, format!("expected {N} numbers")));
    }
    Ok(values)
}

/// The declared vertex count of a well-formed face line: integer tokens
/// only, exactly `count` of them after the count itself.
fn face_arity(text: &str) -> Option<usize> {
    let mut tokens = text.split_whitespace();
    let count: usize = tokens.next()?.parse().ok()?;
    let mut indices = 0;
    for token in tokens {
        token.parse::<usize>().ok()?;
        indices += 1;
    }
    (indices == count).then_some(count)
}

/// Index of the first face line.
///
/// Walking up from the last line, the face counts seen so far plus the
/// number of face lines only grow, so at most one position has exactly as
/// many lines above it as the faces below it claim.
fn face_section_start(lines: &[(usize, String)]) -> Result<usize> {
    let mut covered = 0;
    let mut topmost = lines.last().map_or(1, |(line, _)| *line);
    for (start, (line, text)) in lines.iter().enumerate().rev() {
        let Some(count) = face_arity(text) else {
            break;
        };
        topmost = *line;
        covered += count;
        if covered == start {
            return Ok(start);
        }
        if covered > start {
            break;
        }
    }
    Err(Error::parse(
        topmost,
        "face vertex counts do not match the vertex lines before them",
    ))
}

fn parse_face(
    line: usize,
    text: &str,
    face: usize,
    vertices: &[SimpleVertex],
) -> Result<Polygon<SimpleVertex>> {
    let mut tokens = text.split_whitespace();
    let count: usize = match tokens.next() {
        Some(token) => parse_field(line, token, "vertex count")?,
        None => return Err(Error::parse(line, "empty face")),
    };
    if count < 3 {
        return Err(Error::TooFewVertices { face, count });
    }

    let face_vertices = tokens
        .map(|token| -> Result<SimpleVertex> {
            let index: usize = parse_field(line, token, "vertex index")?;
            vertices
                .get(index)
                .copied()
                .ok_or(Error::IndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                })
        })
        .collect::<Result<Vec<_>>>()?;
    if face_vertices.len() != count {
        return Err(Error::parse(
            line,
            format!("face {face} declares {count} vertices"),
        ));
    }
    Ok(Polygon::new(face_vertices))
}

/// Reads a solid from the vertex/face text format.
///
/// Faces may index vertices in any order, but their counts must add up to
/// the number of vertex lines. Each index must refer to an existing vertex
/// and each face needs at least 3 of them.
pub fn read_text<R: BufRead>(reader: R) -> Result<Csg<SimpleVertex>> {
    let lines = numbered_lines(reader)?;
    if lines.is_empty() {
        return Ok(Csg::empty());
    }
    let (vertex_rows, face_rows) = lines.split_at(face_section_start(&lines)?);

    let vertices = vertex_rows
        .iter()
        .map(|(line, text)| -> Result<SimpleVertex> {
            let [x, y, z, nx, ny, nz] = parse_floats::<6>(*line, text)?;
            Ok(SimpleVertex::new(
                Point3::new(x, y, z),
                Vector3::new(nx, ny, nz),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let polygons = face_rows
        .iter()
        .enumerate()
        .map(|(face, (line, text))| parse_face(*line, text, face, &vertices))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        vertex_count = vertices.len(),
        face_count = polygons.len(),
        "read text mesh"
    );
    Ok(Csg::new(polygons))
}

/// Reads a solid from a string in the vertex/face text format.
pub fn from_text(text: &str) -> Result<Csg<SimpleVertex>> {
    read_text(text.as_bytes())
}
