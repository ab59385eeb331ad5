/// OBJ-subset parser: `v`/`vt`/`vn`/`f` records, triangular faces only
use nom::{
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{all_consuming, map, map_res, opt, verify},
    multi::separated_list1,
    number::complete::float,
    sequence::{pair, preceded, terminated},
    IResult,
};

use nalgebra::{Point3, Vector2, Vector3};
use std::fs;
use std::path::Path;

use crate::error::MeshError;
use crate::mesh::MeshBuffers;

/// One face corner: indices into the attribute pools, already 0-based.
#[derive(Debug, Clone, Copy)]
struct Corner {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

/// Read a mesh description from disk and de-index it into flat
/// per-corner streams. Takes exactly one path; the whole file is
/// consumed in one blocking pass.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshBuffers, MeshError> {
    let source = fs::read_to_string(path.as_ref())?;
    let mesh = parse_obj(&source)?;
    log::info!(
        "loaded {}: {} triangles (uvs: {}, normals: {})",
        path.as_ref().display(),
        mesh.triangle_count(),
        mesh.has_uvs(),
        mesh.has_normals(),
    );
    Ok(mesh)
}

/// Parse a line-oriented mesh description and resolve every face
/// corner into flat attribute streams, in face emission order.
///
/// Shared vertices are duplicated across corners, never welded: the
/// output feeds non-indexed draw submission. Any malformed record is
/// fatal; no partial mesh is produced.
pub fn parse_obj(source: &str) -> Result<MeshBuffers, MeshError> {
    // Attribute pools, indexed by 1-based position in the file per
    // record type (stored 0-based internally).
    let mut positions: Vec<Point3<f32>> = Vec::new();
    let mut uvs: Vec<Vector2<f32>> = Vec::new();
    let mut normals: Vec<Vector3<f32>> = Vec::new();

    let mut corners: Vec<Corner> = Vec::new();
    // 1-based source line of each face, for error context during the
    // resolution pass.
    let mut face_lines: Vec<usize> = Vec::new();
    // Which optional channels the first face declared; later corners
    // must agree.
    let mut layout: Option<(bool, bool)> = None;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        let Some((token, rest)) = split_leading_token(line) else {
            continue;
        };

        match token {
            "v" => {
                let p = run(parse_vec3, rest)
                    .ok_or_else(|| unparsable_number(line_no, raw_line))?;
                positions.push(Point3::from(p));
            }
            "vt" => {
                let (u, v) = run(parse_vec2, rest)
                    .ok_or_else(|| unparsable_number(line_no, raw_line))?;
                // Flip V: the source convention is bottom-left origin,
                // the target texture convention is top-left.
                uvs.push(Vector2::new(u, -v));
            }
            "vn" => {
                let n = run(parse_vec3, rest)
                    .ok_or_else(|| unparsable_number(line_no, raw_line))?;
                normals.push(n);
            }
            "f" => {
                let face = run(parse_face, rest)
                    .ok_or_else(|| malformed_face(line_no, raw_line))?;
                if face.len() != 3 {
                    return Err(malformed_face(line_no, raw_line));
                }
                let face_layout = *layout.get_or_insert((
                    face[0].uv.is_some(),
                    face[0].normal.is_some(),
                ));
                for corner in face {
                    if (corner.uv.is_some(), corner.normal.is_some()) != face_layout {
                        return Err(malformed_face(line_no, raw_line));
                    }
                    corners.push(corner);
                }
                face_lines.push(line_no);
            }
            // Comments and unrecognized directives are ignored.
            _ => {}
        }
    }

    resolve(source, &positions, &uvs, &normals, &corners, &face_lines)
}

/// De-indexing pass: every recorded corner triple becomes one entry in
/// each present output stream. The pools are dropped afterward; the
/// result is self-contained.
fn resolve(
    source: &str,
    positions: &[Point3<f32>],
    uvs: &[Vector2<f32>],
    normals: &[Vector3<f32>],
    corners: &[Corner],
    face_lines: &[usize],
) -> Result<MeshBuffers, MeshError> {
    let mut mesh = MeshBuffers::with_capacity(corners.len());

    for (face_idx, face) in corners.chunks(3).enumerate() {
        let line = face_lines[face_idx];
        for corner in face {
            let p = positions.get(corner.position).ok_or_else(|| {
                index_out_of_range(source, line, "position", corner.position, positions.len())
            })?;
            mesh.positions.push(*p);

            if let Some(ti) = corner.uv {
                let uv = uvs
                    .get(ti)
                    .ok_or_else(|| index_out_of_range(source, line, "uv", ti, uvs.len()))?;
                mesh.uvs.push(*uv);
            }
            if let Some(ni) = corner.normal {
                let n = normals
                    .get(ni)
                    .ok_or_else(|| index_out_of_range(source, line, "normal", ni, normals.len()))?;
                mesh.normals.push(*n);
            }
        }
    }

    log::debug!(
        "de-indexed {} corners into {} triangles",
        corners.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Split a trimmed line into its leading token and the remainder.
/// Blank lines and `#` comments classify as nothing.
fn split_leading_token(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((token, rest)) => Some((token, rest)),
        None => Some((line, "")),
    }
}

/// Run a record-body parser over the rest of a line, requiring it to
/// consume everything but trailing whitespace.
fn run<'a, T>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
    input: &'a str,
) -> Option<T> {
    all_consuming(terminated(parser, multispace0))(input)
        .ok()
        .map(|(_, value)| value)
}

fn parse_vec3(input: &str) -> IResult<&str, Vector3<f32>> {
    let (input, x) = preceded(multispace0, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

fn parse_vec2(input: &str) -> IResult<&str, (f32, f32)> {
    let (input, u) = preceded(multispace0, float)(input)?;
    let (input, v) = preceded(multispace1, float)(input)?;
    Ok((input, (u, v)))
}

/// A 1-based attribute index as written in the file, converted to
/// 0-based exactly once, here. `0` is not a valid index.
fn parse_index(input: &str) -> IResult<&str, usize> {
    map(
        verify(map_res(digit1, str::parse::<usize>), |&i| i >= 1),
        |i| i - 1,
    )(input)
}

/// One corner descriptor: `p`, `p/t`, `p//n`, or `p/t/n`.
fn parse_corner(input: &str) -> IResult<&str, Corner> {
    let (input, position) = parse_index(input)?;
    let (input, tail) = opt(preceded(
        char('/'),
        pair(opt(parse_index), opt(preceded(char('/'), parse_index))),
    ))(input)?;

    let (uv, normal) = tail.unwrap_or((None, None));
    Ok((input, Corner { position, uv, normal }))
}

fn parse_face(input: &str) -> IResult<&str, Vec<Corner>> {
    preceded(multispace0, separated_list1(multispace1, parse_corner))(input)
}

fn unparsable_number(line: usize, content: &str) -> MeshError {
    MeshError::UnparsableNumber {
        line,
        content: content.to_string(),
    }
}

fn malformed_face(line: usize, content: &str) -> MeshError {
    MeshError::MalformedFace {
        line,
        content: content.to_string(),
    }
}

fn index_out_of_range(
    source: &str,
    line: usize,
    pool: &'static str,
    index: usize,
    count: usize,
) -> MeshError {
    MeshError::IndexOutOfRange {
        line,
        content: source.lines().nth(line - 1).unwrap_or("").to_string(),
        pool,
        // Report the index as the file wrote it.
        index: index + 1,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_FULL: &str = "\
# full corner descriptors
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/2 3/3/3
";

    #[test]
    fn test_full_triangle_streams() {
        let mesh = parse_obj(TRIANGLE_FULL).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.uvs.len(), 3);
        assert_eq!(mesh.normals.len(), 3);

        // Emission order preserved: exactly [P1, P2, P3].
        assert_eq!(mesh.positions[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.positions[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.positions[2], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.normals[2], Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_shared_vertices_are_duplicated() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 1.0 1.0 0.0
f 1 2 3
f 3 2 4
";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 6);
        // Corner 2 of face 1 and corner 1 of face 2 both resolve P3.
        assert_eq!(mesh.positions[2], mesh.positions[3]);
        assert!(!mesh.has_uvs());
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_uv_v_coordinate_is_flipped() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0.25 0.75
vt 0.5 0.5
vt 1.0 1.0
f 1/1 2/2 3/3
";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.uvs[0], Vector2::new(0.25, -0.75));
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_position_and_normal_form() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 1 0
f 1//1 2//1 3//1
";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.normals.len(), 3);
        assert!(!mesh.has_uvs());
    }

    #[test]
    fn test_two_corner_face_is_malformed() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2
";
        match parse_obj(src) {
            Err(MeshError::MalformedFace { line, content }) => {
                assert_eq!(line, 4);
                assert!(content.contains("f 1 2"));
            }
            other => panic!("expected MalformedFace, got {other:?}"),
        }
    }

    #[test]
    fn test_quad_is_rejected_not_triangulated() {
        let src = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";
        assert!(matches!(
            parse_obj(src),
            Err(MeshError::MalformedFace { line: 5, .. })
        ));
    }

    #[test]
    fn test_out_of_range_position_index() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 5
";
        match parse_obj(src) {
            Err(MeshError::IndexOutOfRange {
                line,
                pool,
                index,
                count,
                ..
            }) => {
                assert_eq!(line, 4);
                assert_eq!(pool, "position");
                assert_eq!(index, 5);
                assert_eq!(count, 3);
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_index_is_malformed() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 0 1 2
";
        assert!(matches!(parse_obj(src), Err(MeshError::MalformedFace { .. })));
    }

    #[test]
    fn test_bad_coordinate_field() {
        let src = "v 0.0 abc 1.0\n";
        match parse_obj(src) {
            Err(MeshError::UnparsableNumber { line, content }) => {
                assert_eq!(line, 1);
                assert!(content.contains("abc"));
            }
            other => panic!("expected UnparsableNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_field_count_is_unparsable() {
        assert!(matches!(
            parse_obj("v 1.0 2.0\n"),
            Err(MeshError::UnparsableNumber { line: 1, .. })
        ));
    }

    #[test]
    fn test_mixed_corner_layout_is_malformed() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
f 1/1 2 3
";
        assert!(matches!(
            parse_obj(src),
            Err(MeshError::MalformedFace { line: 5, .. })
        ));
    }

    #[test]
    fn test_unknown_directives_are_ignored() {
        let src = "\
# a comment
mtllib scene.mtl
o triangle
v 0 0 0
v 1 0 0
v 0 1 0
s off
f 1 2 3
";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_empty_source_is_empty_mesh() {
        let mesh = parse_obj("").unwrap();
        assert_eq!(mesh.triangle_count(), 0);
        assert!(!mesh.has_uvs());
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_output_lengths_are_three_per_face() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
vt 0 0
vt 1 1
vn 0 0 1
f 1/1/1 2/2/1 3/1/1
f 2/2/1 4/1/1 3/2/1
f 1/1/1 4/2/1 2/1/1
";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.positions.len(), 9);
        assert_eq!(mesh.uvs.len(), 9);
        assert_eq!(mesh.normals.len(), 9);
    }
}
