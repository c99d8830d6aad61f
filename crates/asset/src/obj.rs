//! OBJ subset parser: positions, texture coordinates, normals and
//! triangular faces. Everything else in the file is skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::error::{GeometryError, GeometryResult};

/// Path reported in I/O errors for readers that are not backed by a file.
const MEMORY_SOURCE: &str = "<memory>";

/// Classification of a single OBJ line by its leading token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObjLineKind {
    /// Blank lines and directives this loader does not support (`o`, `g`, `usemtl`, ...).
    None,
    Vertex,
    TextureCoord,
    Normal,
    Face,
    Comment,
}

/// Classify a raw line. Surrounding whitespace is ignored.
pub fn classify(line: &str) -> ObjLineKind {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return ObjLineKind::Comment;
    }
    match trimmed.split_whitespace().next() {
        Some("v") => ObjLineKind::Vertex,
        Some("vt") => ObjLineKind::TextureCoord,
        Some("vn") => ObjLineKind::Normal,
        Some("f") => ObjLineKind::Face,
        _ => ObjLineKind::None,
    }
}

/// One vertex reference of a face. Indices are 0-based (OBJ index - 1).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FaceCorner {
    pub position: Option<usize>,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FaceRecord {
    pub corners: [FaceCorner; 3],
}

/// Raw records in file order, before any de-indexing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjDocument {
    pub positions: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<FaceRecord>,
}

/// Parse an OBJ file from disk.
pub fn parse_obj_file(path: impl AsRef<Path>) -> GeometryResult<ObjDocument> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| GeometryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_lines(BufReader::new(file), path)
}

/// Parse OBJ text from any [`BufRead`] implementation.
pub fn parse_obj<R: BufRead>(reader: R) -> GeometryResult<ObjDocument> {
    parse_lines(reader, Path::new(MEMORY_SOURCE))
}

/// Convenience helper to parse an OBJ string literal.
pub fn parse_obj_str(contents: &str) -> GeometryResult<ObjDocument> {
    parse_obj(io::Cursor::new(contents))
}

/// Line number and raw text, carried along so every failure can point at its source.
struct LineContext<'a> {
    number: usize,
    content: &'a str,
}

impl LineContext<'_> {
    fn error(&self, reason: impl Into<String>) -> GeometryError {
        GeometryError::Parse {
            line: self.number,
            content: self.content.to_string(),
            reason: reason.into(),
        }
    }
}

fn parse_lines<R: BufRead>(mut reader: R, origin: &Path) -> GeometryResult<ObjDocument> {
    let mut doc = ObjDocument::default();
    let mut skipped = 0usize;
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| GeometryError::Io {
                path: origin.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        // Decoded per line so an encoding error can name where it happened.
        let line = std::str::from_utf8(&buf).map_err(|_| GeometryError::Parse {
            line: line_no,
            content: String::from_utf8_lossy(&buf).trim_end().to_string(),
            reason: "line is not valid UTF-8".into(),
        })?;
        let line = line.trim_end_matches(['\n', '\r']);
        let ctx = LineContext {
            number: line_no,
            content: line,
        };
        let trimmed = line.trim();
        // Leading token already inspected by `classify`.
        let mut parts = trimmed.split_whitespace().skip(1);

        match classify(trimmed) {
            ObjLineKind::Vertex => {
                doc.positions
                    .push(parse_components(&mut parts, &ctx, ["x", "y", "z"])?);
            }
            ObjLineKind::TextureCoord => {
                doc.texcoords
                    .push(parse_components(&mut parts, &ctx, ["u", "v"])?);
            }
            ObjLineKind::Normal => {
                doc.normals
                    .push(parse_components(&mut parts, &ctx, ["nx", "ny", "nz"])?);
            }
            ObjLineKind::Face => doc.faces.push(parse_face(parts, &ctx)?),
            ObjLineKind::Comment => {}
            ObjLineKind::None => {
                if !trimmed.is_empty() {
                    log::debug!("Skipping unsupported OBJ line {}: '{}'", ctx.number, trimmed);
                    skipped += 1;
                }
            }
        }
    }

    log::debug!(
        "Parsed OBJ {}: {} positions, {} texcoords, {} normals, {} faces ({} lines skipped)",
        origin.display(),
        doc.positions.len(),
        doc.texcoords.len(),
        doc.normals.len(),
        doc.faces.len(),
        skipped
    );

    Ok(doc)
}

/// Read exactly `N` finite floats; anything after them on the line is ignored.
fn parse_components<'a, const N: usize>(
    parts: &mut impl Iterator<Item = &'a str>,
    ctx: &LineContext<'_>,
    names: [&str; N],
) -> GeometryResult<[f32; N]> {
    let mut out = [0.0f32; N];
    for (slot, what) in out.iter_mut().zip(names) {
        let token = parts
            .next()
            .ok_or_else(|| ctx.error(format!("missing {what} coordinate")))?;
        *slot = token
            .parse::<f32>()
            .map_err(|_| ctx.error(format!("invalid {what} coordinate '{token}'")))?;
        if !slot.is_finite() {
            return Err(ctx.error(format!("non-finite {what} coordinate '{token}'")));
        }
    }
    Ok(out)
}

/// Faces must have at least three corners. Corners past the third are
/// syntax-checked and then dropped; no fan triangulation is performed.
fn parse_face<'a>(
    parts: impl Iterator<Item = &'a str>,
    ctx: &LineContext<'_>,
) -> GeometryResult<FaceRecord> {
    let mut corners = [FaceCorner::default(); 3];
    let mut count = 0usize;

    for token in parts {
        let corner = parse_corner(token, ctx)?;
        if let Some(slot) = corners.get_mut(count) {
            *slot = corner;
        }
        count += 1;
    }

    if count < 3 {
        return Err(ctx.error(format!("face needs 3 corners, found {count}")));
    }
    if count > 3 {
        log::debug!(
            "Line {}: discarding {} face corner(s) past the third",
            ctx.number,
            count - 3
        );
    }

    Ok(FaceRecord { corners })
}

/// `P`, `P/T`, `P//N` or `P/T/N`.
fn parse_corner(token: &str, ctx: &LineContext<'_>) -> GeometryResult<FaceCorner> {
    let mut fields = token.split('/');
    let position = parse_index(fields.next(), ctx, "position")?;
    let texcoord = parse_index(fields.next(), ctx, "texture coordinate")?;
    let normal = parse_index(fields.next(), ctx, "normal")?;

    if fields.next().is_some() {
        return Err(ctx.error(format!(
            "face corner '{token}' has more than three fields"
        )));
    }

    Ok(FaceCorner {
        position,
        texcoord,
        normal,
    })
}

fn parse_index(
    field: Option<&str>,
    ctx: &LineContext<'_>,
    what: &str,
) -> GeometryResult<Option<usize>> {
    let Some(value) = field.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let raw = value
        .parse::<i64>()
        .map_err(|_| ctx.error(format!("invalid {what} index '{value}'")))?;
    if raw <= 0 {
        return Err(ctx.error(format!(
            "{what} index {raw} is not a positive 1-based index"
        )));
    }
    usize::try_from(raw - 1)
        .map(Some)
        .map_err(|_| ctx.error(format!("{what} index {raw} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(src: &str) -> (usize, String) {
        match parse_obj_str(src) {
            Err(GeometryError::Parse { line, content, .. }) => (line, content),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn classify_leading_tokens() {
        assert_eq!(classify("v 1 2 3"), ObjLineKind::Vertex);
        assert_eq!(classify("  vt 0 1"), ObjLineKind::TextureCoord);
        assert_eq!(classify("vn 0 0 1"), ObjLineKind::Normal);
        assert_eq!(classify("f 1 2 3"), ObjLineKind::Face);
        assert_eq!(classify("# v 1 2 3"), ObjLineKind::Comment);
        assert_eq!(classify("#no space"), ObjLineKind::Comment);
        assert_eq!(classify(""), ObjLineKind::None);
        assert_eq!(classify("usemtl venus"), ObjLineKind::None);
        assert_eq!(classify("vp 0.5"), ObjLineKind::None);
    }

    #[test]
    fn parses_records_in_file_order() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.25\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";
        let doc = parse_obj_str(src).expect("parse");
        assert_eq!(doc.positions, vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(doc.texcoords, vec![[0.5, 0.25]]);
        assert_eq!(doc.normals, vec![[0.0, 0.0, 1.0]]);
        assert_eq!(doc.faces.len(), 1);
        assert_eq!(
            doc.faces[0].corners[1],
            FaceCorner {
                position: Some(1),
                texcoord: Some(0),
                normal: Some(0)
            }
        );
    }

    #[test]
    fn corner_forms() {
        let src = "f 1 2/3 4//5\n";
        let face = parse_obj_str(src).expect("parse").faces[0];
        assert_eq!(face.corners[0], FaceCorner { position: Some(0), texcoord: None, normal: None });
        assert_eq!(face.corners[1], FaceCorner { position: Some(1), texcoord: Some(2), normal: None });
        assert_eq!(face.corners[2], FaceCorner { position: Some(3), texcoord: None, normal: Some(4) });
    }

    #[test]
    fn fourth_corner_is_discarded() {
        let doc = parse_obj_str("f 1 2 3 4\n").expect("parse");
        assert_eq!(doc.faces.len(), 1);
        let positions: Vec<_> = doc.faces[0].corners.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn extra_corner_is_still_checked() {
        let (line, _) = parse_err("f 1 2 3 x\n");
        assert_eq!(line, 1);
    }

    #[test]
    fn too_few_corners_is_error() {
        let (line, content) = parse_err("v 0 0 0\nf 1 2\n");
        assert_eq!(line, 2);
        assert_eq!(content, "f 1 2");
    }

    #[test]
    fn vertex_missing_z_is_error() {
        let (line, content) = parse_err("v 1 2\n");
        assert_eq!(line, 1);
        assert_eq!(content, "v 1 2");
    }

    #[test]
    fn texcoord_needs_two_components() {
        parse_err("vt 0.5\n");
    }

    #[test]
    fn malformed_number_is_error() {
        let (line, _) = parse_err("# header\nvn 0 abc 1\n");
        assert_eq!(line, 2);
    }

    #[test]
    fn normal_needs_three_components() {
        let (line, content) = parse_err("vn 0 0\n");
        assert_eq!(line, 1);
        assert_eq!(content, "vn 0 0");
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert_eq!(parse_err("v nan 0 0\n").0, 1);
        assert_eq!(parse_err("v 0 0 0\nv inf 0 0\n").0, 2);
        assert_eq!(parse_err("vt 0 -infinity\n").0, 1);
        assert_eq!(parse_err("vn 0 NaN 1\n").0, 1);
    }

    #[test]
    fn invalid_utf8_reports_line() {
        let src: &[u8] = b"v 0 0 0\n# cr\xe9\xe9\r\nv 1 0 0\n";
        match parse_obj(src) {
            Err(GeometryError::Parse { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn last_line_without_newline_is_parsed() {
        let doc = parse_obj_str("v 1 2 3\r\nv 4 5 6").expect("parse");
        assert_eq!(doc.positions, vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn w_components_are_ignored() {
        let doc = parse_obj_str("v 1 2 3 1.0\nvt 0.1 0.2 0.0\n").expect("parse");
        assert_eq!(doc.positions, vec![[1.0, 2.0, 3.0]]);
        assert_eq!(doc.texcoords, vec![[0.1, 0.2]]);
    }

    #[test]
    fn zero_and_negative_indices_are_rejected() {
        parse_err("f 0 1 2\n");
        parse_err("f -1 -2 -3\n");
        parse_err("f 1/2/3/4 2 3\n");
    }

    #[test]
    fn unsupported_directives_and_crlf() {
        let src = "mtllib scene.mtl\r\no planet\r\ng body\r\ns 1\r\n\r\nv 1 2 3\r\n";
        let doc = parse_obj_str(src).expect("parse");
        assert_eq!(doc.positions, vec![[1.0, 2.0, 3.0]]);
        assert!(doc.faces.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = parse_obj_file(dir.path().join("absent.obj")).unwrap_err();
        assert!(matches!(err, GeometryError::Io { .. }));
    }
}
