//! Mesh readers, used to check exported files
use super::{Face, Mesh};
use crate::Error;
use nalgebra::Vector3;
use std::io::{BufRead, Read};

impl Mesh {
    /// Reads a Wavefront OBJ file
    ///
    /// Only `v` and `f` records are used; texture and normal indexes
    /// (`f 1/2/3 ...`) are ignored, as is every other record type.  Faces must
    /// have 3 or 4 vertices.
    pub fn read_obj<R: BufRead>(input: R) -> Result<Self, Error> {
        let mut out = Mesh::new();
        let mut faces = vec![];
        for (i, line) in input.lines().enumerate() {
            let line = line?;
            let lineno = i + 1;
            let bad = |msg: String| Error::BadMeshFile(lineno, msg);

            let mut words = line.split_whitespace();
            match words.next() {
                Some("v") => {
                    let mut p = [0.0f32; 3];
                    for c in &mut p {
                        let w = words
                            .next()
                            .ok_or_else(|| bad("missing coordinate".into()))?;
                        *c = w.parse().map_err(|e| bad(format!("{w}: {e}")))?;
                    }
                    out.vertices.push(Vector3::from(p));
                }
                Some("f") => {
                    let mut idx = vec![];
                    for w in words {
                        let v = w.split('/').next().unwrap_or(w);
                        let v: usize =
                            v.parse().map_err(|e| bad(format!("{w}: {e}")))?;
                        if v == 0 {
                            return Err(bad("face indexes are 1-based".into()));
                        }
                        idx.push(v - 1);
                    }
                    let face = match idx.as_slice() {
                        &[a, b, c] => Face::Triangle([a, b, c]),
                        &[a, b, c, d] => Face::Quad([a, b, c, d]),
                        _ => {
                            return Err(bad(format!(
                                "face has {} vertices",
                                idx.len()
                            )));
                        }
                    };
                    faces.push((lineno, face));
                }
                _ => (),
            }
        }

        // Faces may precede the vertices they refer to
        let n = out.vertices.len();
        for (lineno, face) in faces {
            if let Some(i) = face.indices().iter().find(|&&i| i >= n) {
                return Err(Error::BadMeshFile(
                    lineno,
                    format!("vertex {} out of range", i + 1),
                ));
            }
            out.faces.push(face);
        }
        Ok(out)
    }
}

/// Counts the triangles in a binary or ASCII STL file
///
/// A file is treated as binary if its length matches the triangle count in
/// its header; otherwise, it must be an ASCII STL beginning with `solid`.
pub fn read_stl_triangle_count<R: Read>(mut input: R) -> Result<usize, Error> {
    let mut data = vec![];
    input.read_to_end(&mut data)?;

    if data.len() >= 84 {
        let mut count = [0u8; 4];
        count.copy_from_slice(&data[80..84]);
        let count = u32::from_le_bytes(count) as usize;
        if data.len() == 84 + count * 50 {
            return Ok(count);
        }
    }

    let text = std::str::from_utf8(&data)
        .map_err(|_| Error::BadMeshFile(0, "not a valid STL file".into()))?;
    if !text.trim_start().starts_with("solid") {
        return Err(Error::BadMeshFile(1, "missing `solid` header".into()));
    }
    Ok(text
        .lines()
        .filter(|line| line.split_whitespace().next() == Some("facet"))
        .count())
}
