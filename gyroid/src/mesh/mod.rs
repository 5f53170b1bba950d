//! Iso-surface extraction and mesh I/O
//!
//! This module contours a [`SampleGrid`](crate::grid::SampleGrid) at the zero
//! level using marching tetrahedra: each grid cell is split into six
//! tetrahedra along its main diagonal, and each tetrahedron that straddles the
//! surface contributes a triangle or a quad.
//!
//! The resulting meshes are
//! - Crack-free across cell boundaries (neighbouring cells split their shared
//!   faces identically)
//! - Consistently oriented, with normals pointing toward positive field values
//!
//! However, they are not smoothed, may contain slivers, and may be
//! disconnected or empty.
//!
//! The resulting [`Mesh`] objects can be written out as STL or OBJ files.
//!
//! Here's a full example:
//!
//! ```
//! use gyroid::{GenerationParameters, Variant};
//!
//! let params = GenerationParameters {
//!     resolution: 16,
//!     variant: Variant::Cartesian,
//!     ..Default::default()
//! };
//! let mesh = gyroid::generate(&params)?;
//! assert!(!mesh.is_empty());
//!
//! // Open a file to write, e.g.
//! // let mut f = std::fs::File::create("out.stl")?;
//! # let mut f = vec![];
//! mesh.write_stl(&mut f)?;
//! # Ok::<(), gyroid::Error>(())
//! ```

mod builder;
mod extract;
mod input;
mod output;
mod types;

pub use extract::extract;
pub use input::read_stl_triangle_count;

use crate::Error;
use nalgebra::Vector3;
use std::path::Path;

////////////////////////////////////////////////////////////////////////////////

/// A single polygon, as indexes into [`Mesh::vertices`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Face {
    /// Three-sided face
    Triangle([usize; 3]),
    /// Four-sided face
    Quad([usize; 4]),
}

impl Face {
    /// Returns the vertex indexes of this face, in winding order
    pub fn indices(&self) -> &[usize] {
        match self {
            Face::Triangle(t) => t,
            Face::Quad(q) => q,
        }
    }

    /// Splits this face into triangles
    ///
    /// Quads `[v0, v1, v2, v3]` are always split along the `v0-v2` diagonal.
    pub fn triangles(self) -> impl Iterator<Item = [usize; 3]> {
        let (a, b) = match self {
            Face::Triangle(t) => (t, None),
            Face::Quad([v0, v1, v2, v3]) => ([v0, v1, v2], Some([v0, v2, v3])),
        };
        std::iter::once(a).chain(b)
    }
}

/// An indexed 3D mesh
#[derive(Clone, Default, Debug)]
pub struct Mesh {
    /// Vertex positions
    pub vertices: Vec<Vector3<f32>>,
    /// Faces, as indexes into [`self.vertices`](Self::vertices)
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Builds a new (empty) mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether the mesh has no faces
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of triangles after splitting quads
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| match f {
                Face::Triangle(..) => 1,
                Face::Quad(..) => 2,
            })
            .sum()
    }

    /// Number of quad faces
    pub fn quad_count(&self) -> usize {
        self.faces
            .iter()
            .filter(|f| matches!(f, Face::Quad(..)))
            .count()
    }

    /// Iterates over every face as triangles
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.faces.iter().flat_map(|f| f.triangles())
    }

    /// Returns the axis-aligned bounds of the vertices, or `None` if empty
    pub fn bounds(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let mut iter = self.vertices.iter();
        let first = *iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.inf(v), hi.sup(v))))
    }

    /// Checks that every face index refers to an existing vertex
    pub fn is_valid(&self) -> bool {
        let n = self.vertices.len();
        self.faces.iter().all(|f| f.indices().iter().all(|&i| i < n))
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Output file format
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum MeshFormat {
    /// Binary STL (triangles only)
    Stl,
    /// ASCII STL (triangles only)
    StlAscii,
    /// Wavefront OBJ (triangles and quads)
    Obj,
}

impl MeshFormat {
    /// Picks a format from a file extension (case-insensitive)
    ///
    /// `.stl` files are written as binary STL.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "stl" => Ok(MeshFormat::Stl),
            "obj" => Ok(MeshFormat::Obj),
            _ => Err(Error::UnknownFormat(ext)),
        }
    }
}

impl std::str::FromStr for MeshFormat {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        use strum::IntoEnumIterator;
        let tag = s.trim().to_ascii_lowercase();
        Self::iter()
            .find(|f| f.to_string() == tag)
            .ok_or_else(|| Error::UnknownFormat(s.to_owned()))
    }
}

impl Mesh {
    /// Writes the mesh to `out` in the given format
    pub fn write<W: std::io::Write>(
        &self,
        out: &mut W,
        format: MeshFormat,
    ) -> Result<(), Error> {
        match format {
            MeshFormat::Stl => self.write_stl(out),
            MeshFormat::StlAscii => self.write_stl_ascii(out),
            MeshFormat::Obj => self.write_obj(out),
        }
    }
}
