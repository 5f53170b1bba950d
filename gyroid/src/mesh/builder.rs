use super::{Face, Mesh};
use nalgebra::Vector3;
use std::collections::HashMap;

/// Identifies a mesh vertex by the grid edge it lies on
///
/// Both values are flat node indexes with `lo <= hi`; a vertex sitting exactly
/// on a node uses that node for both.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EdgeKey {
    lo: usize,
    hi: usize,
}

impl EdgeKey {
    /// Builds a key for the edge between two nodes, in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Builds a key for a vertex lying exactly on a node
    pub fn node(n: usize) -> Self {
        Self { lo: n, hi: n }
    }
}

/// A vertex of an unindexed polygon
#[derive(Copy, Clone, Debug)]
pub struct PolyVertex {
    pub key: EdgeKey,
    pub pos: Vector3<f32>,
}

/// Container used during construction of a [`Mesh`]
///
/// Polygons are pushed in a single sequential pass, which assigns each
/// distinct [`EdgeKey`] one vertex index.
#[derive(Default)]
pub struct MeshBuilder {
    /// Map from grid edges to indexes in `out.vertices`
    map: HashMap<EdgeKey, usize>,
    out: Mesh,
}

impl MeshBuilder {
    /// Looks up the given vertex, adding it to the mesh if it's new
    pub fn get(&mut self, v: PolyVertex) -> usize {
        let next_vert = self.out.vertices.len();
        let out = &mut self.out;
        *self.map.entry(v.key).or_insert_with(|| {
            out.vertices.push(v.pos);
            next_vert
        })
    }

    /// Adds a polygon with 3 or 4 vertices
    ///
    /// Repeated vertices (from surfaces passing exactly through grid nodes)
    /// are collapsed; polygons left with fewer than 3 distinct vertices are
    /// dropped.
    pub fn push(&mut self, poly: &[PolyVertex]) {
        debug_assert!(poly.len() == 3 || poly.len() == 4);
        let mut idx = [0; 4];
        let mut n = 0;
        for v in poly {
            let i = self.get(*v);
            if n == 0 || idx[n - 1] != i {
                idx[n] = i;
                n += 1;
            }
        }
        if n > 1 && idx[n - 1] == idx[0] {
            n -= 1;
        }
        match n {
            3 => self.out.faces.push(Face::Triangle([idx[0], idx[1], idx[2]])),
            4 => self.out.faces.push(Face::Quad(idx)),
            _ => (),
        }
    }

    pub fn take(self) -> Mesh {
        self.out
    }
}
