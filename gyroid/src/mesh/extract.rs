//! Marching tetrahedra over a structured grid
use super::{
    Mesh,
    builder::{EdgeKey, MeshBuilder, PolyVertex},
    types::{Corner, TETRAHEDRA},
};
use crate::{config::ThreadPool, grid::SampleGrid};
use nalgebra::Vector3;
use rayon::prelude::*;

/// Unindexed polygon emitted by a single tetrahedron
#[derive(Copy, Clone, Debug)]
struct Polygon {
    verts: [PolyVertex; 4],
    len: usize,
}

impl Polygon {
    fn triangle(a: PolyVertex, b: PolyVertex, c: PolyVertex) -> Self {
        Self {
            verts: [a, b, c, c],
            len: 3,
        }
    }

    fn quad(a: PolyVertex, b: PolyVertex, c: PolyVertex, d: PolyVertex) -> Self {
        Self {
            verts: [a, b, c, d],
            len: 4,
        }
    }

    fn verts(&self) -> &[PolyVertex] {
        &self.verts[..self.len]
    }

    /// Unnormalized polygon normal, following the right-hand rule
    fn normal(&self) -> Vector3<f32> {
        let p = self.verts.map(|v| v.pos);
        if self.len == 3 {
            (p[1] - p[0]).cross(&(p[2] - p[0]))
        } else {
            (p[2] - p[0]).cross(&(p[3] - p[1]))
        }
    }

    /// Reverses the winding order if the normal opposes `dir`
    fn orient(mut self, dir: Vector3<f32>) -> Self {
        if self.normal().dot(&dir) < 0.0 {
            self.verts[..self.len].reverse();
        }
        self
    }
}

/// Extracts the zero-level surface of a (trimmed) grid
///
/// Nodes with negative values are inside.  When `caps` is false, any cell
/// touching a trimmed node is skipped; otherwise the trimmed values are
/// contoured like any other.
///
/// Cells are gathered per slab (in parallel if `threads` is provided), then
/// indexed in a single sequential pass, so the output is deterministic.
pub fn extract(
    grid: &SampleGrid,
    caps: bool,
    threads: Option<&ThreadPool>,
) -> Mesh {
    let cells = grid.resolution() - 1;
    let slabs: Vec<Vec<Polygon>> = match threads {
        Some(pool) => pool.run(|| {
            (0..cells)
                .into_par_iter()
                .map(|i| slab(grid, i, caps))
                .collect()
        }),
        None => (0..cells).map(|i| slab(grid, i, caps)).collect(),
    };

    let mut builder = MeshBuilder::default();
    for p in slabs.iter().flatten() {
        builder.push(p.verts());
    }
    builder.take()
}

/// Contours every cell whose first index is `i`
fn slab(grid: &SampleGrid, i: usize, caps: bool) -> Vec<Polygon> {
    let cells = grid.resolution() - 1;
    let values = grid.values();
    let keep = grid.keep();

    let mut out = vec![];
    for j in 0..cells {
        for k in 0..cells {
            let nodes: [usize; 8] = std::array::from_fn(|c| {
                let (di, dj, dk) = Corner::new(c as u8).offset();
                grid.index(i + di, j + dj, k + dk)
            });
            if !caps && nodes.iter().any(|&n| !keep[n]) {
                continue;
            }
            let inside = nodes.iter().filter(|&&n| values[n] < 0.0).count();
            if inside == 0 || inside == 8 {
                continue;
            }
            for t in TETRAHEDRA {
                let tet = t.map(|c| nodes[c.index()]);
                if let Some(p) = tetrahedron(grid, tet) {
                    out.push(p);
                }
            }
        }
    }
    out
}

/// Contours a single tetrahedron, given as four node indexes
fn tetrahedron(grid: &SampleGrid, tet: [usize; 4]) -> Option<Polygon> {
    let values = grid.values();
    let pos = grid.positions();

    let mut inside = [0; 4];
    let mut outside = [0; 4];
    let (mut ni, mut no) = (0, 0);
    for n in tet {
        if values[n] < 0.0 {
            inside[ni] = n;
            ni += 1;
        } else {
            outside[no] = n;
            no += 1;
        }
    }

    let x = |a, b| crossing(grid, a, b);
    let poly = match ni {
        1 => {
            let a = inside[0];
            Polygon::triangle(x(a, outside[0]), x(a, outside[1]), x(a, outside[2]))
        }
        2 => {
            let [a, b, ..] = inside;
            let [c, d, ..] = outside;
            Polygon::quad(x(a, c), x(a, d), x(b, d), x(b, c))
        }
        3 => {
            let d = outside[0];
            Polygon::triangle(x(inside[0], d), x(inside[1], d), x(inside[2], d))
        }
        _ => return None,
    };

    // Points from the inside of the shape to the outside
    let centroid = |nodes: &[usize]| {
        nodes.iter().map(|&n| pos[n]).sum::<Vector3<f32>>() / nodes.len() as f32
    };
    let dir = centroid(&outside[..no]) - centroid(&inside[..ni]);
    Some(poly.orient(dir))
}

/// Crossings this close to either end of an edge (as a fraction of its
/// length) are snapped onto the node
const SNAP: f32 = 1e-4;

/// Finds the zero crossing along the edge from an inside to an outside node
fn crossing(grid: &SampleGrid, inside: usize, outside: usize) -> PolyVertex {
    let values = grid.values();
    let pos = grid.positions();

    // Always interpolate from the lower index, so that every tetrahedron
    // sharing this edge computes a bitwise-identical position.
    let (a, b) = (inside.min(outside), inside.max(outside));
    let t = values[a] / (values[a] - values[b]);
    let node = |n: usize| PolyVertex {
        key: EdgeKey::node(n),
        pos: pos[n],
    };
    if t <= SNAP {
        node(a)
    } else if t >= 1.0 - SNAP {
        node(b)
    } else {
        PolyVertex {
            key: EdgeKey::new(a, b),
            pos: pos[a] + (pos[b] - pos[a]) * t,
        }
    }
}
