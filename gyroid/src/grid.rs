//! Structured sample grid and field sampling
use crate::{
    Error,
    config::ThreadPool,
    field::Field,
    params::{GenerationParameters, Variant},
};
use nalgebra::Vector3;
use rayon::prelude::*;
use std::f32::consts::TAU;

/// Dense `res³` lattice of physical positions and field values
///
/// Node `(i, j, k)` lives at `(i * res + j) * res + k`, so the first axis
/// varies slowest.  Each node also carries the radius used for trimming and
/// a keep flag, which is cleared by the [mask stage](crate::mask).
pub struct SampleGrid {
    resolution: usize,
    positions: Vec<Vector3<f32>>,
    values: Vec<f32>,
    radii: Vec<f32>,
    keep: Vec<bool>,
}

/// Returns `n` evenly spaced samples on `[0, end]`, inclusive
fn linspace(end: f32, n: usize) -> Vec<f32> {
    let d = (n - 1) as f32;
    (0..n).map(|i| i as f32 / d * end).collect()
}

/// Per-request sampling constants
struct Sampler {
    field: Field,
    u: Vec<f32>,
    v: Vec<f32>,
    w: Vec<f32>,
    a: f32,
    b: f32,
    r1: f32,
    r2: f32,
    phi_scale: f32,
}

impl Sampler {
    fn new(params: &GenerationParameters) -> Self {
        let n = params.resolution;
        Self {
            field: Field::new(params),
            u: linspace(params.a, n),
            v: linspace(params.b, n),
            w: linspace(params.c, n),
            a: params.a,
            b: params.b,
            r1: params.r1,
            r2: params.r2,
            phi_scale: params.phi_scale,
        }
    }

    /// Returns `(position, value, radius)` for a single node
    fn node(&self, i: usize, j: usize, k: usize) -> (Vector3<f32>, f32, f32) {
        let (u, v, z) = (self.u[i], self.v[j], self.w[k]);
        match self.field.variant() {
            Variant::Radial => {
                let r = (self.r2 - self.r1) / self.a * u + self.r1;
                let (s, c) = (v * TAU / self.b).sin_cos();
                let pos = Vector3::new(r * c, r * s, z);
                let value =
                    self.field.eval(Vector3::new(u, v * self.phi_scale, z));
                (pos, value, r)
            }
            Variant::Cartesian | Variant::Diamond => {
                let pos = Vector3::new(u, v, z);
                let r = (u - self.a / 2.0).hypot(v - self.b / 2.0);
                (pos, self.field.eval(pos), r)
            }
        }
    }

    /// Fills one slab of constant `i`
    fn fill(
        &self,
        i: usize,
        pos: &mut [Vector3<f32>],
        val: &mut [f32],
        rad: &mut [f32],
    ) {
        let n = self.w.len();
        for j in 0..n {
            for k in 0..n {
                let o = j * n + k;
                (pos[o], val[o], rad[o]) = self.node(i, j, k);
            }
        }
    }
}

impl SampleGrid {
    /// Samples the field described by `params`
    ///
    /// `params` are validated first, so the grid always has at least two
    /// samples per axis.  If `threads` is provided, slabs are evaluated in
    /// parallel on that pool.
    pub fn sample(
        params: &GenerationParameters,
        threads: Option<&ThreadPool>,
    ) -> Result<Self, Error> {
        params.validate()?;
        let n = params.resolution;
        let slab = n * n;
        let total = params.node_count();
        let mut positions = vec![Vector3::zeros(); total];
        let mut values = vec![0.0; total];
        let mut radii = vec![0.0; total];

        let sampler = Sampler::new(params);
        match threads {
            Some(pool) => pool.run(|| {
                positions
                    .par_chunks_mut(slab)
                    .zip(values.par_chunks_mut(slab))
                    .zip(radii.par_chunks_mut(slab))
                    .enumerate()
                    .for_each(|(i, ((p, v), r))| sampler.fill(i, p, v, r))
            }),
            None => positions
                .chunks_mut(slab)
                .zip(values.chunks_mut(slab))
                .zip(radii.chunks_mut(slab))
                .enumerate()
                .for_each(|(i, ((p, v), r))| sampler.fill(i, p, v, r)),
        }

        Ok(Self {
            resolution: n,
            positions,
            values,
            radii,
            keep: vec![true; total],
        })
    }

    /// Number of samples along each axis
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether the grid has no nodes (never true for a sampled grid)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts a 3D node coordinate into a flat index
    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.resolution);
        debug_assert!(j < self.resolution);
        debug_assert!(k < self.resolution);
        (i * self.resolution + j) * self.resolution + k
    }

    /// Physical node positions
    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    /// Field values, after any trimming
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Per-node radius used by the trim stage
    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    /// Per-node keep flags; `false` marks a trimmed node
    pub fn keep(&self) -> &[bool] {
        &self.keep
    }

    /// Borrows radii immutably alongside mutable values and keep flags
    pub(crate) fn trim_parts(&mut self) -> (&[f32], &mut [f32], &mut [bool]) {
        (&self.radii, &mut self.values, &mut self.keep)
    }
}
