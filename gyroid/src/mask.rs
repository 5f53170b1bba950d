//! Radial trimming of a sampled grid
//!
//! Trimming runs between sampling and extraction: rejected nodes are forced
//! to [`OUTSIDE`] and lose their keep flag, so the extractor either skips the
//! cells around them or (with caps enabled) closes the surface against them.
use crate::{
    config::ThreadPool,
    grid::SampleGrid,
    params::{GenerationParameters, Trim},
};
use rayon::prelude::*;

/// Value written into rejected nodes; strictly outside the iso-level
pub const OUTSIDE: f32 = 1.0;

/// Keep / reject rule for a single node radius
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mask {
    trim: Trim,
    r1: f32,
    wall_thickness: f32,
}

impl Mask {
    /// Builds a mask from the trim fields of `params`
    pub fn new(params: &GenerationParameters) -> Self {
        Self {
            trim: params.trim,
            r1: params.r1,
            wall_thickness: params.wall_thickness,
        }
    }

    /// Checks whether a node at radius `r` survives trimming
    ///
    /// Both ends of each range are inclusive.
    pub fn keeps(&self, r: f32) -> bool {
        match self.trim {
            Trim::None => true,
            Trim::Band => r >= self.r1 - self.wall_thickness && r <= self.r1,
            Trim::Bound => r <= self.r1,
        }
    }

    /// Trims the grid in place, returning the number of rejected nodes
    pub fn apply(
        &self,
        grid: &mut SampleGrid,
        threads: Option<&ThreadPool>,
    ) -> usize {
        if self.trim == Trim::None {
            return 0;
        }
        let n = grid.resolution();
        let slab = n * n;
        let (radii, values, keep) = grid.trim_parts();

        let trim = |((r, v), k): ((&[f32], &mut [f32]), &mut [bool])| {
            let mut rejected = 0usize;
            for ((r, v), k) in r.iter().zip(v.iter_mut()).zip(k.iter_mut()) {
                if !self.keeps(*r) {
                    *v = OUTSIDE;
                    *k = false;
                    rejected += 1;
                }
            }
            rejected
        };
        match threads {
            Some(pool) => pool.run(|| {
                radii
                    .par_chunks(slab)
                    .zip(values.par_chunks_mut(slab))
                    .zip(keep.par_chunks_mut(slab))
                    .map(trim)
                    .sum()
            }),
            None => radii
                .chunks(slab)
                .zip(values.chunks_mut(slab))
                .zip(keep.chunks_mut(slab))
                .map(trim)
                .sum(),
        }
    }
}
