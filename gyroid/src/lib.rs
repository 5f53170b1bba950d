//! Gyroid is a library for generating triply-periodic minimal surface (TPMS)
//! lattices as printable meshes.
//!
//! A lattice is described by a scalar **field** `f(x, y, z)`.  By convention,
//! if `f(x, y, z) < 0`, then that position is **inside** the lattice; if it's
//! `>= 0`, it's **outside**, and the surface itself is the set where `f = 0`.
//!
//! Generation is a straight pipeline:
//! - The [field](crate::field) is sampled over a regular 3D
//!   [grid](crate::grid), after mapping grid coordinates into physical space
//!   (optionally bending the block into a cylinder)
//! - The grid is [trimmed](crate::mask) by radius, forcing rejected nodes
//!   outside the surface
//! - The zero-level surface is [extracted](crate::mesh::extract) as an indexed
//!   mesh of triangles and quads
//! - The mesh is written out as STL or OBJ
//!
//! All of this is driven by a single [`GenerationParameters`] value:
//!
//! ```
//! use gyroid::{GenerationParameters, Trim, Variant};
//!
//! let params = GenerationParameters {
//!     resolution: 20,
//!     variant: Variant::Radial,
//!     trim: Trim::Band,
//!     ..Default::default()
//! };
//! let mesh = gyroid::generate(&params)?;
//! assert!(mesh.is_valid());
//! # Ok::<(), gyroid::Error>(())
//! ```
//!
//! Bad parameters are reported as configuration errors before any sampling
//! takes place:
//!
//! ```
//! use gyroid::{Error, GenerationParameters};
//!
//! let params = GenerationParameters {
//!     resolution: 1,
//!     ..Default::default()
//! };
//! let err = gyroid::generate(&params).unwrap_err();
//! assert!(matches!(err, Error::BadResolution(1)));
//! ```
//!
//! Sampling, trimming, and extraction can run on a thread pool; see
//! [`generate_with`] and [`Settings`].
#![warn(missing_docs)]

pub mod config;
pub mod field;
pub mod grid;
pub mod mask;
pub mod mesh;
pub mod params;

mod error;
pub use error::Error;

pub use config::{Settings, ThreadPool};
pub use mesh::{Face, Mesh, MeshFormat};
pub use params::{GenerationParameters, Trim, Variant};

use std::path::Path;

/// Generates a lattice mesh in the calling thread
///
/// This is equivalent to [`generate_with`] using default [`Settings`].
pub fn generate(params: &GenerationParameters) -> Result<Mesh, Error> {
    generate_with(params, &Settings::default())
}

/// Generates a lattice mesh with the given settings
///
/// An empty mesh (e.g. from a zero-width trim band) is not an error.
pub fn generate_with(
    params: &GenerationParameters,
    settings: &Settings,
) -> Result<Mesh, Error> {
    let threads = settings.threads;
    let mut grid = grid::SampleGrid::sample(params, threads)?;
    mask::Mask::new(params).apply(&mut grid, threads);
    Ok(mesh::extract(&grid, params.caps, threads))
}

/// Writes a mesh to a file at `path` in the given format
///
/// The file is created (or truncated) and closed before this returns.
pub fn export<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    format: MeshFormat,
) -> Result<(), Error> {
    let mut f = std::fs::File::create(path)?;
    mesh.write(&mut f, format)
}
