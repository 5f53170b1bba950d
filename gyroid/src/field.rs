//! Closed-form TPMS field evaluation
//!
//! A [`Field`] bakes the per-variant frequency scales out of a
//! [`GenerationParameters`], then maps evaluation coordinates to a scalar.
//! By convention, negative values are **inside** and positive values are
//! **outside**; the surface is the zero set.
use crate::params::{GenerationParameters, Variant};
use nalgebra::{Vector2, Vector3};
use std::f32::consts::TAU;

/// Gyroid in `sin · cos` form, evaluated at already-scaled coordinates
///
/// ```
/// # use gyroid::field::gyroid;
/// # use nalgebra::Vector3;
/// assert_eq!(gyroid(Vector3::zeros()), 0.0);
/// ```
pub fn gyroid(p: Vector3<f32>) -> f32 {
    let (sx, cx) = p.x.sin_cos();
    let (sy, cy) = p.y.sin_cos();
    let (sz, cz) = p.z.sin_cos();
    sx * cy + sy * cz + sz * cx
}

/// Gyroid in `cos · sin` form, used by the radial variant
pub fn gyroid_cs(p: Vector3<f32>) -> f32 {
    let (sx, cx) = p.x.sin_cos();
    let (sy, cy) = p.y.sin_cos();
    let (sz, cz) = p.z.sin_cos();
    cx * sy + cy * sz + cz * sx
}

/// Schwarz diamond, evaluated at already-scaled coordinates
pub fn diamond(p: Vector3<f32>) -> f32 {
    let (sx, cx) = p.x.sin_cos();
    let (sy, cy) = p.y.sin_cos();
    let (sz, cz) = p.z.sin_cos();
    sx * sy * sz + sx * cy * cz + cx * sy * cz + cx * cy * sz
}

/// Parameterized field evaluator
#[derive(Copy, Clone, Debug)]
pub struct Field {
    variant: Variant,
    /// Per-axis angular frequency (radians per unit length)
    scale: Vector3<f32>,
    /// Number of rotated copies averaged together (1 for a plain field)
    arcs: u32,
    /// Rotation between copies: a shift of the angular coordinate for radial
    /// shapes, an angle about the block's vertical center line otherwise
    arc_step: f32,
    center: Vector2<f32>,
    sheet_thickness: Option<f32>,
}

impl Field {
    /// Builds a field evaluator from (validated) parameters
    pub fn new(params: &GenerationParameters) -> Self {
        let scale = match params.variant {
            Variant::Radial => Vector3::new(
                TAU * params.cell_radius / params.a,
                TAU * params.cell_radius / params.b,
                TAU * params.cell_height / params.c,
            ),
            Variant::Cartesian | Variant::Diamond => Vector3::new(
                TAU * params.density / params.a,
                TAU * params.density / params.b,
                TAU * params.density / params.c,
            ),
        };
        let arcs = params.arc_count.unwrap_or(1).max(1);
        let arc_step = match params.variant {
            Variant::Radial => params.phi_scale * params.b / arcs as f32,
            Variant::Cartesian | Variant::Diamond => TAU / arcs as f32,
        };
        Self {
            variant: params.variant,
            scale,
            arcs,
            arc_step,
            center: Vector2::new(params.a / 2.0, params.b / 2.0),
            sheet_thickness: params.sheet_thickness,
        }
    }

    /// Returns the active shape variant
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Evaluates the raw TPMS function, ignoring sheet thickening
    ///
    /// For the radial variant, `p` is `(r_aux, φ · phi_scale, z)`; otherwise
    /// it's a physical position.  With an arc count of `n`, this is the mean
    /// of `n` copies rotated about the lattice axis by multiples of `2π / n`.
    pub fn surface(&self, p: Vector3<f32>) -> f32 {
        if self.arcs == 1 {
            return self.tpms(p);
        }
        let sum: f32 = (0..self.arcs).map(|i| self.tpms(self.arc(p, i))).sum();
        sum / self.arcs as f32
    }

    /// Single copy of the TPMS function
    fn tpms(&self, p: Vector3<f32>) -> f32 {
        let q = p.component_mul(&self.scale);
        match self.variant {
            Variant::Radial => gyroid_cs(q),
            Variant::Cartesian => gyroid(q),
            Variant::Diamond => diamond(q),
        }
    }

    /// Rotates `p` into the frame of the `i`th copy
    fn arc(&self, p: Vector3<f32>, i: u32) -> Vector3<f32> {
        let t = i as f32 * self.arc_step;
        match self.variant {
            Variant::Radial => Vector3::new(p.x, p.y + t, p.z),
            Variant::Cartesian | Variant::Diamond => {
                let d = p.xy() - self.center;
                let (s, c) = t.sin_cos();
                Vector3::new(
                    self.center.x + c * d.x - s * d.y,
                    self.center.y + s * d.x + c * d.y,
                    p.z,
                )
            }
        }
    }

    /// Evaluates the field at the given coordinates
    pub fn eval(&self, p: Vector3<f32>) -> f32 {
        let v = self.surface(p);
        match self.sheet_thickness {
            Some(t) => v.abs() - t,
            None => v,
        }
    }
}
