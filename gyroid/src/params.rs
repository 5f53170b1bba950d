//! Generation parameters and their validation
use crate::Error;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Upper bound on `resolution³`, to avoid runaway allocation
pub const MAX_NODES: usize = 10_000_000;

/// Shape variant, selecting both the field formula and the coordinate mapping
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    /// Gyroid evaluated in `(r_aux, φ, z)` space, then bent into a cylinder
    #[default]
    Radial,
    /// Gyroid on a plain Cartesian block
    Cartesian,
    /// Schwarz diamond on a plain Cartesian block
    Diamond,
}

impl std::str::FromStr for Variant {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        let tag = s.trim().to_ascii_lowercase();
        Self::iter()
            .find(|v| v.to_string() == tag)
            .ok_or_else(|| Error::UnknownVariant(s.to_owned()))
    }
}

/// Masking policy applied before extraction
///
/// Each policy compares a per-node radius `r` against
/// [`GenerationParameters::r1`]; comparisons are inclusive at both ends.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trim {
    /// Keep every node
    None,
    /// Keep a shell, `r1 - wall_thickness <= r <= r1`
    #[default]
    Band,
    /// Keep the interior, `r <= r1`
    Bound,
}

impl std::str::FromStr for Trim {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        let tag = s.trim().to_ascii_lowercase();
        Self::iter()
            .find(|v| v.to_string() == tag)
            .ok_or_else(|| Error::UnknownTrim(s.to_owned()))
    }
}

/// Parameters for a single generation request
///
/// The defaults describe a radial gyroid of radius 12 and height 10, sampled
/// at 80³ and trimmed to a nearly solid cylinder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Number of samples along each axis
    pub resolution: usize,

    /// Domain extent along the first axis (`r_aux` for radial shapes)
    pub a: f32,
    /// Domain extent along the second axis (`φ` for radial shapes)
    pub b: f32,
    /// Domain extent along the vertical axis
    pub c: f32,

    /// Radius at `r_aux = 0`; also the outer bound for trimming
    pub r1: f32,
    /// Radius at `r_aux = a`
    pub r2: f32,

    /// Multiplier applied to the angular coordinate before evaluation
    pub phi_scale: f32,

    /// Shell thickness for [`Trim::Band`]
    pub wall_thickness: f32,

    /// Number of cells across the radial and angular axes
    pub cell_radius: f32,
    /// Number of cells along the vertical axis
    pub cell_height: f32,

    /// Frequency multiplier for Cartesian and diamond shapes
    pub density: f32,

    /// Shape variant
    pub variant: Variant,

    /// Masking policy
    pub trim: Trim,

    /// Contour through trimmed nodes, closing the solid at the trim boundary
    ///
    /// When `false`, cells touching a trimmed node produce no geometry.
    pub caps: bool,

    /// If present, replaces the field `f` with `|f| - t`
    pub sheet_thickness: Option<f32>,

    /// If present, averages this many copies of the field rotated about the
    /// lattice axis, giving an `n`-fold rotational pattern
    ///
    /// Radial shapes only close seamlessly when `phi_scale * cell_radius` is
    /// a whole number.
    pub arc_count: Option<u32>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            resolution: 80,
            a: 24.0,
            b: 24.0,
            c: 10.0,
            r1: 12.0,
            r2: 0.0,
            phi_scale: 8.0,
            wall_thickness: 11.5,
            cell_radius: 2.0,
            cell_height: 3.0,
            density: 1.0,
            variant: Variant::default(),
            trim: Trim::default(),
            caps: false,
            sheet_thickness: None,
            arc_count: None,
        }
    }
}

impl GenerationParameters {
    /// Checks parameter invariants, returning the first violation
    pub fn validate(&self) -> Result<(), Error> {
        for (name, v) in [
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("r1", self.r1),
            ("r2", self.r2),
            ("phi_scale", self.phi_scale),
            ("wall_thickness", self.wall_thickness),
            ("cell_radius", self.cell_radius),
            ("cell_height", self.cell_height),
            ("density", self.density),
        ] {
            if !v.is_finite() {
                return Err(Error::NonFinite(name));
            }
        }

        if self.resolution < 2 {
            return Err(Error::BadResolution(self.resolution));
        }
        if self
            .resolution
            .checked_pow(3)
            .is_none_or(|n| n > MAX_NODES)
        {
            return Err(Error::ResolutionTooLarge(self.resolution, MAX_NODES));
        }

        for (name, v) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if v <= 0.0 {
                return Err(Error::BadExtent(name, v));
            }
        }
        for (name, v) in [("r1", self.r1), ("r2", self.r2)] {
            if v < 0.0 {
                return Err(Error::BadRadius(name, v));
            }
        }
        if self.wall_thickness < 0.0 {
            return Err(Error::BadWallThickness(self.wall_thickness));
        }
        if self.density <= 0.0 {
            return Err(Error::BadDensity(self.density));
        }
        match self.sheet_thickness {
            Some(t) if !t.is_finite() => {
                return Err(Error::NonFinite("sheet_thickness"));
            }
            Some(t) if t < 0.0 => return Err(Error::BadSheetThickness(t)),
            _ => (),
        }
        if self.arc_count == Some(0) {
            return Err(Error::BadArcCount(0));
        }
        Ok(())
    }

    /// Total number of grid nodes
    pub fn node_count(&self) -> usize {
        self.resolution.pow(3)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GenerationParameters::default().validate().unwrap();
    }

    #[test]
    fn bad_resolution() {
        let p = GenerationParameters {
            resolution: 1,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(Error::BadResolution(1))));

        let p = GenerationParameters {
            resolution: 1000,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(Error::ResolutionTooLarge(1000, MAX_NODES))
        ));
    }

    #[test]
    fn bad_extents() {
        for (a, b, c) in [(0.0, 1.0, 1.0), (1.0, -1.0, 1.0), (1.0, 1.0, 0.0)] {
            let p = GenerationParameters {
                a,
                b,
                c,
                ..Default::default()
            };
            let e = p.validate().unwrap_err();
            assert!(matches!(e, Error::BadExtent(..)), "{e}");
            assert!(e.is_configuration());
        }
    }

    #[test]
    fn bad_radius_and_thickness() {
        let p = GenerationParameters {
            r1: -1.0,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(Error::BadRadius("r1", _))));

        let p = GenerationParameters {
            wall_thickness: -0.5,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(Error::BadWallThickness(_))));

        let p = GenerationParameters {
            sheet_thickness: Some(-0.5),
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(Error::BadSheetThickness(_))));
    }

    #[test]
    fn arc_count() {
        let p = GenerationParameters {
            arc_count: Some(0),
            ..Default::default()
        };
        let e = p.validate().unwrap_err();
        assert!(matches!(e, Error::BadArcCount(0)), "{e}");
        assert!(e.is_configuration());

        let p = GenerationParameters {
            arc_count: Some(6),
            ..Default::default()
        };
        p.validate().unwrap();
    }

    #[test]
    fn r2_may_exceed_r1() {
        let p = GenerationParameters {
            r1: 2.0,
            r2: 10.0,
            ..Default::default()
        };
        p.validate().unwrap();
    }

    #[test]
    fn non_finite() {
        let p = GenerationParameters {
            phi_scale: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(Error::NonFinite("phi_scale"))));
    }

    #[test]
    fn parse_tags() {
        assert_eq!("radial".parse::<Variant>().unwrap(), Variant::Radial);
        assert_eq!("Diamond".parse::<Variant>().unwrap(), Variant::Diamond);
        assert_eq!(" bound ".parse::<Trim>().unwrap(), Trim::Bound);

        let e = "schwarz".parse::<Variant>().unwrap_err();
        assert!(matches!(&e, Error::UnknownVariant(s) if s == "schwarz"));
        assert!(e.is_configuration());
        assert!(matches!(
            "ring".parse::<Trim>(),
            Err(Error::UnknownTrim(..))
        ));
    }

    #[test]
    fn display_round_trips() {
        for v in Variant::iter() {
            assert_eq!(v.to_string().parse::<Variant>().unwrap(), v);
        }
        for t in Trim::iter() {
            assert_eq!(t.to_string().parse::<Trim>().unwrap(), t);
        }
    }
}
