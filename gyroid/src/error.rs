//! Module containing the universal error type
use thiserror::Error;

/// Universal error type for lattice generation and export
#[derive(Error, Debug)]
pub enum Error {
    /// Resolution must be at least 2 samples per axis
    #[error("resolution must be at least 2 (got {0})")]
    BadResolution(usize),

    /// Resolution would allocate too many grid nodes
    #[error("resolution {0} exceeds the node limit of {1}")]
    ResolutionTooLarge(usize, usize),

    /// Domain extent is not positive
    #[error("extent `{0}` must be positive (got {1})")]
    BadExtent(&'static str, f32),

    /// Radius is negative
    #[error("radius `{0}` must be non-negative (got {1})")]
    BadRadius(&'static str, f32),

    /// Wall thickness is negative
    #[error("wall thickness must be non-negative (got {0})")]
    BadWallThickness(f32),

    /// Density factor is not positive
    #[error("density must be positive (got {0})")]
    BadDensity(f32),

    /// Sheet thickness is negative
    #[error("sheet thickness must be non-negative (got {0})")]
    BadSheetThickness(f32),

    /// Arc count is zero
    #[error("arc count must be at least 1 (got {0})")]
    BadArcCount(u32),

    /// A parameter is NaN or infinite
    #[error("parameter `{0}` is not finite")]
    NonFinite(&'static str),

    /// Unknown shape variant tag
    #[error("unknown shape variant `{0}`")]
    UnknownVariant(String),

    /// Unknown trim policy tag
    #[error("unknown trim policy `{0}`")]
    UnknownTrim(String),

    /// Unknown mesh file format
    #[error("unknown mesh format `{0}`")]
    UnknownFormat(String),

    /// Mesh file could not be parsed
    #[error("bad mesh file at line {0}: {1}")]
    BadMeshFile(usize, String),

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Checks whether this is a configuration error
    ///
    /// Configuration errors are caused by bad parameters and should be
    /// reported to the user rather than retried.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::Io(..) | Error::BadMeshFile(..))
    }
}
