//! Error types for gridwind.
//!
//! The interpolation core surfaces four kinds of failure (an unbracketed
//! coordinate, an out-of-range fractional index, inconsistent dimensions and a
//! unit cube that would leave the grid). Everything else comes from the
//! collaborators around it: file reading, configuration and report writing.

use thiserror::Error;

/// The main error type for gridwind operations.
#[derive(Error, Debug)]
pub enum GridwindError {
    /// No adjacent pair of axis samples brackets the requested value
    #[error("Value not found: {value} is not bracketed by any adjacent pair of the axis")]
    ValueNotFound { value: f64 },

    /// A fractional index fell outside the interpolable range of an array
    #[error("Index out of range: fractional index {index} is not within [0, {len} - 2]")]
    IndexOutOfRange { index: f64, len: usize },

    /// Tensor extents or target coordinates have the wrong arity or size
    #[error("Dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// The unit cube around a target would read past the end of an axis
    #[error("Grid bounds exceeded on {axis} axis: floor index {floor} needs {floor} + 1 < {extent}")]
    GridBoundsExceeded {
        axis: &'static str,
        floor: i64,
        extent: usize,
    },

    /// NetCDF file operation errors
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Array shape errors while assembling loaded data
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Time axis units that cannot be interpreted
    #[error("Invalid time units: {message}")]
    TimeUnits { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with GridwindError
pub type Result<T> = std::result::Result<T, GridwindError>;
