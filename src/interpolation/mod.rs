//! Spatiotemporal interpolation on four-dimensional atmospheric grids.
//!
//! Fields are laid out as `[time, level, latitude, longitude]` with the last
//! axis varying fastest. A target point is expressed as three fractional grid
//! indices (level, latitude, longitude); for every time step the eight samples
//! around it are pulled out as a unit cube and interpolated trilinearly.
//!
//! The functions here are pure: they take plain slices and return values,
//! never touching files or global state.

pub mod common;
pub mod scalar;
pub mod tensor;
pub mod trilinear;
pub mod wind;

pub use common::{coord_to_index, interpolate_1d, lerp, linear_weight};
pub use scalar::interpolate_value;
pub use tensor::{extract_cube, CubeOrigin, GridPosition, Tensor, UnitCube};
pub use trilinear::{estimate, EstimatedValue};
pub use wind::{interpolate_wind, InterpolatedSeries, WindCorner};
