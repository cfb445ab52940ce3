//! # gridwind
//!
//! Extracts a single-point time series of wind speed, wind direction and
//! ancillary scalar fields from four-dimensional gridded atmospheric data
//! indexed by `(time, level, latitude, longitude)`.
//!
//! ## Architecture
//!
//! - **Interpolation core** ([`interpolation`]): pure functions that turn a
//!   physical coordinate into a fractional grid index, pull the unit cube
//!   around a point out of a flat tensor and interpolate it trilinearly, once
//!   per time step.
//! - **Data layer** ([`data_loader`], [`dataset`]): reads coordinate axes and
//!   fields from NetCDF, unpacking stored scale/offset factors.
//! - **Pipeline** ([`target`], [`extract`], [`report`]): resolves a target
//!   position, runs the interpolators and writes the report.

pub mod config;
#[cfg(feature = "netcdf")]
pub mod data_loader;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod interpolation;
pub mod logging;
pub mod report;
pub mod target;
pub mod time_units;

pub use config::Config;
pub use dataset::WindDataset;
pub use error::{GridwindError, Result};
pub use extract::{extract_point_series, PointSeries};
pub use interpolation::{
    coord_to_index, estimate, extract_cube, interpolate_1d, interpolate_value, interpolate_wind,
    EstimatedValue, InterpolatedSeries, Tensor, UnitCube, WindCorner,
};
pub use logging::{
    generate_run_id, init_tracing, log_data_load_stats, log_error, log_operation_end,
    log_operation_start, log_timed_operation,
};
pub use target::{resolve_target, TargetPosition};
