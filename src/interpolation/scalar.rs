//! Point time series for scalar fields such as cloud cover or humidity.

use tracing::debug;

use super::tensor::{extract_cube, GridPosition, Tensor};
use super::trilinear::estimate;
use crate::error::Result;

/// Interpolate a scalar `field` at fractional `[level, lat, lon]` indices for
/// every time step. Fails the same way as
/// [`interpolate_wind`](super::wind::interpolate_wind).
pub fn interpolate_value<T>(field: &[T], extents: &[usize], target: &[f64]) -> Result<Vec<f64>>
where
    T: Copy + Into<f64>,
{
    let field = Tensor::new(field, extents)?;
    let position = GridPosition::new(target, field.extents())?;
    let [frac_level, frac_lat, frac_lon] = position.fractions();

    debug!(origin = ?position.origin(), steps = field.time_len(), "Interpolating scalar field");

    Ok((0..field.time_len())
        .map(|time_index| {
            let cube = extract_cube(&field, position.origin(), time_index);
            estimate(&cube, frac_level, frac_lat, frac_lon).value
        })
        .collect())
}
