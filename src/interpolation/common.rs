//! One-dimensional building blocks shared by the grid interpolators.
//!
//! [`coord_to_index`] inverts a coordinate axis (physical value to fractional
//! index) and [`interpolate_1d`] goes the other way. Both use the same linear
//! model, so sampling an axis at the index found for a value gives that value
//! back.

use tracing::trace;

use crate::error::{GridwindError, Result};

/// Map a coordinate value to a fractional grid index.
///
/// Adjacent pairs are scanned in order and the first pair bracketing `coord`
/// (inclusive on both ends) wins. Each pair may be ascending or descending, so
/// axes such as latitude stored north to south work without reordering. The
/// result is only meaningful when the axis is monotonic around `coord`.
///
/// # Errors
///
/// [`GridwindError::ValueNotFound`] when no pair brackets `coord`, which covers
/// values outside the axis range, NaN and axes with fewer than two samples.
pub fn coord_to_index<T>(coord: f64, coord_values: &[T]) -> Result<f64>
where
    T: Copy + Into<f64>,
{
    for (i, pair) in coord_values.windows(2).enumerate() {
        let lower: f64 = pair[0].into();
        let upper: f64 = pair[1].into();

        // A flat pair sitting exactly on the target would divide by zero
        if lower == coord && upper == coord {
            return Ok(i as f64);
        }

        if lower <= coord && coord <= upper {
            let index = i as f64 + (coord - lower) / (upper - lower);
            trace!(coord, index, "Located value on ascending pair");
            return Ok(index);
        }

        if lower >= coord && coord >= upper {
            let index = (i + 1) as f64 - (coord - upper) / (lower - upper);
            trace!(coord, index, "Located value on descending pair");
            return Ok(index);
        }
    }

    Err(GridwindError::ValueNotFound { value: coord })
}

/// Evaluate `values` at a fractional index by linear interpolation between
/// `values[floor(index)]` and `values[floor(index) + 1]`.
///
/// # Errors
///
/// [`GridwindError::IndexOutOfRange`] unless `0 <= floor(index) <= len - 2`.
pub fn interpolate_1d<T>(values: &[T], index: f64) -> Result<f64>
where
    T: Copy + Into<f64>,
{
    let floor = index.floor();

    // Written so that NaN fails the check as well
    if !(floor >= 0.0 && floor + 2.0 <= values.len() as f64) {
        return Err(GridwindError::IndexOutOfRange {
            index,
            len: values.len(),
        });
    }

    let i = floor as usize;
    Ok(lerp(values[i].into(), values[i + 1].into(), index - floor))
}

/// Get the weights for linear interpolation
pub fn linear_weight(fraction: f64) -> (f64, f64) {
    (1.0 - fraction, fraction)
}

/// Blend two samples: `v0 * (1 - fraction) + v1 * fraction`.
///
/// Evaluated in this form (rather than `v0 + (v1 - v0) * fraction`) so that
/// fractions of exactly 0 and 1 reproduce the end samples bit for bit.
#[inline]
pub fn lerp(v0: f64, v1: f64, fraction: f64) -> f64 {
    let (w0, w1) = linear_weight(fraction);
    v0 * w0 + v1 * w1
}
