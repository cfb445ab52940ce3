//! Wind speed and direction time series from u/v wind components.
//!
//! Components are converted to speed and direction at each of the eight
//! cube corners before interpolating, so the result is an interpolation of
//! speeds and directions rather than of the vector components themselves.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tensor::{extract_cube, GridPosition, Tensor, UnitCube};
use super::trilinear::{estimate, EstimatedValue};
use crate::error::{GridwindError, Result};

/// Speed and meteorological direction derived from one u/v sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindCorner {
    /// Euclidean norm of the components
    pub speed: f64,
    /// Direction the wind blows from, in degrees within `(-180, 180]`
    pub direction: f64,
}

impl WindCorner {
    pub fn from_components(u: f64, v: f64) -> Self {
        Self {
            speed: (u * u + v * v).sqrt(),
            direction: (-u).atan2(-v).to_degrees(),
        }
    }
}

/// Point time series aligned by time index.
///
/// Every populated sequence has one entry per time step. The scalar fields
/// are only present when the corresponding input field was available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedSeries {
    pub speed: Vec<f64>,
    pub speed_uncertainty: Vec<f64>,
    pub direction: Vec<f64>,
    pub direction_uncertainty: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_coverage: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_humidity: Option<Vec<f64>>,
}

impl InterpolatedSeries {
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            speed: Vec::with_capacity(steps),
            speed_uncertainty: Vec::with_capacity(steps),
            direction: Vec::with_capacity(steps),
            direction_uncertainty: Vec::with_capacity(steps),
            cloud_coverage: None,
            relative_humidity: None,
        }
    }

    /// Number of time steps
    pub fn len(&self) -> usize {
        self.speed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speed.is_empty()
    }

    fn push(&mut self, speed: EstimatedValue, direction: EstimatedValue) {
        self.speed.push(speed.value);
        self.speed_uncertainty.push(speed.uncertainty);
        self.direction.push(direction.value);
        self.direction_uncertainty.push(direction.uncertainty);
    }
}

/// Interpolate wind speed and direction at a fixed grid position for every
/// time step.
///
/// `u` and `v` share the `[time, level, lat, lon]` `extents`; `target` holds
/// fractional `[level, lat, lon]` indices.
///
/// # Errors
///
/// - [`GridwindError::DimensionMismatch`] if `extents` is not four long,
///   `target` not three long, or either field does not match `extents`.
/// - [`GridwindError::GridBoundsExceeded`] if the unit cube around `target`
///   leaves the grid.
pub fn interpolate_wind<T>(
    u: &[T],
    v: &[T],
    extents: &[usize],
    target: &[f64],
) -> Result<InterpolatedSeries>
where
    T: Copy + Into<f64>,
{
    let u = Tensor::new(u, extents)?;
    let v = Tensor::new(v, extents).map_err(|e| match e {
        GridwindError::DimensionMismatch { message } => GridwindError::DimensionMismatch {
            message: format!("v component: {}", message),
        },
        other => other,
    })?;

    let position = GridPosition::new(target, u.extents())?;
    let origin = position.origin();
    let [frac_level, frac_lat, frac_lon] = position.fractions();

    debug!(
        ?origin,
        frac_level,
        frac_lat,
        frac_lon,
        steps = u.time_len(),
        "Interpolating wind field"
    );

    let mut series = InterpolatedSeries::with_capacity(u.time_len());

    for time_index in 0..u.time_len() {
        let u_cube = extract_cube(&u, origin, time_index);
        let v_cube = extract_cube(&v, origin, time_index);

        let corners: [WindCorner; 8] =
            std::array::from_fn(|i| WindCorner::from_components(u_cube.0[i], v_cube.0[i]));

        let speed_cube = UnitCube(corners.map(|c| c.speed));
        let direction_cube = UnitCube(corners.map(|c| c.direction));

        series.push(
            estimate(&speed_cube, frac_level, frac_lat, frac_lon),
            estimate(&direction_cube, frac_level, frac_lat, frac_lon),
        );
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_corner_from_components() {
        // Southerly wind: blowing towards the north comes from 180 degrees
        let corner = WindCorner::from_components(0.0, 5.0);
        assert_eq!(corner.speed, 5.0);
        assert!((corner.direction.abs() - 180.0).abs() < 1e-12);

        // Westerly wind: blowing towards the east comes from -90 degrees
        let corner = WindCorner::from_components(3.0, 0.0);
        assert_eq!(corner.speed, 3.0);
        assert!((corner.direction + 90.0).abs() < 1e-12);

        let corner = WindCorner::from_components(3.0, 4.0);
        assert_eq!(corner.speed, 5.0);
    }

    #[test]
    fn test_uniform_wind_field() {
        let extents = [6, 2, 2, 2];
        let u = vec![1.0_f32; 48];
        let v = vec![1.0_f32; 48];

        let series = interpolate_wind(&u, &v, &extents, &[0.5, 0.5, 0.5]).unwrap();

        assert_eq!(series.len(), 6);
        for t in 0..6 {
            assert!((series.speed[t] - 2.0_f64.sqrt()).abs() < 1e-12);
            assert!((series.direction[t] + 135.0).abs() < 1e-12);
            assert_eq!(series.speed_uncertainty[t], 0.0);
            assert_eq!(series.direction_uncertainty[t], 0.0);
        }
        assert!(series.cloud_coverage.is_none());
        assert!(series.relative_humidity.is_none());
    }

    #[test]
    fn test_speed_varies_with_level() {
        // u grows with level, v is zero: speed = |u|, uncertainty = level gradient
        let extents = [2, 2, 2, 2];
        let u: Vec<f64> = (0..16).map(|i| if (i / 4) % 2 == 0 { 2.0 } else { 6.0 }).collect();
        let v = vec![0.0; 16];

        let series = interpolate_wind(&u, &v, &extents, &[0.25, 0.0, 0.0]).unwrap();

        for t in 0..2 {
            assert!((series.speed[t] - 3.0).abs() < 1e-12);
            assert!((series.speed_uncertainty[t] - 4.0).abs() < 1e-12);
            assert!((series.direction[t] + 90.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_time_steps_are_independent() {
        let extents = [3, 2, 2, 2];
        let u: Vec<f32> = (0..24).map(|i| (i / 8) as f32).collect();
        let v = vec![0.0_f32; 24];

        let series = interpolate_wind(&u, &v, &extents, &[0.5, 0.5, 0.5]).unwrap();

        assert_eq!(series.speed, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let u = vec![0.0_f32; 8];
        let v = vec![0.0_f32; 8];

        assert!(matches!(
            interpolate_wind(&u, &v, &[1, 2, 2], &[0.0, 0.0, 0.0]),
            Err(GridwindError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            interpolate_wind(&u, &v, &[1, 2, 2, 2], &[0.0, 0.0]),
            Err(GridwindError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            interpolate_wind(&u, &v[..4], &[1, 2, 2, 2], &[0.0, 0.0, 0.0]),
            Err(GridwindError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_target_on_far_corner() {
        // u is the flat sample index, so the far corner of step t holds 8t + 7
        let extents = [6, 2, 2, 2];
        let u: Vec<f32> = (0..48).map(|i| i as f32).collect();
        let v = vec![0.0_f32; 48];

        let series = interpolate_wind(&u, &v, &extents, &[1.0, 1.0, 1.0]).unwrap();

        assert_eq!(series.len(), 6);
        for t in 0..6 {
            assert_eq!(series.speed[t], (8 * t + 7) as f64);
            assert!((series.direction[t] + 90.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_target_past_last_sample() {
        let u = vec![1.0_f32; 48];
        let v = vec![1.0_f32; 48];

        assert!(matches!(
            interpolate_wind(&u, &v, &[6, 2, 2, 2], &[1.0, 0.5, 1.25]),
            Err(GridwindError::GridBoundsExceeded {
                axis: "longitude",
                ..
            })
        ));
    }

    #[test]
    fn test_single_sample_grid_is_out_of_bounds() {
        let u = vec![0.0_f32; 6];
        let v = vec![0.0_f32; 6];

        assert!(matches!(
            interpolate_wind(&u, &v, &[6, 1, 1, 1], &[0.0, 0.0, 0.0]),
            Err(GridwindError::GridBoundsExceeded { .. })
        ));
    }

    #[test]
    fn test_empty_time_axis() {
        let series = interpolate_wind::<f32>(&[], &[], &[0, 2, 2, 2], &[0.5, 0.5, 0.5]).unwrap();
        assert!(series.is_empty());
    }
}
