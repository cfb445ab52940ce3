//! The point extraction pipeline: target resolution plus interpolation of
//! every available field.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::dataset::{field_samples, WindDataset};
use crate::error::Result;
use crate::interpolation::{interpolate_value, interpolate_wind, InterpolatedSeries};
use crate::target::{resolve_target, TargetPosition};

/// Interpolated series together with the timestamps they belong to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSeries {
    pub target: TargetPosition,
    /// Fractional `[level, lat, lon]` grid indices of the target
    pub grid_indices: [f64; 3],
    pub times: Vec<NaiveDateTime>,
    #[serde(flatten)]
    pub series: InterpolatedSeries,
}

/// Extract wind, and any available scalar fields, at `target` for every time
/// step of `dataset`.
pub fn extract_point_series(dataset: &WindDataset, target: &TargetPosition) -> Result<PointSeries> {
    let grid_indices = resolve_target(dataset, target)?;
    let extents = dataset.extents();

    let mut series = interpolate_wind(
        field_samples(&dataset.u)?,
        field_samples(&dataset.v)?,
        &extents,
        &grid_indices,
    )?;

    series.cloud_coverage = dataset
        .cloud_cover
        .as_ref()
        .map(|field| interpolate_value(field_samples(field)?, &extents, &grid_indices))
        .transpose()?;

    series.relative_humidity = dataset
        .relative_humidity
        .as_ref()
        .map(|field| interpolate_value(field_samples(field)?, &extents, &grid_indices))
        .transpose()?;

    info!(
        target = target.name.as_deref().unwrap_or("unnamed"),
        steps = series.len(),
        cloud_cover = series.cloud_coverage.is_some(),
        relative_humidity = series.relative_humidity.is_some(),
        "Extracted point series"
    );

    Ok(PointSeries {
        target: target.clone(),
        grid_indices,
        times: dataset.time.clone(),
        series,
    })
}
