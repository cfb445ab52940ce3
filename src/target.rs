//! Resolving a physical target point into fractional grid indices.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::WindDataset;
use crate::error::Result;
use crate::interpolation::coord_to_index;

/// A point in physical coordinates, e.g. the summit of a volcano.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
    /// Meters above sea level
    pub altitude_m: f64,
}

impl TargetPosition {
    pub fn altitude_km(&self) -> f64 {
        self.altitude_m * 0.001
    }
}

/// Fractional `[level, lat, lon]` indices of `target` on the dataset grid.
///
/// The level index is found on the altitude axis, so the target altitude must
/// fall between two pressure levels of the dataset.
pub fn resolve_target(dataset: &WindDataset, target: &TargetPosition) -> Result<[f64; 3]> {
    let level = coord_to_index(target.altitude_km(), &dataset.level_altitude_km)?;
    let lat = coord_to_index(target.latitude, &dataset.latitude)?;
    let lon = coord_to_index(target.longitude, &dataset.longitude)?;

    debug!(
        target = target.name.as_deref().unwrap_or("unnamed"),
        level, lat, lon, "Resolved target to grid indices"
    );

    Ok([level, lat, lon])
}
