//! In-memory representation of a gridded wind dataset.
//!
//! Holds the coordinate axes and the unpacked 4-D fields that the extraction
//! pipeline interpolates. Fields are `[time, level, latitude, longitude]`
//! arrays in standard (row-major) layout.

use chrono::NaiveDateTime;
use ndarray::Array4;

use crate::error::{GridwindError, Result};

/// Coordinates and fields read from one dataset
#[derive(Debug, Clone)]
pub struct WindDataset {
    /// Timestamp of each time index
    pub time: Vec<NaiveDateTime>,
    /// Pressure of each level, in hPa
    pub level_pressure_hpa: Vec<f64>,
    /// Altitude of each level, in km
    pub level_altitude_km: Vec<f64>,
    /// Degrees north
    pub latitude: Vec<f64>,
    /// Degrees east, after the configured offset was applied
    pub longitude: Vec<f64>,
    /// Eastward wind component, m/s
    pub u: Array4<f32>,
    /// Northward wind component, m/s
    pub v: Array4<f32>,
    pub relative_humidity: Option<Array4<f32>>,
    pub cloud_cover: Option<Array4<f32>>,
}

impl WindDataset {
    /// The `[time, level, lat, lon]` extents shared by every field
    pub fn extents(&self) -> [usize; 4] {
        let (time, level, lat, lon) = self.u.dim();
        [time, level, lat, lon]
    }

    /// Names of the fields that are present
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec!["u", "v"];
        if self.relative_humidity.is_some() {
            names.push("relative_humidity");
        }
        if self.cloud_cover.is_some() {
            names.push("cloud_cover");
        }
        names
    }

    /// Approximate number of bytes held by the fields
    pub fn memory_usage(&self) -> usize {
        let per_field = self.u.len() * std::mem::size_of::<f32>();
        per_field * self.field_names().len()
    }

    /// Validate that the fields and axes describe the same grid
    pub fn validate(&self) -> Result<()> {
        let extents = self.extents();

        let fields = [
            ("v", Some(&self.v)),
            ("relative_humidity", self.relative_humidity.as_ref()),
            ("cloud_cover", self.cloud_cover.as_ref()),
        ];
        for (name, field) in fields {
            if let Some(field) = field {
                if field.shape() != &extents[..] {
                    return Err(GridwindError::DimensionMismatch {
                        message: format!(
                            "Field {} has shape {:?} but u has {:?}",
                            name,
                            field.shape(),
                            extents
                        ),
                    });
                }
            }
        }

        let axes = [
            ("time", self.time.len(), extents[0]),
            ("level pressure", self.level_pressure_hpa.len(), extents[1]),
            ("level altitude", self.level_altitude_km.len(), extents[1]),
            ("latitude", self.latitude.len(), extents[2]),
            ("longitude", self.longitude.len(), extents[3]),
        ];
        for (name, len, extent) in axes {
            if len != extent {
                return Err(GridwindError::DimensionMismatch {
                    message: format!(
                        "Coordinate {} has {} values but the fields have extent {}",
                        name, len, extent
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Flat samples of a field, ready for the interpolators
pub fn field_samples(field: &Array4<f32>) -> Result<&[f32]> {
    field
        .as_slice()
        .ok_or_else(|| GridwindError::DimensionMismatch {
            message: "field is not stored in standard layout".to_string(),
        })
}
