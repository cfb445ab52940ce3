//! NetCDF data loading functionality.
//!
//! This module reads the coordinate axes and wind fields out of a NetCDF file
//! and converts them into a [`WindDataset`]. Packed variables are unpacked
//! with their `scale_factor` / `add_offset` attributes on read, so everything
//! downstream works in physical units.

use ndarray::Array4;
use netcdf::{AttributeValue, Variable};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::DataConfig;
use crate::dataset::WindDataset;
use crate::error::{GridwindError, Result};
use crate::logging::log_data_load_stats;
use crate::time_units::TimeReference;

/// Linear packing and fill values of a variable
#[derive(Debug, Clone, PartialEq)]
struct Packing {
    scale_factor: f64,
    add_offset: f64,
    fill_values: Vec<f64>,
}

impl Packing {
    fn of(var: &Variable) -> Result<Self> {
        let mut fill_values = Vec::new();
        for name in ["_FillValue", "missing_value"] {
            if let Some(value) = numeric_attribute(var, name)? {
                fill_values.push(value);
            }
        }

        Ok(Self {
            scale_factor: numeric_attribute(var, "scale_factor")?.unwrap_or(1.0),
            add_offset: numeric_attribute(var, "add_offset")?.unwrap_or(0.0),
            fill_values,
        })
    }

    fn is_identity(&self) -> bool {
        self.scale_factor == 1.0 && self.add_offset == 0.0 && self.fill_values.is_empty()
    }

    /// Raw stored value to physical value, NaN for fill values
    fn unpack(&self, raw: f64) -> f64 {
        if self.fill_values.iter().any(|&fill| raw == fill) {
            f64::NAN
        } else {
            raw * self.scale_factor + self.add_offset
        }
    }
}

/// Load the wind dataset described by `config` from a NetCDF file
pub fn load_wind_dataset(path: &Path, config: &DataConfig) -> Result<WindDataset> {
    // Check if the file exists
    if !path.exists() {
        return Err(GridwindError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let file = netcdf::open(path)?;

    info!("Opened NetCDF file: {}", path.display());
    debug!("File has {} variables", file.variables().count());
    debug!("File has {} dimensions", file.dimensions().count());

    let longitude: Vec<f64> = read_coordinate(&file, &config.longitude_variable)?
        .into_iter()
        .map(|lon| lon + config.longitude_offset)
        .collect();
    let latitude = read_coordinate(&file, &config.latitude_variable)?;

    let level_pressure_hpa = read_coordinate(&file, &config.level_variable)?;
    let level_altitude_km = level_pressure_hpa
        .iter()
        .map(|&pressure| {
            config
                .altitude_for_pressure(pressure)
                .ok_or_else(|| GridwindError::Config {
                    message: format!(
                        "No altitude configured for pressure level {} hPa",
                        pressure
                    ),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let time = read_time_axis(&file, &config.time_variable)?;

    let u = read_field(&file, &config.u_variable)?;
    let v = read_field(&file, &config.v_variable)?;

    let relative_humidity = match config
        .humidity_variables
        .iter()
        .find(|name| file.variable(name).is_some())
    {
        Some(name) => Some(read_field(&file, name)?),
        None => {
            debug!(candidates = ?config.humidity_variables, "No relative humidity variable found");
            None
        }
    };

    let cloud_cover = match config
        .cloud_cover_variable
        .as_deref()
        .filter(|name| file.variable(name).is_some())
    {
        Some(name) => Some(read_field(&file, name)?),
        None => None,
    };

    let dataset = WindDataset {
        time,
        level_pressure_hpa,
        level_altitude_km,
        latitude,
        longitude,
        u,
        v,
        relative_humidity,
        cloud_cover,
    };

    dataset.validate()?;

    log_data_load_stats(
        &path.display().to_string(),
        &dataset.field_names(),
        dataset.extents(),
        dataset.memory_usage(),
    );

    Ok(dataset)
}

fn required_variable<'f>(file: &'f netcdf::File, name: &str) -> Result<Variable<'f>> {
    file.variable(name)
        .ok_or_else(|| GridwindError::DataNotFound {
            message: format!("Variable not found: {}", name),
        })
}

/// Read a numeric attribute, taking the first element of array attributes
fn numeric_attribute(var: &Variable, name: &str) -> Result<Option<f64>> {
    let Some(attr) = var.attribute(name) else {
        return Ok(None);
    };

    let value = match attr.value()? {
        AttributeValue::Uchar(v) => Some(v as f64),
        AttributeValue::Schar(v) => Some(v as f64),
        AttributeValue::Short(v) => Some(v as f64),
        AttributeValue::Int(v) => Some(v as f64),
        AttributeValue::Float(v) => Some(v as f64),
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Shorts(v) => v.first().map(|&x| x as f64),
        AttributeValue::Floats(v) => v.first().map(|&x| x as f64),
        AttributeValue::Doubles(v) => v.first().copied(),
        other => {
            warn!(
                variable = %var.name(),
                attribute = name,
                value = ?other,
                "Ignoring non-numeric attribute"
            );
            None
        }
    };

    Ok(value)
}

/// Extract the values of a one-dimensional coordinate variable
fn read_coordinate(file: &netcdf::File, name: &str) -> Result<Vec<f64>> {
    let var = required_variable(file, name)?;

    if var.dimensions().len() != 1 {
        return Err(GridwindError::DimensionMismatch {
            message: format!(
                "Coordinate {} must be one-dimensional, it has {} dimensions",
                name,
                var.dimensions().len()
            ),
        });
    }

    let packing = Packing::of(&var)?;
    let values: Vec<f64> = var.get_values::<f64, _>(..)?;

    if packing.is_identity() {
        Ok(values)
    } else {
        Ok(values.into_iter().map(|v| packing.unpack(v)).collect())
    }
}

/// Read the time axis and convert it to timestamps
fn read_time_axis(file: &netcdf::File, name: &str) -> Result<Vec<chrono::NaiveDateTime>> {
    let var = required_variable(file, name)?;

    let reference = match var.attribute("units") {
        Some(attr) => match attr.value()? {
            AttributeValue::Str(units) => TimeReference::parse(&units)?,
            other => {
                return Err(GridwindError::TimeUnits {
                    message: format!("units attribute of {} is not text: {:?}", name, other),
                })
            }
        },
        None => {
            warn!(variable = name, "Time axis has no units, assuming hours since 1900-01-01");
            TimeReference::default()
        }
    };

    read_coordinate(file, name)?
        .into_iter()
        .map(|value| reference.to_datetime(value))
        .collect()
}

/// Read a `[time, level, lat, lon]` field and unpack it to physical units
fn read_field(file: &netcdf::File, name: &str) -> Result<Array4<f32>> {
    let var = required_variable(file, name)?;

    let shape: Vec<usize> = var.dimensions().iter().map(|dim| dim.len()).collect();
    let [time, level, lat, lon] = <[usize; 4]>::try_from(shape.as_slice()).map_err(|_| {
        GridwindError::DimensionMismatch {
            message: format!(
                "Variable {} must be four-dimensional [time, level, lat, lon], got shape {:?}",
                name, shape
            ),
        }
    })?;

    let packing = Packing::of(&var)?;
    debug!(variable = name, ?shape, ?packing, "Reading field");

    let raw: Vec<f32> = var.get_values::<f32, _>(..)?;
    let values = if packing.is_identity() {
        raw
    } else {
        raw.into_iter()
            .map(|v| packing.unpack(v as f64) as f32)
            .collect()
    };

    Ok(Array4::from_shape_vec((time, level, lat, lon), values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Write a 2 time x 2 level x 3 lat x 4 lon file with packed u
    fn create_test_netcdf_file(path: &Path, with_humidity: bool) -> Result<()> {
        let mut file = netcdf::create(path)?;

        file.add_dimension("time", 2)?;
        file.add_dimension("level", 2)?;
        file.add_dimension("latitude", 3)?;
        file.add_dimension("longitude", 4)?;

        {
            let mut var = file.add_variable::<f32>("longitude", &["longitude"])?;
            var.put_attribute("units", "degrees_east")?;
            var.put_values(&[286.0_f32, 287.0, 288.0, 289.0], ..)?;
        }
        {
            let mut var = file.add_variable::<f32>("latitude", &["latitude"])?;
            var.put_attribute("units", "degrees_north")?;
            var.put_values(&[-38.0_f32, -39.0, -40.0], ..)?;
        }
        {
            let mut var = file.add_variable::<i32>("level", &["level"])?;
            var.put_attribute("units", "millibars")?;
            var.put_values(&[700_i32, 750], ..)?;
        }
        {
            let mut var = file.add_variable::<f64>("time", &["time"])?;
            var.put_attribute("units", "hours since 1900-01-01 00:00:00.0")?;
            var.put_values(&[920_424.0_f64, 920_430.0], ..)?;
        }

        let dims = ["time", "level", "latitude", "longitude"];
        {
            let mut var = file.add_variable::<i16>("u", &dims)?;
            var.put_attribute("scale_factor", 0.5_f64)?;
            var.put_attribute("add_offset", 1.0_f64)?;
            var.put_attribute("_FillValue", -32767_i16)?;
            let mut raw: Vec<i16> = (0..48).map(|i| i as i16).collect();
            raw[47] = -32767;
            var.put_values(&raw, ..)?;
        }
        {
            let mut var = file.add_variable::<f32>("v", &dims)?;
            var.put_values(&vec![2.0_f32; 48], ..)?;
        }
        if with_humidity {
            let mut var = file.add_variable::<f32>("rh", &dims)?;
            var.put_values(&vec![75.0_f32; 48], ..)?;
        }

        Ok(())
    }

    #[test]
    fn test_file_not_found() {
        let result = load_wind_dataset(Path::new("/nonexistent/file.nc"), &DataConfig::default());
        assert!(result.is_err());
        match result.unwrap_err() {
            GridwindError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected IO error"),
        }
    }

    #[test]
    fn test_netcdf_loading() -> Result<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("wind.nc");
        create_test_netcdf_file(&file_path, true)?;

        let dataset = load_wind_dataset(&file_path, &DataConfig::default())?;

        assert_eq!(dataset.extents(), [2, 2, 3, 4]);
        assert_eq!(dataset.longitude, vec![-74.0, -73.0, -72.0, -71.0]);
        assert_eq!(dataset.latitude, vec![-38.0, -39.0, -40.0]);
        assert_eq!(dataset.level_pressure_hpa, vec![700.0, 750.0]);
        assert_eq!(dataset.level_altitude_km, vec![2.67, 2.31]);
        assert_eq!(dataset.time[0].to_string(), "2005-01-01 00:00:00");
        assert_eq!(dataset.time[1].to_string(), "2005-01-01 06:00:00");

        // u was stored packed: physical = raw * 0.5 + 1
        assert_eq!(dataset.u[[0, 0, 0, 0]], 1.0);
        assert_eq!(dataset.u[[0, 0, 0, 3]], 2.5);
        assert!(dataset.u[[1, 1, 2, 3]].is_nan());
        assert_eq!(dataset.v[[1, 0, 1, 2]], 2.0);

        assert!(dataset.relative_humidity.is_some());
        assert!(dataset.cloud_cover.is_none());

        Ok(())
    }

    #[test]
    fn test_optional_fields_absent() -> Result<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("wind.nc");
        create_test_netcdf_file(&file_path, false)?;

        let dataset = load_wind_dataset(&file_path, &DataConfig::default())?;
        assert!(dataset.relative_humidity.is_none());
        assert_eq!(dataset.field_names(), vec!["u", "v"]);

        Ok(())
    }

    #[test]
    fn test_missing_required_variable() -> Result<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("wind.nc");
        create_test_netcdf_file(&file_path, false)?;

        let config = DataConfig {
            u_variable: "ugrd".to_string(),
            ..DataConfig::default()
        };
        assert!(matches!(
            load_wind_dataset(&file_path, &config),
            Err(GridwindError::DataNotFound { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_unknown_pressure_level() -> Result<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("wind.nc");
        create_test_netcdf_file(&file_path, false)?;

        let mut config = DataConfig::default();
        config.level_altitudes.retain(|level| level.pressure_hpa != 750.0);
        assert!(matches!(
            load_wind_dataset(&file_path, &config),
            Err(GridwindError::Config { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_packing_unpack() {
        let packing = Packing {
            scale_factor: 0.01,
            add_offset: 10.0,
            fill_values: vec![-32767.0],
        };
        assert!((packing.unpack(100.0) - 11.0).abs() < 1e-12);
        assert!(packing.unpack(-32767.0).is_nan());
        assert!(!packing.is_identity());
    }
}
