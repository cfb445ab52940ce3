//! Test data generation utilities.
//!
//! Writes small ERA5-shaped NetCDF files (`time, level, latitude, longitude`)
//! with known field patterns so extraction results can be checked exactly.

use std::path::Path;

use netcdf::Error;
type Result<T> = std::result::Result<T, Error>;

/// Pressure levels written to the test files, all present in the standard table
pub const LEVELS_HPA: [i32; 3] = [700, 750, 775];
/// Altitudes matching `LEVELS_HPA`
pub const LEVEL_ALTITUDES_KM: [f64; 3] = [2.67, 2.31, 1.98];
/// Latitudes, north to south
pub const LATITUDES: [f32; 4] = [-38.0, -39.0, -40.0, -41.0];
/// Longitudes on the 0-360 convention; -75 to -72 after the default offset
pub const LONGITUDES: [f32; 4] = [285.0, 286.0, 287.0, 288.0];
/// Hours since 1900-01-01: 2005-01-01 at 00, 06, 12 and 18 UTC
pub const TIMES: [f64; 4] = [920_424.0, 920_430.0, 920_436.0, 920_442.0];

/// Value of the linear cloud cover pattern at a grid index
pub fn cloud_cover_at(time: usize, level: usize, lat: usize, lon: usize) -> f64 {
    0.1 * time as f64 + 0.05 * level as f64 + 0.02 * lat as f64 + 0.01 * lon as f64
}

/// Options for the wind test file
#[derive(Debug, Clone, Copy)]
pub struct WindFileOptions {
    /// Store u as packed shorts with scale_factor / add_offset
    pub packed_u: bool,
    pub with_cloud_cover: bool,
    pub with_humidity: bool,
}

impl Default for WindFileOptions {
    fn default() -> Self {
        Self {
            packed_u: true,
            with_cloud_cover: true,
            with_humidity: true,
        }
    }
}

/// Creates an ERA5-like wind file.
///
/// Per time step `t` the wind is uniform: `u = -(t + 1)`, `v = 0`, so the
/// speed is `t + 1` and the wind comes from the east (90 degrees). Cloud
/// cover follows [`cloud_cover_at`], relative humidity is a constant 80.
pub fn create_wind_nc(path: &Path, options: WindFileOptions) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", TIMES.len())?;
    file.add_dimension("level", LEVELS_HPA.len())?;
    file.add_dimension("latitude", LATITUDES.len())?;
    file.add_dimension("longitude", LONGITUDES.len())?;

    file.add_attribute("title", "gridwind test data")?;

    {
        let mut var = file.add_variable::<f32>("longitude", &["longitude"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put_values(&LONGITUDES, ..)?;
    }
    {
        let mut var = file.add_variable::<f32>("latitude", &["latitude"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put_values(&LATITUDES, ..)?;
    }
    {
        let mut var = file.add_variable::<i32>("level", &["level"])?;
        var.put_attribute("units", "millibars")?;
        var.put_values(&LEVELS_HPA, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("time", &["time"])?;
        var.put_attribute("units", "hours since 1900-01-01 00:00:00.0")?;
        var.put_values(&TIMES, ..)?;
    }

    let dims = ["time", "level", "latitude", "longitude"];
    let per_step = LEVELS_HPA.len() * LATITUDES.len() * LONGITUDES.len();
    let u: Vec<f32> = (0..TIMES.len())
        .flat_map(|t| std::iter::repeat(-(t as f32 + 1.0)).take(per_step))
        .collect();

    if options.packed_u {
        // physical = raw * 0.25 - 1, so raw = (u + 1) * 4
        let raw: Vec<i16> = u.iter().map(|&v| ((v + 1.0) * 4.0) as i16).collect();
        let mut var = file.add_variable::<i16>("u", &dims)?;
        var.put_attribute("scale_factor", 0.25_f64)?;
        var.put_attribute("add_offset", -1.0_f64)?;
        var.put_values(&raw, ..)?;
    } else {
        let mut var = file.add_variable::<f32>("u", &dims)?;
        var.put_values(&u, ..)?;
    }

    {
        let mut var = file.add_variable::<f32>("v", &dims)?;
        var.put_values(&vec![0.0_f32; u.len()], ..)?;
    }

    if options.with_cloud_cover {
        let mut values = Vec::with_capacity(u.len());
        for t in 0..TIMES.len() {
            for level in 0..LEVELS_HPA.len() {
                for lat in 0..LATITUDES.len() {
                    for lon in 0..LONGITUDES.len() {
                        values.push(cloud_cover_at(t, level, lat, lon) as f32);
                    }
                }
            }
        }
        let mut var = file.add_variable::<f32>("cc", &dims)?;
        var.put_values(&values, ..)?;
    }

    if options.with_humidity {
        let mut var = file.add_variable::<f32>("r", &dims)?;
        var.put_attribute("units", "%")?;
        var.put_values(&vec![80.0_f32; u.len()], ..)?;
    }

    Ok(())
}
