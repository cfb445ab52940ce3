//! Flat four-dimensional tensors and unit-cube extraction.
//!
//! Samples are stored lexicographically in `[time, level, latitude, longitude]`
//! order with longitude varying fastest:
//!
//! ```text
//! index = ((t * levels + l) * lats + la) * lons + lo
//! ```

use crate::error::{GridwindError, Result};

/// Names of the three spatial axes, outermost first
pub const SPATIAL_AXES: [&str; 3] = ["level", "latitude", "longitude"];

/// Convert a slice of extents into the fixed `[time, level, lat, lon]` form
pub fn four_extents(extents: &[usize]) -> Result<[usize; 4]> {
    <[usize; 4]>::try_from(extents).map_err(|_| GridwindError::DimensionMismatch {
        message: format!(
            "data must be four-dimensional [time, level, lat, lon], got {} extents",
            extents.len()
        ),
    })
}

/// A borrowed view of flat samples with explicit per-axis extents.
#[derive(Debug, Clone, Copy)]
pub struct Tensor<'a, T = f32> {
    data: &'a [T],
    extents: [usize; 4],
}

impl<'a, T> Tensor<'a, T>
where
    T: Copy + Into<f64>,
{
    /// Wrap `data`, checking there are exactly four extents and that their
    /// product matches the number of samples.
    pub fn new(data: &'a [T], extents: &[usize]) -> Result<Self> {
        let extents = four_extents(extents)?;
        let expected = extents
            .iter()
            .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
            .ok_or_else(|| GridwindError::DimensionMismatch {
                message: format!("extents {:?} describe too many samples", extents),
            })?;

        if data.len() != expected {
            return Err(GridwindError::DimensionMismatch {
                message: format!(
                    "extents {:?} describe {} samples but the data holds {}",
                    extents,
                    expected,
                    data.len()
                ),
            });
        }

        Ok(Self { data, extents })
    }

    /// The `[time, level, lat, lon]` extents
    pub fn extents(&self) -> [usize; 4] {
        self.extents
    }

    /// Number of time steps
    pub fn time_len(&self) -> usize {
        self.extents[0]
    }

    /// Flat position of a sample
    #[inline]
    pub fn flat_index(&self, time: usize, level: usize, lat: usize, lon: usize) -> usize {
        let [_, levels, lats, lons] = self.extents;
        ((time * levels + level) * lats + lat) * lons + lon
    }

    /// Read one sample, widened to `f64`
    #[inline]
    pub fn get(&self, time: usize, level: usize, lat: usize, lon: usize) -> f64 {
        self.data[self.flat_index(time, level, lat, lon)].into()
    }
}

/// Integer grid position of the corner with all offsets zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeOrigin {
    pub level: usize,
    pub lat: usize,
    pub lon: usize,
}

/// A target point split into the cube origin and the fractions inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPosition {
    origin: CubeOrigin,
    fractions: [f64; 3],
}

impl GridPosition {
    /// Split fractional `[level, lat, lon]` indices into floor and fraction,
    /// checking that the whole unit cube lies on the grid.
    ///
    /// # Errors
    ///
    /// - [`GridwindError::DimensionMismatch`] if `target` does not hold
    ///   exactly three coordinates.
    /// - [`GridwindError::GridBoundsExceeded`] if an index is negative, NaN
    ///   or past the last sample, or an axis has fewer than two samples.
    ///
    /// An index sitting exactly on the last sample uses the cube below it
    /// with a fraction of 1.
    pub fn new(target: &[f64], extents: [usize; 4]) -> Result<Self> {
        let target = <[f64; 3]>::try_from(target).map_err(|_| {
            GridwindError::DimensionMismatch {
                message: format!(
                    "target must have exactly three spatial coordinates, got {}",
                    target.len()
                ),
            }
        })?;

        let mut floors = [0usize; 3];
        let mut fractions = [0.0; 3];

        for axis in 0..3 {
            let extent = extents[axis + 1];
            let index = target[axis];
            let floor = index.floor();
            let last = extent as f64 - 1.0;

            if !(floor >= 0.0 && extent >= 2 && index <= last) {
                return Err(GridwindError::GridBoundsExceeded {
                    axis: SPATIAL_AXES[axis],
                    floor: floor as i64,
                    extent,
                });
            }

            if floor == last {
                floors[axis] = extent - 2;
                fractions[axis] = 1.0;
            } else {
                floors[axis] = floor as usize;
                fractions[axis] = index - floor;
            }
        }

        Ok(Self {
            origin: CubeOrigin {
                level: floors[0],
                lat: floors[1],
                lon: floors[2],
            },
            fractions,
        })
    }

    pub fn origin(&self) -> CubeOrigin {
        self.origin
    }

    /// Fractions in `[0, 1]` along level, latitude and longitude
    pub fn fractions(&self) -> [f64; 3] {
        self.fractions
    }
}

/// The eight samples around a point, addressed by
/// `(level_offset * 2 + lat_offset) * 2 + lon_offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCube(pub [f64; 8]);

impl UnitCube {
    /// Position of a corner within the cube
    #[inline]
    pub fn minor_index(level_offset: usize, lat_offset: usize, lon_offset: usize) -> usize {
        (level_offset * 2 + lat_offset) * 2 + lon_offset
    }

    /// Build a cube by applying `f` to every corner of `self`
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self(self.0.map(f))
    }

    pub fn corners(&self) -> &[f64; 8] {
        &self.0
    }
}

/// Copy the unit cube at `origin` out of `tensor` for one time step.
///
/// No bounds checking happens here; positions come from [`GridPosition`],
/// which guarantees `origin + 1` stays on the grid.
pub fn extract_cube<T>(tensor: &Tensor<'_, T>, origin: CubeOrigin, time_index: usize) -> UnitCube
where
    T: Copy + Into<f64>,
{
    let mut cube = [0.0; 8];

    for level_offset in 0..2 {
        for lat_offset in 0..2 {
            for lon_offset in 0..2 {
                cube[UnitCube::minor_index(level_offset, lat_offset, lon_offset)] = tensor.get(
                    time_index,
                    origin.level + level_offset,
                    origin.lat + lat_offset,
                    origin.lon + lon_offset,
                );
            }
        }
    }

    UnitCube(cube)
}
