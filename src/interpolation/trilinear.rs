//! Trilinear interpolation inside a unit cube.

use serde::Serialize;

use super::common::lerp;
use super::tensor::UnitCube;

/// An interpolated value paired with a local sensitivity indicator.
///
/// `uncertainty` is the signed difference between the two planes bracketing
/// the point along the outer axis. It tracks the local gradient, can be
/// negative, and is not a statistical error bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimatedValue {
    pub value: f64,
    pub uncertainty: f64,
}

/// Interpolate inside `cube` at fractions in `[0, 1]`.
///
/// The inner axis is collapsed first, then the middle axis, leaving two
/// plane values `c0` and `c1` that are blended along the outer axis.
pub fn estimate(
    cube: &UnitCube,
    frac_outer: f64,
    frac_middle: f64,
    frac_inner: f64,
) -> EstimatedValue {
    let c = cube.corners();

    let c00 = lerp(c[0], c[1], frac_inner);
    let c01 = lerp(c[2], c[3], frac_inner);
    let c10 = lerp(c[4], c[5], frac_inner);
    let c11 = lerp(c[6], c[7], frac_inner);

    let c0 = lerp(c00, c01, frac_middle);
    let c1 = lerp(c10, c11, frac_middle);

    EstimatedValue {
        value: lerp(c0, c1, frac_outer),
        uncertainty: c1 - c0,
    }
}
