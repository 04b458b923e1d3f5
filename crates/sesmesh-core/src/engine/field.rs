//! Scalar fields whose zero level sets are the molecular surfaces.
//!
//! The accessible field is negative inside the probe-inflated atoms. The
//! excluded field is derived from the accessible mesh and is non-negative only
//! where a sample lies beyond one probe radius of every accessible-surface point.

use super::band_search::BandIndex;
use super::evaluator::{evaluate, for_each_row};
use super::progress::ProgressReporter;
use crate::core::models::atom::Atom;
use crate::core::models::grid::{ScalarField, VoxelGrid};
use nalgebra::Point3;
use tracing::instrument;

/// Accessible-surface field at `xyz`.
///
/// `min_i(|xyz - pos_i|² - (r_i + probe)²)`: negative strictly inside the union
/// of probe-inflated atom spheres and exactly zero on a sphere's boundary.
#[inline]
pub fn accessible_value(xyz: &Point3<f64>, atoms: &[Atom], probe_radius: f64) -> f64 {
    atoms
        .iter()
        .map(|atom| {
            let r = atom.inflated_radius(probe_radius);
            (xyz - atom.position).norm_squared() - r * r
        })
        .fold(f64::INFINITY, f64::min)
}

/// Excluded-surface field from the accessible value at a point and the squared
/// distance to the nearest accessible-surface vertex within reach.
///
/// Points outside the accessible volume, and points with no accessible-surface
/// vertex within reach, take the sentinel `-probe²`.
#[inline]
pub fn excluded_value(accessible: f64, nearest_squared: Option<f64>, probe_radius: f64) -> f64 {
    let sentinel = -(probe_radius * probe_radius);
    if accessible >= 0.0 {
        return sentinel;
    }
    match nearest_squared {
        Some(d2) => d2 - probe_radius * probe_radius,
        None => sentinel,
    }
}

#[instrument(level = "debug", skip_all, fields(atoms = atoms.len()))]
pub fn sample_accessible(
    grid: &VoxelGrid,
    atoms: &[Atom],
    probe_radius: f64,
    reporter: &ProgressReporter,
) -> ScalarField {
    evaluate(grid, reporter, |z, slice| {
        for_each_row(grid, slice, |y, row| {
            for (x, value) in row.iter_mut().enumerate() {
                *value = accessible_value(&grid.world(x, y, z), atoms, probe_radius);
            }
        });
    })
}

/// Samples the excluded field over `grid`.
///
/// The z-band of `index` is selected once per slice and its y-row once per row;
/// only the final distance scan runs per sample.
#[instrument(level = "debug", skip_all, fields(surface_points = index.len()))]
pub fn sample_excluded(
    accessible: &ScalarField,
    index: &BandIndex,
    probe_radius: f64,
    reporter: &ProgressReporter,
) -> ScalarField {
    let grid = accessible.grid();
    evaluate(grid, reporter, |z, slice| {
        let band = index.z_band(grid.axis_position(2, z));
        let mut row_candidates = index.row();
        for_each_row(grid, slice, |y, row| {
            row_candidates.refill(band, grid.axis_position(1, y));
            for (x, value) in row.iter_mut().enumerate() {
                let a = accessible.value(x, y, z);
                let nearest = if a < 0.0 {
                    row_candidates.nearest_squared(&grid.world(x, y, z))
                } else {
                    None
                };
                *value = excluded_value(a, nearest, probe_radius);
            }
        });
    })
}
