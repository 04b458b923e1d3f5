//! Isosurface extraction: turning a sampled [`ScalarField`] into a triangle mesh.
//!
//! Every extractor approximates the zero level set of the field. Samples with
//! `value < 0` are inside, samples with `value >= 0` are outside, so a sample
//! that is exactly zero never produces a crossing with an outside neighbor.
//! Vertices are only created near grid edges whose endpoints straddle zero, and
//! their attributes come from a caller-supplied generator that receives the
//! fractional grid coordinate of the vertex. Whatever the generator returns is
//! stored unchanged. Faces are wound counter-clockwise when seen from the
//! outside.
//!
//! Extraction is sequential. For a fixed field and generator the vertex and face
//! sequences are identical from run to run.

mod marching_cubes;
mod surface_nets;
mod tables;

pub use marching_cubes::MarchingCubes;
pub use surface_nets::SurfaceNets;

use crate::core::models::grid::ScalarField;
use crate::core::models::mesh::Mesh;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Common interface of the isosurface extraction strategies.
pub trait IsosurfaceExtractor {
    /// Extracts the zero level set of `field`.
    ///
    /// `generator` is called once per emitted vertex with the vertex position in
    /// (fractional) grid coordinates.
    fn extract<V, G>(&self, field: &ScalarField, generator: G) -> Mesh<V>
    where
        G: FnMut(Point3<f64>) -> V;
}

/// Selects the extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionAlgorithm {
    /// Edge-interpolated marching cubes.
    #[default]
    MarchingCubes,
    /// Surface nets: one vertex per straddling cell, one quad per straddling edge.
    SurfaceNets,
}

impl ExtractionAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarchingCubes => "marching-cubes",
            Self::SurfaceNets => "surface-nets",
        }
    }
}

impl IsosurfaceExtractor for ExtractionAlgorithm {
    fn extract<V, G>(&self, field: &ScalarField, generator: G) -> Mesh<V>
    where
        G: FnMut(Point3<f64>) -> V,
    {
        match self {
            Self::MarchingCubes => MarchingCubes.extract(field, generator),
            Self::SurfaceNets => SurfaceNets.extract(field, generator),
        }
    }
}

impl fmt::Display for ExtractionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown extraction algorithm '{0}' (expected 'marching-cubes' or 'surface-nets')")]
pub struct ParseAlgorithmError(String);

impl FromStr for ExtractionAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "marching-cubes" | "mc" => Ok(Self::MarchingCubes),
            "surface-nets" | "sn" => Ok(Self::SurfaceNets),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Corner offsets of a cell, bit `i` of a configuration refers to corner `i`.
pub(crate) const CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// Cell edges as `(start corner, end corner, axis)`.
pub(crate) const EDGES: [(usize, usize, usize); 12] = [
    (0, 1, 0),
    (2, 3, 0),
    (4, 5, 0),
    (6, 7, 0),
    (0, 2, 1),
    (1, 3, 1),
    (4, 6, 1),
    (5, 7, 1),
    (0, 4, 2),
    (1, 5, 2),
    (2, 6, 2),
    (3, 7, 2),
];

/// Reads the eight corner samples of cell `(x, y, z)` and its configuration.
#[inline]
pub(crate) fn cell_corners(field: &ScalarField, x: usize, y: usize, z: usize) -> ([f64; 8], u8) {
    let mut values = [0.0; 8];
    let mut config = 0u8;
    for (i, [dx, dy, dz]) in CORNERS.iter().enumerate() {
        values[i] = field.value(x + dx, y + dy, z + dz);
        if values[i] < 0.0 {
            config |= 1 << i;
        }
    }
    (values, config)
}

/// Returns the fraction along an edge where the field crosses zero.
///
/// Only meaningful when exactly one endpoint is inside, which keeps `a - b`
/// away from zero.
#[inline]
pub(crate) fn crossing(a: f64, b: f64) -> f64 {
    a / (a - b)
}

#[inline]
pub(crate) fn straddles(a: f64, b: f64) -> bool {
    (a < 0.0) != (b < 0.0)
}
