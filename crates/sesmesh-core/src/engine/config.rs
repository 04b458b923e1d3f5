use super::extraction::ExtractionAlgorithm;
use thiserror::Error;

/// Radius of a water molecule in Angstroms, the conventional solvent probe.
pub const DEFAULT_PROBE_RADIUS: f64 = 1.4;
pub const DEFAULT_GRID_SPACING: f64 = 0.25;
/// 512 samples per axis.
pub const DEFAULT_MAX_GRID_POINTS: usize = 512 * 512 * 512;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub probe_radius: f64,
    pub grid_spacing: f64,
    pub algorithm: ExtractionAlgorithm,
    pub max_grid_points: usize,
    pub keep_accessible_mesh: bool,
}

#[derive(Default)]
pub struct SurfaceConfigBuilder {
    probe_radius: Option<f64>,
    grid_spacing: Option<f64>,
    algorithm: Option<ExtractionAlgorithm>,
    max_grid_points: Option<usize>,
    keep_accessible_mesh: Option<bool>,
}

impl SurfaceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }
    pub fn grid_spacing(mut self, spacing: f64) -> Self {
        self.grid_spacing = Some(spacing);
        self
    }
    pub fn algorithm(mut self, algorithm: ExtractionAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
    pub fn max_grid_points(mut self, limit: usize) -> Self {
        self.max_grid_points = Some(limit);
        self
    }
    pub fn keep_accessible_mesh(mut self, keep: bool) -> Self {
        self.keep_accessible_mesh = Some(keep);
        self
    }

    pub fn build(self) -> Result<SurfaceConfig, ConfigError> {
        let probe_radius = self
            .probe_radius
            .ok_or(ConfigError::MissingParameter("probe_radius"))?;
        if !(probe_radius.is_finite() && probe_radius > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "probe_radius",
                value: probe_radius.to_string(),
            });
        }

        let grid_spacing = self
            .grid_spacing
            .ok_or(ConfigError::MissingParameter("grid_spacing"))?;
        if !(grid_spacing.is_finite() && grid_spacing > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "grid_spacing",
                value: grid_spacing.to_string(),
            });
        }

        let max_grid_points = self.max_grid_points.unwrap_or(DEFAULT_MAX_GRID_POINTS);
        if max_grid_points == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_grid_points",
                value: "0".to_string(),
            });
        }

        Ok(SurfaceConfig {
            probe_radius,
            grid_spacing,
            algorithm: self.algorithm.unwrap_or_default(),
            max_grid_points,
            keep_accessible_mesh: self.keep_accessible_mesh.unwrap_or(false),
        })
    }
}
