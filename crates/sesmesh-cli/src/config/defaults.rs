use sesmesh::engine::config::{DEFAULT_GRID_SPACING, DEFAULT_MAX_GRID_POINTS, DEFAULT_PROBE_RADIUS};
use sesmesh::engine::extraction::ExtractionAlgorithm;

pub struct DefaultsConfig {
    pub probe_radius: f64,
    pub grid_spacing: f64,
    pub algorithm: ExtractionAlgorithm,
    pub max_grid_points: usize,
    pub chains: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            probe_radius: DEFAULT_PROBE_RADIUS,
            grid_spacing: DEFAULT_GRID_SPACING,
            algorithm: ExtractionAlgorithm::default(),
            max_grid_points: DEFAULT_MAX_GRID_POINTS,
            chains: "A-Z".to_string(),
        }
    }
}
