use crate::error::{CliError, Result};
use serde::Deserialize;
use sesmesh::engine::extraction::ExtractionAlgorithm;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSurfaceConfig {
    #[serde(rename = "probe-radius")]
    pub probe_radius: Option<f64>,
    #[serde(rename = "grid-spacing")]
    pub grid_spacing: Option<f64>,
    pub algorithm: Option<ExtractionAlgorithm>,
    #[serde(rename = "max-grid-points")]
    pub max_grid_points: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSelectionConfig {
    pub chains: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub surface: Option<FileSurfaceConfig>,
    pub selection: Option<FileSelectionConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
