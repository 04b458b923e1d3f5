use sesmesh::engine::config::SurfaceConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Selected chains, in selection order.
    pub chains: Vec<char>,
    /// The selection as written by the user, used in the output file name.
    pub chain_spec: String,
    pub core_config: SurfaceConfig,
}
