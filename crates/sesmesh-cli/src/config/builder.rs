use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::SurfaceArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use sesmesh::engine::config::SurfaceConfigBuilder;
use std::path::PathBuf;

/// Merges CLI flags, `--set` overrides, the config file and built-in
/// defaults, in that order of precedence.
pub fn build_config(args: &SurfaceArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let surface_file = file_config.surface.take().unwrap_or_default();
    let probe_radius = args
        .probe_radius
        .or(surface_file.probe_radius)
        .unwrap_or(defaults.probe_radius);
    let grid_spacing = args
        .grid_spacing
        .or(surface_file.grid_spacing)
        .unwrap_or(defaults.grid_spacing);
    let algorithm = args
        .algorithm
        .or(surface_file.algorithm)
        .unwrap_or(defaults.algorithm);
    let max_grid_points = surface_file
        .max_grid_points
        .unwrap_or(defaults.max_grid_points);

    let selection_file = file_config.selection.take().unwrap_or_default();
    let chain_spec = args
        .chains
        .clone()
        .or(selection_file.chains)
        .unwrap_or(defaults.chains);
    let chains =
        parser::parse_chain_spec(&chain_spec).map_err(|e| CliError::Argument(e.to_string()))?;

    let core_config = SurfaceConfigBuilder::new()
        .probe_radius(probe_radius)
        .grid_spacing(grid_spacing)
        .algorithm(algorithm)
        .max_grid_points(max_grid_points)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_dir: args.output_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
        chains,
        chain_spec,
        core_config,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        }
        let key = parts[0];
        let value_str = parts[1];

        match key {
            "surface.probe-radius" => {
                config
                    .surface
                    .get_or_insert_with(Default::default)
                    .probe_radius = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "surface.grid-spacing" => {
                config
                    .surface
                    .get_or_insert_with(Default::default)
                    .grid_spacing = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "surface.algorithm" => {
                config.surface.get_or_insert_with(Default::default).algorithm =
                    Some(value_str.parse().map_err(|e| {
                        CliError::Config(format!("Invalid value for {}: {}", key, e))
                    })?);
            }
            "surface.max-grid-points" => {
                config
                    .surface
                    .get_or_insert_with(Default::default)
                    .max_grid_points = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "selection.chains" => {
                config.selection.get_or_insert_with(Default::default).chains =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sesmesh::engine::extraction::ExtractionAlgorithm;
    use std::fs;
    use tempfile::tempdir;

    fn base_surface_args() -> SurfaceArgs {
        SurfaceArgs {
            input: PathBuf::from("in.pdb"),
            output_dir: None,
            config: None,
            grid_spacing: None,
            probe_radius: None,
            chains: None,
            algorithm: None,
            set_values: vec![],
        }
    }

    #[test]
    fn build_config_falls_back_to_defaults() {
        let app = build_config(&base_surface_args()).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(app.input_path, PathBuf::from("in.pdb"));
        assert_eq!(app.output_dir, PathBuf::from("."));
        assert_eq!(app.chain_spec, "A-Z");
        assert_eq!(app.chains.len(), 26);
        assert_eq!(app.core_config.probe_radius, defaults.probe_radius);
        assert_eq!(app.core_config.grid_spacing, defaults.grid_spacing);
        assert_eq!(app.core_config.algorithm, defaults.algorithm);
        assert_eq!(app.core_config.max_grid_points, defaults.max_grid_points);
        assert!(!app.core_config.keep_accessible_mesh);
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        let toml = r#"
            [surface]
            probe-radius = 1.2
            grid-spacing = 0.5
            algorithm = "surface-nets"

            [selection]
            chains = "BD"
        "#;
        fs::write(&cfg_path, toml).unwrap();

        let mut args = base_surface_args();
        args.config = Some(cfg_path);

        let app = build_config(&args).unwrap();
        assert_eq!(app.core_config.probe_radius, 1.2);
        assert_eq!(app.core_config.grid_spacing, 0.5);
        assert_eq!(app.core_config.algorithm, ExtractionAlgorithm::SurfaceNets);
        assert_eq!(app.chains, vec!['B', 'D']);
        assert_eq!(app.chain_spec, "BD");
    }

    #[test]
    fn cli_flags_override_set_values_and_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(&cfg_path, "[surface]\ngrid-spacing = 0.5\nprobe-radius = 1.2\n").unwrap();

        let mut args = base_surface_args();
        args.config = Some(cfg_path);
        args.grid_spacing = Some(1.0);
        args.set_values = vec![
            "surface.grid-spacing=0.75".to_string(),
            "surface.probe-radius=1.6".to_string(),
        ];

        let app = build_config(&args).unwrap();
        assert_eq!(app.core_config.grid_spacing, 1.0);
        assert_eq!(app.core_config.probe_radius, 1.6);
    }

    #[test]
    fn set_values_cover_every_supported_key() {
        let mut args = base_surface_args();
        args.set_values = vec![
            "surface.algorithm=sn".to_string(),
            "surface.max-grid-points=4096".to_string(),
            "selection.chains=C-E".to_string(),
        ];

        let app = build_config(&args).unwrap();
        assert_eq!(app.core_config.algorithm, ExtractionAlgorithm::SurfaceNets);
        assert_eq!(app.core_config.max_grid_points, 4096);
        assert_eq!(app.chains, vec!['C', 'D', 'E']);
    }

    #[test]
    fn set_value_without_equals_is_rejected() {
        let mut args = base_surface_args();
        args.set_values = vec!["surface.grid-spacing".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_set_key_is_rejected() {
        let mut args = base_surface_args();
        args.set_values = vec!["surface.water-radius=2.0".to_string()];
        let err = build_config(&args).err().unwrap();
        assert!(err.to_string().contains("Unsupported configuration key"));
    }

    #[test]
    fn malformed_set_number_is_rejected() {
        let mut args = base_surface_args();
        args.set_values = vec!["surface.probe-radius=wide".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_chain_spec_is_an_argument_error() {
        let mut args = base_surface_args();
        args.chains = Some("Z-A".to_string());
        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));
    }

    #[test]
    fn non_positive_spacing_is_a_config_error() {
        let mut args = base_surface_args();
        args.grid_spacing = Some(0.0);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }
}
