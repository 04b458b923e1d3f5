use crate::cli::SurfaceArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::io::{pdb::PdbStructure, ply};
use crate::utils::progress::CliProgressHandler;
use sesmesh::{engine::progress::ProgressReporter, workflows};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn run(args: SurfaceArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args)?;

    info!("Loading input structure from {:?}", &app_config.input_path);
    let structure = PdbStructure::read_from_path(&app_config.input_path).map_err(|e| {
        CliError::FileParsing {
            path: app_config.input_path.clone(),
            source: e.into(),
        }
    })?;

    let atoms = structure.surface_atoms(&app_config.chains);
    info!(
        atoms = atoms.len(),
        chains = %app_config.chain_spec,
        "Selected atoms for the surface."
    );
    if atoms.is_empty() {
        warn!(
            "No atoms match chains '{}'. Available chains: {:?}",
            app_config.chain_spec,
            structure.chains()
        );
    }

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    if !quiet {
        println!("Building solvent-excluded surface of {} atoms...", atoms.len());
    }
    let result = workflows::surface::run(&atoms, &app_config.core_config, &reporter)?;

    if result.excluded.is_empty() {
        warn!("Workflow completed but the surface has no faces.");
    }

    std::fs::create_dir_all(&app_config.output_dir)?;
    let output_path = output_path(&app_config);
    info!(
        vertices = result.excluded.num_vertices(),
        faces = result.excluded.num_faces(),
        "Writing surface mesh to {:?}",
        &output_path
    );
    ply::write_to_path(&result.excluded, &output_path)?;

    println!(
        "✓ Surface ({} vertices, {} faces) written to: {}",
        result.excluded.num_vertices(),
        result.excluded.num_faces(),
        output_path.display()
    );
    Ok(())
}

/// `<output_dir>/<input stem>_<chains>_<spacing>.ply`.
fn output_path(config: &AppConfig) -> PathBuf {
    let stem = config
        .input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "surface".to_string());
    config.output_dir.join(format!(
        "{}_{}_{}.ply",
        stem, config.chain_spec, config.core_config.grid_spacing
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const TWO_RESIDUES: &str = "\
ATOM      1  OD1 ASP A   1       0.000   0.000   0.000  1.00  0.00           O
ATOM      2  NZ  LYS A   2       3.000   0.000   0.000  1.00  0.00           N
ATOM      3  CA  GLY B   1      30.000  30.000  30.000  1.00  0.00           C
";

    fn surface_args(input: PathBuf, output_dir: PathBuf) -> SurfaceArgs {
        SurfaceArgs {
            input,
            output_dir: Some(output_dir),
            config: None,
            grid_spacing: Some(0.5),
            probe_radius: None,
            chains: Some("A".to_string()),
            algorithm: None,
            set_values: vec![],
        }
    }

    #[test]
    fn output_path_combines_stem_chains_and_spacing() {
        let dir = tempdir().unwrap();
        let args = surface_args(PathBuf::from("data/2ptc.pdb"), dir.path().to_path_buf());
        let config = build_config(&SurfaceArgs {
            chains: Some("A-C".to_string()),
            grid_spacing: Some(0.25),
            ..args
        })
        .unwrap();
        assert_eq!(output_path(&config), dir.path().join("2ptc_A-C_0.25.ply"));
    }

    #[test]
    fn run_writes_a_ply_mesh_for_the_selected_chains() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pair.pdb");
        fs::write(&input, TWO_RESIDUES).unwrap();
        let out_dir = dir.path().join("meshes");

        run(surface_args(input, out_dir.clone()), true).unwrap();

        let text = fs::read_to_string(out_dir.join("pair_A_0.5.ply")).unwrap();
        let vertex_count: usize = text
            .lines()
            .find_map(|l| l.strip_prefix("element vertex "))
            .unwrap()
            .parse()
            .unwrap();
        assert!(vertex_count > 0);
        // Only chain A lies near the origin.
        let body = text.lines().skip_while(|l| *l != "end_header").skip(1);
        for line in body.take(vertex_count) {
            let x: f64 = line.split(' ').next().unwrap().parse().unwrap();
            assert!(x < 15.0);
        }
    }

    #[test]
    fn run_fails_when_no_atoms_are_selected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pair.pdb");
        fs::write(&input, TWO_RESIDUES).unwrap();
        let mut args = surface_args(input, dir.path().to_path_buf());
        args.chains = Some("Q".to_string());

        assert!(matches!(run(args, true), Err(CliError::Surface(_))));
    }

    #[test]
    fn run_reports_missing_input_as_file_error() {
        let dir = tempdir().unwrap();
        let args = surface_args(dir.path().join("absent.pdb"), dir.path().to_path_buf());
        assert!(matches!(run(args, true), Err(CliError::FileParsing { .. })));
    }
}
