use crate::core::models::atom::Atom;
use crate::core::models::grid::{ScalarField, VoxelGrid};
use crate::core::models::mesh::{Mesh, PositionVertex, SurfaceVertex};
use crate::engine::band_search::BandIndex;
use crate::engine::coloring::ColorBlender;
use crate::engine::config::SurfaceConfig;
use crate::engine::error::SurfaceError;
use crate::engine::extraction::IsosurfaceExtractor;
use crate::engine::field::{sample_accessible, sample_excluded};
use crate::engine::progress::ProgressReporter;
use nalgebra::{Vector2, Vector3};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceResult {
    /// The voxel grid both fields were sampled on.
    pub grid: VoxelGrid,
    /// The solvent-excluded surface, faces wound counter-clockwise seen from the solvent.
    pub excluded: Mesh<SurfaceVertex>,
    /// The solvent-accessible surface, present only when requested in the config.
    pub accessible: Option<Mesh<PositionVertex>>,
}

#[instrument(skip_all, name = "surface_workflow", fields(atoms = atoms.len()))]
pub fn run(
    atoms: &[Atom],
    config: &SurfaceConfig,
    reporter: &ProgressReporter,
) -> Result<SurfaceResult, SurfaceError> {
    // === Phase 0: Validation and grid layout ===
    let grid = reporter.phase("Preparation", || prepare_grid(atoms, config))?;
    info!(
        dims = ?grid.dims(),
        spacing = grid.spacing(),
        algorithm = %config.algorithm,
        "Voxel grid laid out."
    );

    // === Phase 1: Accessible field ===
    let accessible_field = reporter.phase("Sampling Accessible Field", || {
        timed("accessible field", || {
            sample_accessible(&grid, atoms, config.probe_radius, reporter)
        })
    });

    // === Phase 2: Accessible surface ===
    let accessible = reporter.phase("Extracting Accessible Surface", || {
        timed("accessible surface", || {
            config.algorithm.extract(&accessible_field, |coords| {
                PositionVertex::new(grid.to_world(&coords))
            })
        })
    });
    info!(
        vertices = accessible.num_vertices(),
        faces = accessible.num_faces(),
        "Accessible surface extracted."
    );
    if accessible.is_empty() {
        warn!("Accessible surface is empty; the excluded surface will be empty too.");
    }

    // === Phase 3: Excluded field ===
    let reach = config.probe_radius + grid.spacing();
    let excluded_field = reporter.phase("Sampling Excluded Field", || {
        let index = BandIndex::from_mesh(&accessible, reach);
        debug!(points = index.len(), reach, "Band index built.");
        timed("excluded field", || {
            sample_excluded(&accessible_field, &index, config.probe_radius, reporter)
        })
    });

    // === Phase 4: Excluded, colored surface ===
    let excluded = reporter.phase("Extracting Excluded Surface", || {
        let blender = ColorBlender::from_atoms(atoms);
        debug!(classified_atoms = blender.len(), "Color blender ready.");
        timed("excluded surface", || {
            extract_excluded(&excluded_field, config, &blender)
        })
    });
    info!(
        vertices = excluded.num_vertices(),
        faces = excluded.num_faces(),
        "Excluded surface extracted."
    );

    Ok(SurfaceResult {
        grid,
        excluded,
        accessible: config.keep_accessible_mesh.then_some(accessible),
    })
}

fn prepare_grid(atoms: &[Atom], config: &SurfaceConfig) -> Result<VoxelGrid, SurfaceError> {
    if atoms.is_empty() {
        return Err(SurfaceError::EmptyAtomSet);
    }
    if !(config.grid_spacing.is_finite() && config.grid_spacing > 0.0) {
        return Err(SurfaceError::InvalidSpacing(config.grid_spacing));
    }
    if !(config.probe_radius.is_finite() && config.probe_radius > 0.0) {
        return Err(SurfaceError::InvalidProbeRadius(config.probe_radius));
    }
    validate_atoms(atoms)?;

    let max_radius = atoms.iter().map(|a| a.radius).fold(0.0, f64::max);
    let grid = VoxelGrid::enclosing(atoms, config.probe_radius + max_radius, config.grid_spacing)
        .ok_or(SurfaceError::EmptyAtomSet)?;

    let dims = grid.dims();
    if dims.contains(&0) {
        return Err(SurfaceError::DegenerateGrid { dims });
    }
    let points = grid.num_points().unwrap_or(usize::MAX);
    if points > config.max_grid_points {
        return Err(SurfaceError::GridTooLarge {
            points,
            limit: config.max_grid_points,
        });
    }
    Ok(grid)
}

fn validate_atoms(atoms: &[Atom]) -> Result<(), SurfaceError> {
    for (index, atom) in atoms.iter().enumerate() {
        if !atom.position.iter().all(|c| c.is_finite()) {
            return Err(SurfaceError::InvalidAtom {
                index,
                reason: format!("non-finite position {}", atom.position),
            });
        }
        if !(atom.radius.is_finite() && atom.radius >= 0.0) {
            return Err(SurfaceError::InvalidAtom {
                index,
                reason: format!("invalid radius {}", atom.radius),
            });
        }
    }
    Ok(())
}

/// Extracts the excluded surface with normals, texture coordinates and colors.
///
/// The excluded field is negative on the solvent side, so the outward normal is
/// the negated field gradient and faces are flipped to face the solvent.
fn extract_excluded(
    field: &ScalarField,
    config: &SurfaceConfig,
    blender: &ColorBlender,
) -> Mesh<SurfaceVertex> {
    let grid = field.grid();
    let mut mesh = config.algorithm.extract(field, |coords| {
        let position = grid.to_world(&coords);
        let normal = (-field.gradient(&coords))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::x);
        SurfaceVertex {
            position,
            normal,
            uv: Vector2::zeros(),
            color: blender.blend(&position),
        }
    });
    mesh.flip_winding();
    mesh
}

fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    debug!("Computed {} in {:.2?}.", label, start.elapsed());
    result
}
