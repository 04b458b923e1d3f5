use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("Atom set is empty; a surface needs at least one atom")]
    EmptyAtomSet,

    #[error("Invalid grid spacing: {0}. Spacing must be positive and finite")]
    InvalidSpacing(f64),

    #[error("Invalid probe radius: {0}. Probe radius must be positive and finite")]
    InvalidProbeRadius(f64),

    #[error("Invalid atom at index {index}: {reason}")]
    InvalidAtom { index: usize, reason: String },

    #[error("Degenerate voxel grid with dimensions {dims:?}")]
    DegenerateGrid { dims: [usize; 3] },

    #[error("Voxel grid of {points} points exceeds the configured limit of {limit}")]
    GridTooLarge { points: usize, limit: usize },
}
