//! # sesmesh Core Library
//!
//! Triangle meshes of molecular surfaces: the solvent-accessible surface (SAS) traced by
//! the center of a probe sphere rolling over the atoms, and the solvent-excluded surface
//! (SES) traced by the probe's contact boundary, colored by the functional class of the
//! atoms beneath it.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture that separates data, computation and
//! orchestration.
//!
//! - **[`core`]: The Foundation.** Plain data models: atoms, the voxel grid, sampled
//!   scalar fields and indexed triangle meshes. No algorithms beyond indexing and
//!   interpolation live here.
//!
//! - **[`engine`]: The Logic Core.** Field sampling over the grid (parallel across z-slices
//!   with the `parallel` feature), the band-pruned nearest-point search, the isosurface
//!   extraction strategies and vertex color blending.
//!
//! - **[`workflows`]: The Public API.** Ties the engine stages together into one call that
//!   validates inputs, reports progress and returns the finished meshes.
//!
//! ## Example
//!
//! ```
//! use nalgebra::Point3;
//! use sesmesh::core::models::atom::Atom;
//! use sesmesh::engine::config::SurfaceConfigBuilder;
//! use sesmesh::engine::progress::ProgressReporter;
//! use sesmesh::workflows::surface;
//!
//! let atoms = [
//!     Atom::new(Point3::new(0.0, 0.0, 0.0), 1.7),
//!     Atom::new(Point3::new(1.5, 0.0, 0.0), 1.55),
//! ];
//! let config = SurfaceConfigBuilder::new()
//!     .probe_radius(1.4)
//!     .grid_spacing(0.5)
//!     .build()
//!     .unwrap();
//!
//! let result = surface::run(&atoms, &config, &ProgressReporter::new()).unwrap();
//! assert!(!result.excluded.is_empty());
//! ```
//!
//! The crate does no file I/O; reading structures and writing meshes is left to callers
//! such as the `sesmesh` command-line tool.

pub mod core;
pub mod engine;
pub mod workflows;
