//! # Engine Module
//!
//! This module implements the computational stages that turn a set of atoms into
//! molecular surface meshes.
//!
//! ## Overview
//!
//! Two scalar fields are sampled over the same voxel grid. The accessible field is a
//! closed-form function of the atoms; its zero level set is extracted into a
//! position-only mesh. The excluded field is then computed from the distance to that
//! mesh's vertices, and its zero level set is extracted into the final, fully
//! attributed surface.
//!
//! ## Architecture
//!
//! - **Field Sampling** ([`field`]) - The accessible and excluded scalar functions
//! - **Grid Evaluation** ([`evaluator`]) - Slice-parallel sampling into a dense array
//! - **Band Search** ([`band_search`]) - Nearest-point queries over a z-sorted point set
//! - **Extraction** ([`extraction`]) - Marching cubes and surface nets behind one trait
//! - **Coloring** ([`coloring`]) - Distance-weighted vertex color blending
//! - **Configuration** ([`config`]) - Surface parameters and their builder
//! - **Progress Monitoring** ([`progress`]) - Phase and task progress events
//! - **Error Handling** ([`error`]) - Input validation failures
//!
//! ## Concurrency
//!
//! Only grid evaluation runs in parallel (with the `parallel` feature), one z-slice
//! per task. Each slice owns a disjoint region of the output, and evaluation returns
//! only after every slice is written. Extraction and index construction are
//! sequential and deterministic.

pub mod band_search;
pub mod coloring;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod extraction;
pub mod field;
pub mod progress;
