//! # Core Models Module
//!
//! This module contains the plain data structures shared by every stage of the
//! surface computation.
//!
//! ## Overview
//!
//! The models are deliberately free of behavior beyond simple accessors and
//! coordinate mapping. They describe:
//!
//! - **Input geometry** - Atom centers, radii and functional classification colors
//! - **Sampling lattice** - The voxel grid and the dense scalar fields sampled on it
//! - **Output geometry** - Indexed triangle meshes with position-only or fully
//!   attributed vertices
//!
//! ## Key Components
//!
//! - [`atom`] - Atom representation and the neutral (unclassified) color
//! - [`grid`] - Voxel grid geometry, linear indexing and scalar sample arrays
//! - [`mesh`] - Generic indexed triangle mesh and its vertex types
//!
//! ## Usage
//!
//! ```ignore
//! use sesmesh::core::models::{atom::Atom, grid::VoxelGrid};
//! use nalgebra::Point3;
//!
//! let atoms = vec![Atom::new(Point3::new(0.0, 0.0, 0.0), 1.7)];
//! let grid = VoxelGrid::enclosing(&atoms, 1.4 + 1.7, 0.25).unwrap();
//! println!("{:?}", grid.dims());
//! ```

pub mod atom;
pub mod grid;
pub mod mesh;
