//! # Core Module
//!
//! This module provides the stateless foundation of sesmesh: the data models
//! that describe atoms, sampling grids, scalar fields and meshes.
//!
//! ## Overview
//!
//! Everything in `core` is plain data. The algorithms that operate on it
//! (field sampling, band search, isosurface extraction, color blending) live in
//! the [`crate::engine`] layer, and the end-to-end pipeline lives in
//! [`crate::workflows`].
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Atoms, voxel grids, scalar fields and triangle meshes

pub mod models;
