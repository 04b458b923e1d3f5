//! # Workflows Module
//!
//! High-level entry points that run a complete surface computation.
//!
//! ## Overview
//!
//! A workflow validates its inputs, lays out the voxel grid, drives the engine
//! stages in order, reports progress phase by phase and returns the finished
//! meshes. Callers only need atoms, a [`SurfaceConfig`](crate::engine::config::SurfaceConfig)
//! and a [`ProgressReporter`](crate::engine::progress::ProgressReporter).
//!
//! ## Architecture
//!
//! - **Surface Workflow** ([`surface`]) - Accessible field, accessible mesh, band index,
//!   excluded field and the colored excluded mesh, in that order.

pub mod surface;
