//! The core of the crate: numeric constants and geometry, the
//! interface between primitives and acceleration structures,
//! configuration, errors and the scene.

pub mod error;
pub mod geometry;
pub mod interaction;
pub mod parallel;
pub mod paramset;
pub mod pbrt;
pub mod primitive;
pub mod rng;
pub mod scene;
