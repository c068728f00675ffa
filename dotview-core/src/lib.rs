//! Core data structures for dotview
//!
//! This crate provides the state a point cloud viewer works on, independent
//! of any window or GPU:
//! - Points and point sets loaded from disk
//! - Primitive modes and the index sequences derived from them
//! - The model/view/projection transform state
//! - The shared error type

pub mod point;
pub mod point_cloud;
pub mod topology;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use topology::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};
