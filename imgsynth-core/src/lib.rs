//! Core data structures and traits for imgsynth
//! 
//! This crate provides the fundamental types shared by the asset loaders,
//! the renderer and the scene composer: points, meshes, transforms, pixel
//! buffers and the `Renderer` trait the composer drives.

pub mod point;
pub mod mesh;
pub mod transform;
pub mod buffer;
pub mod traits;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use transform::*;
pub use buffer::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4};
