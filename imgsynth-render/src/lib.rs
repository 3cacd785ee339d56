//! CPU rendering for imgsynth scenes
//! 
//! This crate provides [`SoftwareRenderer`], an implementation of the
//! `Renderer` trait built from:
//! - a flat scene graph of mesh nodes
//! - a look-at perspective camera
//! - a z-buffered triangle rasterizer with colour and depth shading

pub mod camera;
pub mod scene;
pub mod rasterizer;
pub mod renderer;

pub use camera::*;
pub use scene::*;
pub use rasterizer::*;
pub use renderer::*;
