//! Scene composition for synthetic image datasets
//! 
//! This crate places randomly scaled and positioned copies of a foreground
//! model in front of a fixed background and drives a [`Renderer`] to write
//! one bitmap per image (plus stereo and depth variants):
//! - [`config`]: run configuration and placement limits
//! - [`placement`]: the scale and position sampling
//! - [`naming`]: zero-padded output file names
//! - [`composer`]: the per-image place / render / teardown loop
//!
//! [`Renderer`]: imgsynth_core::Renderer

pub mod config;
pub mod placement;
pub mod naming;
pub mod composer;

pub use config::*;
pub use placement::*;
pub use naming::*;
pub use composer::*;
