//! Random scale and position sampling for foreground models
//!
//! Each model's baseline scale makes it 1/24th as tall as the background.
//! The baseline is then jittered by at most a few thousandths, and the
//! model is dropped at a uniformly random (x, y) at a fixed height. No
//! overlap avoidance is done: models may intersect one another.

use imgsynth_core::{Error, NodeId, Point3f, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PlacementLimits;

/// Target model height as a fraction of the background height
pub const BACKGROUND_HEIGHT_DIVISOR: f32 = 24.0;

/// Divisor applied to the sampled scale delta
pub const SCALE_DELTA_DIVISOR: f32 = 1000.0;

/// Scale and position chosen for one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub scale: f32,
    pub position: Point3f,
}

/// A foreground model currently attached to the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub asset: String,
    pub node: NodeId,
    pub index: usize,
    pub name: String,
    pub scale: f32,
    pub position: Point3f,
}

impl PlacedObject {
    /// Node name for the `index`th copy of `asset`
    pub fn display_name(asset: &str, index: usize) -> String {
        format!("{}_{:02}", asset, index)
    }
}

/// Scale that makes a model `1/24` of the background's height
pub fn baseline_scale(background_height: f32, object_height: f32) -> Result<f32> {
    if !object_height.is_finite() || object_height <= 0.0 {
        return Err(Error::InvalidData(format!(
            "model height must be positive, got {}",
            object_height
        )));
    }
    if !background_height.is_finite() || background_height <= 0.0 {
        return Err(Error::InvalidData(format!(
            "background height must be positive, got {}",
            background_height
        )));
    }
    Ok((background_height / BACKGROUND_HEIGHT_DIVISOR) / object_height)
}

/// Draw a jittered scale and a position within `limits`
pub fn sample_placement<R: Rng + ?Sized>(
    rng: &mut R,
    limits: &PlacementLimits,
    baseline: f32,
) -> Placement {
    let delta = rng.gen_range(limits.scale_delta.min..=limits.scale_delta.max);
    let scale = baseline + delta / SCALE_DELTA_DIVISOR;

    let x = rng.gen_range(limits.x.min..=limits.x.max);
    let y = rng.gen_range(limits.y.min..=limits.y.max);

    Placement {
        scale,
        position: Point3f::new(x, y, limits.object_height),
    }
}
