//! Run configuration

use std::path::PathBuf;

use imgsynth_core::{Error, Point3f, Result};
use serde::{Deserialize, Serialize};

/// Uniform scale applied to the background on all three axes
pub const BACKGROUND_SCALE: f32 = 0.25;

/// Fixed background offset
pub const BACKGROUND_POSITION: [f32; 3] = [-8.0, 42.0, 2.0];

/// Camera position for mono and depth renders; stereo eyes are offset on x
pub const CAMERA_POSITION: [f32; 3] = [0.0, -20.0, 5.0];

/// Default foreground asset
pub const DEFAULT_MODEL: &str = "builtin:panda";

/// Default background asset
pub const DEFAULT_BACKGROUND: &str = "builtin:environment";

/// Default output directory
pub const DEFAULT_OUT_DIR: &str = "img_gen_out";

/// Closed interval sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies in `[min, max]`
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, what: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidConfig(format!("{} range must be finite", what)));
        }
        if self.min > self.max {
            return Err(Error::InvalidConfig(format!(
                "{} range is inverted: [{}, {}]",
                what, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Limits for the random adjustments made when placing a model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementLimits {
    /// Left-to-right placement
    pub x: SampleRange,
    /// Depth placement; smaller is closer to the camera
    pub y: SampleRange,
    /// Scale jitter, in thousandths of a unit of scale
    pub scale_delta: SampleRange,
    /// Height every model is placed at
    pub object_height: f32,
}

impl Default for PlacementLimits {
    fn default() -> Self {
        Self {
            x: SampleRange::new(-7.0, 7.0),
            y: SampleRange::new(-17.0, 5.0),
            scale_delta: SampleRange::new(-2.0, 2.0),
            object_height: 2.0,
        }
    }
}

impl PlacementLimits {
    pub fn validate(&self) -> Result<()> {
        self.x.validate("x")?;
        self.y.validate("y")?;
        self.scale_delta.validate("scale delta")?;
        if !self.object_height.is_finite() {
            return Err(Error::InvalidConfig("object height must be finite".to_string()));
        }
        Ok(())
    }
}

/// Immutable description of one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub image_count: usize,
    pub objects_per_image: usize,
    pub width: u32,
    pub height: u32,
    pub model: String,
    pub background: String,
    pub out_dir: PathBuf,
    pub stereo: bool,
    /// Distance between the stereo eyes, in whole world units
    pub eye_separation: i32,
    pub depth_map: bool,
    pub verbose: bool,
    pub limits: PlacementLimits,
    pub seed: u64,
}

impl SceneConfig {
    /// Configuration with every optional setting at its default
    pub fn new(image_count: usize, objects_per_image: usize) -> Self {
        Self {
            image_count,
            objects_per_image,
            width: 800,
            height: 600,
            model: DEFAULT_MODEL.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            stereo: false,
            eye_separation: 2,
            depth_map: false,
            verbose: false,
            limits: PlacementLimits::default(),
            seed: 0,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn with_stereo(mut self, eye_separation: i32) -> Self {
        self.stereo = true;
        self.eye_separation = eye_separation;
        self
    }

    pub fn with_depth_map(mut self, depth_map: bool) -> Self {
        self.depth_map = depth_map;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_limits(mut self, limits: PlacementLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations the composer cannot run
    pub fn validate(&self) -> Result<()> {
        if self.image_count == 0 {
            return Err(Error::InvalidConfig("image count must be at least 1".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.model.trim().is_empty() {
            return Err(Error::InvalidConfig("model path is empty".to_string()));
        }
        self.limits.validate()
    }

    /// Centre camera position
    pub fn camera_position(&self) -> Point3f {
        Point3f::from(CAMERA_POSITION)
    }

    /// Left and right eye positions for stereo renders
    pub fn stereo_positions(&self) -> (Point3f, Point3f) {
        let half = self.eye_separation as f32 / 2.0;
        let center = self.camera_position();
        (
            Point3f::new(center.x - half, center.y, center.z),
            Point3f::new(center.x + half, center.y, center.z),
        )
    }
}
