use std::path::PathBuf;

use clap::Parser;
use imgsynth_composer::{SceneConfig, DEFAULT_BACKGROUND, DEFAULT_MODEL, DEFAULT_OUT_DIR};

#[derive(Parser, Debug)]
#[command(name = "img-gen")]
#[command(about = "Generate images containing randomly placed 3D models")]
pub struct Cli {
    /// Print full console output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output a depth map of the generated image(s)
    #[arg(short = 'd', long = "depth_map")]
    pub depth_map: bool,

    /// Generate two stereo images based on a given eye separation
    #[arg(short, long)]
    pub stereo: bool,

    /// Distance of separation between two stereo images
    #[arg(
        long = "eye_sep",
        value_name = "EYE_SEPARATION",
        default_value_t = 2,
        allow_negative_numbers = true
    )]
    pub eye_sep: i32,

    /// Number of images to generate
    pub images_to_generate: usize,

    /// Number of 3D models to render per generated image
    pub models_per_image: usize,

    /// Width in pixels of generated image
    #[arg(long = "image_width", default_value_t = 800)]
    pub image_width: u32,

    /// Height in pixels of generated image
    #[arg(long = "image_height", default_value_t = 600)]
    pub image_height: u32,

    /// Path to the 3D model to be rendered, or builtin:<name>
    #[arg(long = "model_path", default_value = DEFAULT_MODEL)]
    pub model_path: String,

    /// Path to the background model, or builtin:<name>
    #[arg(long = "background_path", default_value = DEFAULT_BACKGROUND)]
    pub background_path: String,

    /// Path to a directory which output images will be generated in
    #[arg(long = "out_dir", value_name = "OUTPUT_DIRECTORY_PATH", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Seed for model placement; drawn at random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Scene configuration for this invocation
    pub fn scene_config(&self, seed: u64) -> SceneConfig {
        let mut config = SceneConfig::new(self.images_to_generate, self.models_per_image)
            .with_size(self.image_width, self.image_height)
            .with_model(self.model_path.clone())
            .with_background(self.background_path.clone())
            .with_out_dir(self.out_dir.clone())
            .with_depth_map(self.depth_map)
            .with_verbose(self.verbose)
            .with_seed(seed);
        if self.stereo {
            config = config.with_stereo(self.eye_sep);
        } else {
            config.eye_separation = self.eye_sep;
        }
        config
    }
}
