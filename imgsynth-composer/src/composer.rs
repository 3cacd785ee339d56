//! The per-image place / render / teardown loop

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use imgsynth_core::{bbox_height, Error, NodeId, Point3f, Renderer, Result};
use log::Level;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{SceneConfig, BACKGROUND_POSITION, BACKGROUND_SCALE};
use crate::naming::{OutputKind, OutputNamer};
use crate::placement::{baseline_scale, sample_placement, PlacedObject};

/// Shared flag telling the composer to stop between images
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Shading used for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Normal,
    Depth,
}

/// One render call: where the camera sits and where the frame goes
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRequest {
    pub path: PathBuf,
    pub kind: OutputKind,
    pub camera: Point3f,
    pub shading: Shading,
}

/// Render calls needed for image `index`, in order
///
/// Mono or a left/right stereo pair, then the depth image when enabled.
pub fn output_requests(config: &SceneConfig, namer: &OutputNamer, index: usize) -> Vec<OutputRequest> {
    let mut requests = Vec::with_capacity(3);

    if config.stereo {
        let (left, right) = config.stereo_positions();
        requests.push(OutputRequest {
            path: namer.path(index, OutputKind::Left),
            kind: OutputKind::Left,
            camera: left,
            shading: Shading::Normal,
        });
        requests.push(OutputRequest {
            path: namer.path(index, OutputKind::Right),
            kind: OutputKind::Right,
            camera: right,
            shading: Shading::Normal,
        });
    } else {
        requests.push(OutputRequest {
            path: namer.path(index, OutputKind::Mono),
            kind: OutputKind::Mono,
            camera: config.camera_position(),
            shading: Shading::Normal,
        });
    }

    if config.depth_map {
        requests.push(OutputRequest {
            path: namer.path(index, OutputKind::Depth),
            kind: OutputKind::Depth,
            camera: config.camera_position(),
            shading: Shading::Depth,
        });
    }

    requests
}

/// Create the output directory, or reuse it with a warning
///
/// Returns `true` when the directory was created.
pub fn create_output_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        log::warn!("Output directory {} already exists", path.display());
        return Ok(false);
    }
    if path.exists() {
        return Err(Error::InvalidConfig(format!(
            "output path {} exists and is not a directory",
            path.display()
        )));
    }
    log::info!("Creating output directory: {}", path.display());
    fs::create_dir_all(path)?;
    Ok(true)
}

/// Outcome of [`SceneComposer::run`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub images_completed: usize,
    pub files_written: Vec<PathBuf>,
    pub interrupted: bool,
}

/// Places models, renders every output of each image and tears the scene
/// back down to the background
pub struct SceneComposer<R: Renderer> {
    config: SceneConfig,
    renderer: R,
    rng: StdRng,
    namer: OutputNamer,
    cancel: CancelFlag,
    background: Option<NodeId>,
    placed: Vec<PlacedObject>,
}

impl<R: Renderer> SceneComposer<R> {
    /// Validate the configuration and seed the random source
    pub fn new(config: SceneConfig, renderer: R) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        let namer = OutputNamer::new(&config.out_dir, config.image_count);
        Ok(Self {
            config,
            renderer,
            rng,
            namer,
            cancel: CancelFlag::new(),
            background: None,
            placed: Vec::new(),
        })
    }

    /// Share a cancellation flag with whoever handles interrupts
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Models currently in the scene
    pub fn placed_objects(&self) -> &[PlacedObject] {
        &self.placed
    }

    /// Background node, once loaded
    pub fn background(&self) -> Option<NodeId> {
        self.background
    }

    fn progress_level(&self) -> Level {
        if self.config.verbose {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// Create the output directory, size the surface and load the background
    ///
    /// Safe to call more than once; the background is only loaded the first
    /// time.
    pub fn prepare(&mut self) -> Result<()> {
        create_output_dir(&self.config.out_dir)?;
        self.renderer.resize(self.config.width, self.config.height)?;

        if self.background.is_none() {
            let node = self.renderer.load_asset(&self.config.background)?;
            self.renderer
                .set_scale(node, BACKGROUND_SCALE, BACKGROUND_SCALE, BACKGROUND_SCALE)?;
            let [x, y, z] = BACKGROUND_POSITION;
            self.renderer.set_position(node, x, y, z)?;
            self.background = Some(node);
        }
        Ok(())
    }

    /// Load one copy of the model and give it a random scale and position
    pub fn place_object(&mut self, index: usize) -> Result<&PlacedObject> {
        let background = self.background.ok_or_else(|| {
            Error::Render("background must be loaded before placing models".to_string())
        })?;

        let node = self.renderer.load_asset(&self.config.model)?;
        let name = PlacedObject::display_name(&self.config.model, index);
        log::log!(self.progress_level(), "\tPlacing model {}", name);

        let background_height = bbox_height(&self.renderer.bounding_box(background)?);
        let model_height = bbox_height(&self.renderer.bounding_box(node)?);
        let placement = baseline_scale(background_height, model_height).and_then(|baseline| {
            let placement = sample_placement(&mut self.rng, &self.config.limits, baseline);
            let s = placement.scale;
            let p = placement.position;
            self.renderer.set_scale(node, s, s, s)?;
            self.renderer.set_position(node, p.x, p.y, p.z)?;
            Ok(placement)
        });
        let placement = match placement {
            Ok(placement) => placement,
            Err(e) => {
                // Keep the scene consistent with `placed`
                if let Err(remove_err) = self.renderer.remove_node(node) {
                    log::warn!("could not remove {} after failed placement: {}", name, remove_err);
                }
                return Err(e);
            }
        };

        log::debug!(
            "{} scale {:.5} at ({:.3}, {:.3}, {:.3})",
            name,
            placement.scale,
            placement.position.x,
            placement.position.y,
            placement.position.z
        );

        self.placed.push(PlacedObject {
            asset: self.config.model.clone(),
            node,
            index,
            name,
            scale: placement.scale,
            position: placement.position,
        });
        Ok(&self.placed[self.placed.len() - 1])
    }

    /// Render and save one request
    ///
    /// A depth request binds the depth shader only for its own frame; the
    /// shader is unbound again even if rendering or saving fails.
    pub fn render_request(&mut self, request: &OutputRequest) -> Result<()> {
        let c = request.camera;
        self.renderer.set_camera_position(c.x, c.y, c.z);

        match request.shading {
            Shading::Normal => self.render_and_save(&request.path),
            Shading::Depth => {
                self.renderer.bind_depth_shader();
                let result = self.render_and_save(&request.path);
                self.renderer.unbind_depth_shader();
                result
            }
        }
    }

    fn render_and_save(&mut self, path: &Path) -> Result<()> {
        let frame = self.renderer.render_frame()?;
        log::log!(self.progress_level(), "\t\tWriting image {}", path.display());
        self.renderer.save_image(&frame, path)
    }

    /// Remove every placed model from the scene
    pub fn clear_objects(&mut self) -> Result<()> {
        for object in self.placed.drain(..) {
            self.renderer.remove_node(object.node)?;
        }
        Ok(())
    }

    /// Place, render and tear down image `index`
    pub fn generate_image(&mut self, index: usize) -> Result<Vec<PathBuf>> {
        log::log!(self.progress_level(), "Iteration {}", index);

        for j in 0..self.config.objects_per_image {
            self.place_object(j)?;
        }

        let requests = output_requests(&self.config, &self.namer, index);
        let mut written = Vec::with_capacity(requests.len());
        for request in &requests {
            self.render_request(request)?;
            written.push(request.path.clone());
        }

        self.clear_objects()?;
        Ok(written)
    }

    /// Generate every image, stopping early if the cancel flag is raised
    pub fn run(&mut self) -> Result<RunSummary> {
        self.prepare()?;

        let mut summary = RunSummary::default();
        for i in 0..self.config.image_count {
            if self.cancel.is_cancelled() {
                log::info!("Stopping before image {} of {}", i, self.config.image_count);
                summary.interrupted = true;
                break;
            }
            let written = self.generate_image(i)?;
            summary.files_written.extend(written);
            summary.images_completed += 1;
        }

        log::info!(
            "Generated {} image(s), {} file(s) in {}",
            summary.images_completed,
            summary.files_written.len(),
            self.config.out_dir.display()
        );
        Ok(summary)
    }
}
