//! Software implementation of the `Renderer` trait

use std::path::Path;

use imgsynth_core::{BoundingBox, Error, NodeId, PixelBuffer, Point3f, Renderer, Result, Vector3f};

use crate::camera::Camera;
use crate::rasterizer::{Rasterizer, ShadingMode};
use crate::scene::SceneGraph;

/// Renders a [`SceneGraph`] on the CPU and writes bitmaps to disk
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    camera: Camera,
    scene: SceneGraph,
    shading: ShadingMode,
}

impl SoftwareRenderer {
    /// Create a renderer with an empty scene and the default camera
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut renderer = Self {
            width: 1,
            height: 1,
            camera: Camera::default(),
            scene: SceneGraph::new(),
            shading: ShadingMode::Color,
        };
        renderer.resize(width, height)?;
        Ok(renderer)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Renderer for SoftwareRenderer {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::Render(format!(
                "surface size must be non-zero, got {}x{}",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        self.camera.set_viewport(width, height);
        log::debug!("Render surface resized to {}x{}", width, height);
        Ok(())
    }

    fn load_asset(&mut self, identifier: &str) -> Result<NodeId> {
        self.scene.load(identifier)
    }

    fn bounding_box(&self, node: NodeId) -> Result<BoundingBox> {
        Ok(self.scene.get(node)?.world_bounds())
    }

    fn set_scale(&mut self, node: NodeId, sx: f32, sy: f32, sz: f32) -> Result<()> {
        self.scene.get_mut(node)?.scale = Vector3f::new(sx, sy, sz);
        Ok(())
    }

    fn set_position(&mut self, node: NodeId, x: f32, y: f32, z: f32) -> Result<()> {
        self.scene.get_mut(node)?.position = Point3f::new(x, y, z);
        Ok(())
    }

    fn remove_node(&mut self, node: NodeId) -> Result<()> {
        self.scene.remove(node).map(|_| ())
    }

    fn node_count(&self) -> usize {
        self.scene.len()
    }

    fn set_camera_position(&mut self, x: f32, y: f32, z: f32) {
        self.camera.set_position(Point3f::new(x, y, z));
    }

    fn render_frame(&mut self) -> Result<PixelBuffer> {
        let view_projection = self.camera.view_projection();
        let mut raster = Rasterizer::new(
            self.width,
            self.height,
            self.shading,
            self.camera.near,
            self.camera.far,
        );
        for node in self.scene.iter() {
            raster.draw_mesh(
                &node.mesh,
                &node.transform().matrix,
                &view_projection,
                &self.camera.position,
            );
        }
        Ok(raster.into_buffer())
    }

    fn save_image(&self, buffer: &PixelBuffer, path: &Path) -> Result<()> {
        imgsynth_io::write_bmp(buffer, path)
    }

    fn bind_depth_shader(&mut self) {
        self.shading = ShadingMode::Depth;
    }

    fn unbind_depth_shader(&mut self) {
        self.shading = ShadingMode::Color;
    }
}
