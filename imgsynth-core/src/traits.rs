//! Core traits for imgsynth

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{buffer::PixelBuffer, error::Result, mesh::TriangleMesh, point::*};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> BoundingBox;

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> BoundingBox {
        bounding_box_of(&self.vertices)
    }
}

/// Handle to a node in a renderer's scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scene-graph renderer driven by the scene composer
///
/// Implementations own the scene, the camera and the output surface. Every
/// call is synchronous: `render_frame` returns once the frame is complete.
pub trait Renderer {
    /// Resize the output surface
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Load an asset and attach it to the scene with identity transform
    fn load_asset(&mut self, identifier: &str) -> Result<NodeId>;

    /// World-space bounding box of a node, with its transform applied
    fn bounding_box(&self, node: NodeId) -> Result<BoundingBox>;

    /// Set a node's per-axis scale
    fn set_scale(&mut self, node: NodeId, sx: f32, sy: f32, sz: f32) -> Result<()>;

    /// Set a node's position
    fn set_position(&mut self, node: NodeId, x: f32, y: f32, z: f32) -> Result<()>;

    /// Detach a node from the scene
    fn remove_node(&mut self, node: NodeId) -> Result<()>;

    /// Number of nodes currently attached to the scene
    fn node_count(&self) -> usize;

    /// Move the camera
    fn set_camera_position(&mut self, x: f32, y: f32, z: f32);

    /// Render the current scene
    fn render_frame(&mut self) -> Result<PixelBuffer>;

    /// Write a rendered frame to disk as an uncompressed bitmap
    ///
    /// The format is fixed regardless of the extension of `path`.
    fn save_image(&self, buffer: &PixelBuffer, path: &Path) -> Result<()>;

    /// Switch subsequent frames to depth visualization
    fn bind_depth_shader(&mut self);

    /// Restore normal colour output
    fn unbind_depth_shader(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_bounding_box_and_center() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(-1.0, 0.0, 0.0),
                Point3f::new(1.0, 2.0, 0.0),
                Point3f::new(0.0, 1.0, 4.0),
            ],
            vec![[0, 1, 2]],
        );
        let (min, max) = Drawable::bounding_box(&mesh);
        assert_eq!(min, Point3f::new(-1.0, 0.0, 0.0));
        assert_eq!(max, Point3f::new(1.0, 2.0, 4.0));
        assert_eq!(mesh.center(), Point3f::new(0.0, 1.0, 2.0));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(3).to_string(), "#3");
    }
}
