//! Z-buffered triangle rasterizer

use nalgebra::{Matrix4, Point3, Vector3};

use imgsynth_core::{PixelBuffer, TriangleMesh};

/// How fragments are coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Flat Lambert shading of each mesh's base colour
    #[default]
    Color,
    /// Grey level from eye distance: near is white, far is black
    Depth,
}

/// Clear colour for colour frames
pub const SKY_COLOR: [u8; 3] = [135, 180, 230];

/// Fraction of the base colour that is always lit
const AMBIENT: f32 = 0.45;

/// Per-frame render target plus the depth buffer
pub struct Rasterizer {
    width: u32,
    height: u32,
    mode: ShadingMode,
    near: f32,
    far: f32,
    light_dir: Vector3<f32>,
    color: PixelBuffer,
    /// Interpolated 1/w per pixel; larger is closer, 0 is empty
    inv_depth: Vec<f32>,
}

/// A vertex after projection to screen space
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    inv_w: f32,
}

impl Rasterizer {
    /// Create a cleared target
    pub fn new(width: u32, height: u32, mode: ShadingMode, near: f32, far: f32) -> Self {
        let clear = match mode {
            ShadingMode::Color => SKY_COLOR,
            ShadingMode::Depth => [0, 0, 0],
        };
        Self {
            width,
            height,
            mode,
            near,
            far,
            light_dir: Vector3::new(-0.4, -0.6, 0.7).normalize(),
            color: PixelBuffer::filled(width, height, clear),
            inv_depth: vec![0.0; width as usize * height as usize],
        }
    }

    /// Draw a mesh with the given model and view-projection matrices
    pub fn draw_mesh(
        &mut self,
        mesh: &TriangleMesh,
        model: &Matrix4<f32>,
        view_projection: &Matrix4<f32>,
        eye: &Point3<f32>,
    ) {
        let world: Vec<Point3<f32>> = mesh
            .vertices
            .iter()
            .map(|v| Point3::from_homogeneous(model * v.to_homogeneous()).unwrap_or(*v))
            .collect();

        for face in &mesh.faces {
            let p = [world[face[0]], world[face[1]], world[face[2]]];

            let mut normal = (p[1] - p[0]).cross(&(p[2] - p[0]));
            if normal.norm_squared() <= f32::EPSILON {
                continue;
            }
            normal.normalize_mut();
            // Two-sided: face the normal toward the eye
            if normal.dot(&(eye - p[0])) < 0.0 {
                normal = -normal;
            }

            let mut screen = [ScreenVertex { x: 0.0, y: 0.0, inv_w: 0.0 }; 3];
            let mut behind = false;
            for (s, v) in screen.iter_mut().zip(p.iter()) {
                let clip = view_projection * v.to_homogeneous();
                // Reject triangles crossing the near plane
                if clip.w < self.near {
                    behind = true;
                    break;
                }
                let inv_w = 1.0 / clip.w;
                *s = ScreenVertex {
                    x: (clip.x * inv_w + 1.0) * 0.5 * self.width as f32,
                    y: (1.0 - clip.y * inv_w) * 0.5 * self.height as f32,
                    inv_w,
                };
            }
            if behind {
                continue;
            }

            let shade = match self.mode {
                ShadingMode::Color => {
                    let diffuse = normal.dot(&self.light_dir).max(0.0);
                    let k = AMBIENT + (1.0 - AMBIENT) * diffuse;
                    Some(mesh.color.map(|c| (c as f32 * k).round().clamp(0.0, 255.0) as u8))
                }
                ShadingMode::Depth => None,
            };

            self.fill_triangle(&screen, shade);
        }
    }

    /// Scan-convert one projected triangle
    fn fill_triangle(&mut self, v: &[ScreenVertex; 3], shade: Option<[u8; 3]>) {
        let area = edge(&v[0], &v[1], v[2].x, v[2].y);
        if area.abs() < 1e-8 {
            return;
        }

        let min_x = v.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let max_x = v
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil()
            .min(self.width as f32 - 1.0);
        let min_y = v.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let max_y = v
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil()
            .min(self.height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for py in min_y as u32..=max_y as u32 {
            for px in min_x as u32..=max_x as u32 {
                let (sx, sy) = (px as f32 + 0.5, py as f32 + 0.5);
                let w0 = edge(&v[1], &v[2], sx, sy) / area;
                let w1 = edge(&v[2], &v[0], sx, sy) / area;
                let w2 = edge(&v[0], &v[1], sx, sy) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let inv_w = w0 * v[0].inv_w + w1 * v[1].inv_w + w2 * v[2].inv_w;
                let idx = py as usize * self.width as usize + px as usize;
                if inv_w <= self.inv_depth[idx] {
                    continue;
                }
                self.inv_depth[idx] = inv_w;

                let color = match shade {
                    Some(c) => c,
                    None => self.depth_color(1.0 / inv_w),
                };
                self.color.set(px, py, color);
            }
        }
    }

    /// Grey level for an eye-space distance
    fn depth_color(&self, distance: f32) -> [u8; 3] {
        let t = ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0);
        let g = ((1.0 - t) * 255.0).round() as u8;
        [g, g, g]
    }

    /// Finish the frame
    pub fn into_buffer(self) -> PixelBuffer {
        self.color
    }
}

fn edge(a: &ScreenVertex, b: &ScreenVertex, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use imgsynth_core::Point3f;

    fn facing_quad(y: f32, half: f32, color: [u8; 3]) -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(-half, y, 5.0 - half),
                Point3f::new(half, y, 5.0 - half),
                Point3f::new(half, y, 5.0 + half),
                Point3f::new(-half, y, 5.0 + half),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .with_color(color)
    }

    fn render(meshes: &[TriangleMesh], mode: ShadingMode) -> PixelBuffer {
        let camera = Camera::default();
        let mut raster = Rasterizer::new(64, 48, mode, camera.near, camera.far);
        for mesh in meshes {
            raster.draw_mesh(mesh, &Matrix4::identity(), &camera.view_projection(), &camera.position);
        }
        raster.into_buffer()
    }

    #[test]
    fn test_empty_frame_is_sky() {
        let frame = render(&[], ShadingMode::Color);
        assert_eq!(frame.get(0, 0), Some(SKY_COLOR));
        assert_eq!(frame.get(63, 47), Some(SKY_COLOR));
    }

    #[test]
    fn test_quad_covers_center() {
        let frame = render(&[facing_quad(0.0, 2.0, [200, 0, 0])], ShadingMode::Color);
        let center = frame.get(32, 24).unwrap();
        assert_ne!(center, SKY_COLOR);
        assert!(center[0] > 0 && center[1] == 0 && center[2] == 0);
        assert_eq!(frame.get(0, 0), Some(SKY_COLOR));
    }

    #[test]
    fn test_nearer_surface_wins_regardless_of_order() {
        let near = facing_quad(-10.0, 1.0, [0, 200, 0]);
        let far = facing_quad(20.0, 8.0, [0, 0, 200]);

        let a = render(&[near.clone(), far.clone()], ShadingMode::Color);
        let b = render(&[far, near], ShadingMode::Color);
        assert_eq!(a.get(32, 24), b.get(32, 24));
        assert!(a.get(32, 24).unwrap()[1] > 0);
    }

    #[test]
    fn test_depth_mode_is_grey_and_brighter_when_near() {
        let near = render(&[facing_quad(-10.0, 1.0, [255, 0, 0])], ShadingMode::Depth);
        let far = render(&[facing_quad(60.0, 10.0, [255, 0, 0])], ShadingMode::Depth);

        let n = near.get(32, 24).unwrap();
        let f = far.get(32, 24).unwrap();
        assert_eq!(n[0], n[1]);
        assert_eq!(n[1], n[2]);
        assert!(n[0] > f[0]);
        assert_eq!(near.get(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_geometry_behind_camera_is_skipped() {
        let frame = render(&[facing_quad(-30.0, 50.0, [255, 255, 255])], ShadingMode::Color);
        assert_eq!(frame.get(32, 24), Some(SKY_COLOR));
    }
}
