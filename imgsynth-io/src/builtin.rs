//! Procedural assets available without any files on disk
//!
//! All builtins are Z-up with their local origin on the ground plane, so a
//! model placed at height `h` stands on `z = h`.

use imgsynth_core::{Point3f, TriangleMesh};

/// Identifier prefix that selects a builtin asset
pub const BUILTIN_PREFIX: &str = "builtin:";

/// Procedural meshes addressable as `builtin:<name>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinAsset {
    Cube,
    Pyramid,
    Panda,
    Environment,
}

impl BuiltinAsset {
    /// All builtins, in listing order
    pub const ALL: [BuiltinAsset; 4] = [
        BuiltinAsset::Cube,
        BuiltinAsset::Pyramid,
        BuiltinAsset::Panda,
        BuiltinAsset::Environment,
    ];

    /// Parse the part of an identifier after [`BUILTIN_PREFIX`]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "cube" | "box" => Some(BuiltinAsset::Cube),
            "pyramid" => Some(BuiltinAsset::Pyramid),
            "panda" | "panda-model" => Some(BuiltinAsset::Panda),
            "environment" | "env" => Some(BuiltinAsset::Environment),
            _ => None,
        }
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinAsset::Cube => "cube",
            BuiltinAsset::Pyramid => "pyramid",
            BuiltinAsset::Panda => "panda",
            BuiltinAsset::Environment => "environment",
        }
    }

    /// Full identifier, e.g. `builtin:cube`
    pub fn identifier(&self) -> String {
        format!("{}{}", BUILTIN_PREFIX, self.name())
    }

    /// Build the mesh
    pub fn mesh(&self) -> TriangleMesh {
        match self {
            BuiltinAsset::Cube => {
                make_box(Point3f::new(-0.5, -0.5, 0.0), Point3f::new(0.5, 0.5, 1.0))
                    .with_color([200, 80, 60])
            }
            BuiltinAsset::Pyramid => make_pyramid(1.0, 1.0).with_color([220, 180, 60]),
            BuiltinAsset::Panda => make_panda(),
            BuiltinAsset::Environment => make_environment(),
        }
    }
}

/// Axis-aligned box between two corners
pub fn make_box(min: Point3f, max: Point3f) -> TriangleMesh {
    let vertices = vec![
        Point3f::new(min.x, min.y, min.z),
        Point3f::new(max.x, min.y, min.z),
        Point3f::new(max.x, max.y, min.z),
        Point3f::new(min.x, max.y, min.z),
        Point3f::new(min.x, min.y, max.z),
        Point3f::new(max.x, min.y, max.z),
        Point3f::new(max.x, max.y, max.z),
        Point3f::new(min.x, max.y, max.z),
    ];
    // Counter-clockwise seen from outside
    let faces = vec![
        [0, 2, 1], [0, 3, 2], // bottom
        [4, 5, 6], [4, 6, 7], // top
        [0, 1, 5], [0, 5, 4], // front (-y)
        [2, 3, 7], [2, 7, 6], // back (+y)
        [1, 2, 6], [1, 6, 5], // right (+x)
        [3, 0, 4], [3, 4, 7], // left (-x)
    ];
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

/// Square pyramid with its base centred on the origin
pub fn make_pyramid(base: f32, height: f32) -> TriangleMesh {
    let h = base / 2.0;
    let vertices = vec![
        Point3f::new(-h, -h, 0.0),
        Point3f::new(h, -h, 0.0),
        Point3f::new(h, h, 0.0),
        Point3f::new(-h, h, 0.0),
        Point3f::new(0.0, 0.0, height),
    ];
    let faces = vec![
        [0, 2, 1], [0, 3, 2],
        [0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4],
    ];
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

/// Blocky seated figure, roughly 4 units tall, facing -y
fn make_panda() -> TriangleMesh {
    let parts = [
        // legs
        ([-1.0, -0.9, 0.0], [-0.3, -0.2, 0.8]),
        ([0.3, -0.9, 0.0], [1.0, -0.2, 0.8]),
        ([-1.0, 0.2, 0.0], [-0.3, 0.9, 1.0]),
        ([0.3, 0.2, 0.0], [1.0, 0.9, 1.0]),
        // body
        ([-1.1, -0.8, 0.6], [1.1, 0.8, 2.6]),
        // arms
        ([-1.5, -0.5, 1.4], [-1.1, 0.3, 2.4]),
        ([1.1, -0.5, 1.4], [1.5, 0.3, 2.4]),
        // head
        ([-0.8, -0.9, 2.6], [0.8, 0.5, 3.7]),
        // ears
        ([-0.8, -0.3, 3.7], [-0.4, 0.1, 4.0]),
        ([0.4, -0.3, 3.7], [0.8, 0.1, 4.0]),
    ];

    let mut mesh = TriangleMesh::new();
    for (min, max) in parts {
        mesh.append(&make_box(
            Point3f::new(min[0], min[1], min[2]),
            Point3f::new(max[0], max[1], max[2]),
        ));
    }
    mesh.with_color([235, 235, 230])
}

/// Grid resolution of the environment terrain
const TERRAIN_CELLS: usize = 48;

/// Terrain height field: a flat floor in front, rising into ridges behind
fn terrain_height(x: f32, y: f32) -> f32 {
    let (y0, y1) = (-288.0_f32, 152.0_f32);
    let t = ((y - y0) / (y1 - y0)).clamp(0.0, 1.0);
    let ridge = smoothstep(0.7, 1.0, t);
    let side = smoothstep(120.0, 190.0, (x - 32.0).abs());
    let undulation = 0.6 + 0.4 * (x * 0.045).sin() * (y * 0.03).cos();
    let bumps = 1.5 * (x * 0.21).sin() * (y * 0.17).sin();
    (200.0 * ridge * undulation + 80.0 * side + bumps).max(0.0)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Backdrop terrain in local units
///
/// Sized so that with scale 0.25 and offset (-8, 42, 2) the floor sits at
/// world z = 2 and spans the area in front of a camera at (0, -20, 5).
fn make_environment() -> TriangleMesh {
    let (x0, x1) = (-128.0_f32, 192.0_f32);
    let (y0, y1) = (-288.0_f32, 152.0_f32);
    let n = TERRAIN_CELLS;

    let mut mesh = TriangleMesh::new();
    for j in 0..=n {
        for i in 0..=n {
            let x = x0 + (x1 - x0) * i as f32 / n as f32;
            let y = y0 + (y1 - y0) * j as f32 / n as f32;
            mesh.add_vertex(Point3f::new(x, y, terrain_height(x, y)));
        }
    }

    let row = n + 1;
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i;
            let b = a + 1;
            let c = a + row + 1;
            let d = a + row;
            mesh.add_face([a, b, c]);
            mesh.add_face([a, c, d]);
        }
    }
    mesh.with_color([96, 140, 72])
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgsynth_core::{bbox_height, Drawable};

    #[test]
    fn test_names_round_trip() {
        for asset in BuiltinAsset::ALL {
            assert_eq!(BuiltinAsset::from_name(asset.name()), Some(asset));
        }
        assert_eq!(BuiltinAsset::from_name("Panda-Model"), Some(BuiltinAsset::Panda));
        assert_eq!(BuiltinAsset::from_name("sphere"), None);
    }

    #[test]
    fn test_identifiers_load_through_prefix() {
        for asset in BuiltinAsset::ALL {
            let identifier = asset.identifier();
            assert!(identifier.starts_with(BUILTIN_PREFIX));
            let mesh = crate::load_mesh(&identifier).unwrap();
            assert_eq!(mesh.face_count(), asset.mesh().face_count());
        }
    }

    #[test]
    fn test_all_builtins_are_valid_meshes() {
        for asset in BuiltinAsset::ALL {
            let mesh = asset.mesh();
            assert!(!mesh.is_empty(), "{} is empty", asset.name());
            assert!(mesh.has_valid_faces(), "{} has dangling faces", asset.name());
            assert!(bbox_height(&mesh.bounding_box()) > 0.0, "{} is flat", asset.name());
        }
    }

    #[test]
    fn test_panda_stands_on_origin() {
        let (min, max) = BuiltinAsset::Panda.mesh().bounding_box();
        assert_eq!(min.z, 0.0);
        assert_eq!(max.z, 4.0);
    }

    #[test]
    fn test_environment_floor_is_flat_near_camera() {
        // World (0, -10) maps to local (32, -208)
        assert!(terrain_height(32.0, -208.0) < 2.0);
        assert!(terrain_height(32.0, 150.0) > 50.0);
    }
}
