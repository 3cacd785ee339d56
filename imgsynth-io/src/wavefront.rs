//! Wavefront OBJ support

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use imgsynth_core::{Error, Point3f, Result, TriangleMesh};
use obj::ObjData;

use crate::MeshReader;

/// Options controlling how OBJ geometry is brought into the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjReadOptions {
    /// Treat the file as Y-up and rotate it into the scene's Z-up frame
    pub y_up: bool,
    /// Base colour assigned to the loaded mesh
    pub color: [u8; 3],
}

impl Default for ObjReadOptions {
    fn default() -> Self {
        Self {
            y_up: true,
            color: [200, 200, 200],
        }
    }
}

pub struct ObjReader;

impl ObjReader {
    /// Read an OBJ file with explicit options
    pub fn read_mesh_with_options<P: AsRef<Path>>(
        path: P,
        options: &ObjReadOptions,
    ) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let identifier = path.display().to_string();

        let file = File::open(path).map_err(|e| Error::asset_load(&identifier, e.to_string()))?;
        let data = ObjData::load_buf(BufReader::new(file))
            .map_err(|e| Error::asset_load(&identifier, e.to_string()))?;

        Self::data_to_mesh(&data, options).map_err(|e| Error::asset_load(identifier, e.to_string()))
    }

    /// Convert parsed OBJ data to a triangle mesh
    ///
    /// Polygons with more than three corners are fan-triangulated; lines and
    /// points are skipped.
    pub fn data_to_mesh(data: &ObjData, options: &ObjReadOptions) -> Result<TriangleMesh> {
        let vertices: Vec<Point3f> = data
            .position
            .iter()
            .map(|&[x, y, z]| {
                if options.y_up {
                    Point3f::new(x, -z, y)
                } else {
                    Point3f::new(x, y, z)
                }
            })
            .collect();

        let mut faces = Vec::new();
        for object in &data.objects {
            for group in &object.groups {
                for poly in &group.polys {
                    let corners: Vec<usize> = poly.0.iter().map(|t| t.0).collect();
                    if corners.len() < 3 {
                        continue;
                    }
                    for i in 1..corners.len() - 1 {
                        faces.push([corners[0], corners[i], corners[i + 1]]);
                    }
                }
            }
        }

        let mesh = TriangleMesh::from_vertices_and_faces(vertices, faces).with_color(options.color);
        if !mesh.has_valid_faces() {
            return Err(Error::InvalidData(
                "face references a vertex index out of range".to_string(),
            ));
        }
        Ok(mesh)
    }
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        Self::read_mesh_with_options(path, &ObjReadOptions::default())
    }
}
