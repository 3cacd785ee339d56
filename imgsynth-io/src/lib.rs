//! Asset loading and bitmap output
//! 
//! Assets are addressed by identifier. `builtin:<name>` resolves to one of
//! the procedural meshes in [`builtin`]; anything else is treated as a path
//! and read according to its extension.

pub mod wavefront;
pub mod builtin;
pub mod bitmap;

pub use bitmap::write_bmp;
pub use builtin::{BuiltinAsset, BUILTIN_PREFIX};
pub use wavefront::{ObjReadOptions, ObjReader};

use std::path::Path;

use imgsynth_core::{Error, Result, TriangleMesh};

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Resolve an asset identifier to a mesh
///
/// Fails with [`Error::AssetLoad`] when the identifier names an unknown
/// builtin, a missing or unreadable file, or geometry with no faces.
pub fn load_mesh(identifier: &str) -> Result<TriangleMesh> {
    let mesh = if let Some(name) = identifier.strip_prefix(BUILTIN_PREFIX) {
        BuiltinAsset::from_name(name)
            .ok_or_else(|| Error::asset_load(identifier, "unknown builtin asset"))?
            .mesh()
    } else {
        read_mesh(identifier).map_err(|e| match e {
            Error::AssetLoad { .. } => e,
            other => Error::asset_load(identifier, other.to_string()),
        })?
    };

    if mesh.is_empty() {
        return Err(Error::asset_load(identifier, "mesh has no faces"));
    }
    if !mesh.has_valid_faces() {
        return Err(Error::asset_load(identifier, "face references a missing vertex"));
    }

    log::debug!(
        "Loaded asset {} ({} vertices, {} faces)",
        identifier,
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("obj") => ObjReader::read_mesh(path),
        _ => Err(Error::asset_load(
            path.display().to_string(),
            format!("unsupported mesh format: {:?}", path.extension()),
        )),
    }
}
