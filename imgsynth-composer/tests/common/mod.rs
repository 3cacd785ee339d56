//! Recording renderer used to test the composer without drawing anything

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use imgsynth_composer::CancelFlag;
use imgsynth_core::{BoundingBox, Error, NodeId, PixelBuffer, Point3f, Renderer, Result};

pub const BACKGROUND: &str = "bg";
pub const MODEL: &str = "model";

/// Background is 48 units tall after scaling, the model 4, so the
/// baseline scale is (48 / 24) / 4 = 0.5
pub const SCALED_BACKGROUND_HEIGHT: f32 = 48.0;
pub const MODEL_HEIGHT: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Resize(u32, u32),
    Load(String, NodeId),
    Remove(NodeId),
    Camera(Point3f),
    Render { depth: bool, nodes: usize },
    Save(PathBuf),
    BindDepth,
    UnbindDepth,
}

#[derive(Debug, Clone)]
struct FakeNode {
    asset: String,
    height: f32,
    scale: [f32; 3],
    position: Point3f,
}

pub struct FakeRenderer {
    next_id: usize,
    nodes: BTreeMap<usize, FakeNode>,
    depth: bool,
    saves: Cell<usize>,
    pub events: Vec<Event>,
    /// Asset identifiers that fail to load
    pub missing: Vec<String>,
    /// Asset identifiers that load with zero height
    pub flat: Vec<String>,
    /// Fail every `remove_node` call
    pub refuse_removal: bool,
    /// Raise the flag once this many files have been saved
    pub cancel_after_saves: Option<(usize, CancelFlag)>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            nodes: BTreeMap::new(),
            depth: false,
            saves: Cell::new(0),
            events: Vec::new(),
            missing: Vec::new(),
            flat: Vec::new(),
            refuse_removal: false,
            cancel_after_saves: None,
        }
    }

    pub fn scale_of(&self, node: NodeId) -> Option<[f32; 3]> {
        self.nodes.get(&node.0).map(|n| n.scale)
    }

    pub fn assets_in_scene(&self) -> Vec<String> {
        self.nodes.values().map(|n| n.asset.clone()).collect()
    }

    pub fn renders(&self) -> Vec<(bool, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Render { depth, nodes } => Some((*depth, *nodes)),
                _ => None,
            })
            .collect()
    }

    pub fn cameras(&self) -> Vec<Point3f> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Camera(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for FakeRenderer {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.events.push(Event::Resize(width, height));
        Ok(())
    }

    fn load_asset(&mut self, identifier: &str) -> Result<NodeId> {
        if self.missing.iter().any(|m| m == identifier) {
            return Err(Error::asset_load(identifier, "not found"));
        }
        let height = if self.flat.iter().any(|f| f == identifier) {
            0.0
        } else if identifier == BACKGROUND {
            SCALED_BACKGROUND_HEIGHT * 4.0
        } else {
            MODEL_HEIGHT
        };
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id.0,
            FakeNode {
                asset: identifier.to_string(),
                height,
                scale: [1.0; 3],
                position: Point3f::origin(),
            },
        );
        self.events.push(Event::Load(identifier.to_string(), id));
        Ok(id)
    }

    fn bounding_box(&self, node: NodeId) -> Result<BoundingBox> {
        let n = self.nodes.get(&node.0).ok_or(Error::UnknownNode(node.0))?;
        let top = n.height * n.scale[2];
        Ok((
            Point3f::new(n.position.x - 1.0, n.position.y - 1.0, n.position.z),
            Point3f::new(n.position.x + 1.0, n.position.y + 1.0, n.position.z + top),
        ))
    }

    fn set_scale(&mut self, node: NodeId, sx: f32, sy: f32, sz: f32) -> Result<()> {
        let n = self.nodes.get_mut(&node.0).ok_or(Error::UnknownNode(node.0))?;
        n.scale = [sx, sy, sz];
        Ok(())
    }

    fn set_position(&mut self, node: NodeId, x: f32, y: f32, z: f32) -> Result<()> {
        let n = self.nodes.get_mut(&node.0).ok_or(Error::UnknownNode(node.0))?;
        n.position = Point3f::new(x, y, z);
        Ok(())
    }

    fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if self.refuse_removal {
            return Err(Error::Render(format!("cannot remove {}", node)));
        }
        self.nodes.remove(&node.0).ok_or(Error::UnknownNode(node.0))?;
        self.events.push(Event::Remove(node));
        Ok(())
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn set_camera_position(&mut self, x: f32, y: f32, z: f32) {
        self.events.push(Event::Camera(Point3f::new(x, y, z)));
    }

    fn render_frame(&mut self) -> Result<PixelBuffer> {
        self.events.push(Event::Render {
            depth: self.depth,
            nodes: self.nodes.len(),
        });
        Ok(PixelBuffer::filled(2, 2, [0, 0, 0]))
    }

    fn save_image(&self, _buffer: &PixelBuffer, path: &Path) -> Result<()> {
        fs::write(path, b"BM")?;
        self.saves.set(self.saves.get() + 1);
        if let Some((limit, flag)) = &self.cancel_after_saves {
            if self.saves.get() >= *limit {
                flag.cancel();
            }
        }
        Ok(())
    }

    fn bind_depth_shader(&mut self) {
        self.depth = true;
        self.events.push(Event::BindDepth);
    }

    fn unbind_depth_shader(&mut self) {
        self.depth = false;
        self.events.push(Event::UnbindDepth);
    }
}

/// Fresh, empty directory under the system temp dir
pub fn temp_out_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("imgsynth_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

/// Sorted file names in `dir`
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
