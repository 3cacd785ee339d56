//! Scene graph of mesh nodes

use std::collections::HashMap;
use std::sync::Arc;

use imgsynth_core::{
    BoundingBox, Drawable, Error, NodeId, Point3f, Result, Transform3D, TriangleMesh, Vector3f,
};

/// A mesh instance attached to the scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub mesh: Arc<TriangleMesh>,
    /// Local-space bounding box, cached at load time
    pub local_bounds: BoundingBox,
    pub scale: Vector3f,
    pub position: Point3f,
}

impl SceneNode {
    /// Create a node with identity transform
    pub fn new(name: impl Into<String>, mesh: Arc<TriangleMesh>) -> Self {
        let local_bounds = mesh.bounding_box();
        Self {
            name: name.into(),
            mesh,
            local_bounds,
            scale: Vector3f::new(1.0, 1.0, 1.0),
            position: Point3f::origin(),
        }
    }

    /// Model-to-world transform
    pub fn transform(&self) -> Transform3D {
        Transform3D::from_scale_translation(self.scale, self.position.coords)
    }

    /// World-space bounding box
    pub fn world_bounds(&self) -> BoundingBox {
        let t = self.transform();
        let a = t.transform_point(&self.local_bounds.0);
        let b = t.transform_point(&self.local_bounds.1);
        (a.inf(&b), a.sup(&b))
    }
}

/// Flat scene graph addressed by [`NodeId`]
///
/// Removed slots are left empty; trailing empty slots are dropped so that a
/// place-then-remove cycle does not grow the graph.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Option<SceneNode>>,
    mesh_cache: HashMap<String, Arc<TriangleMesh>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or reuse a cached copy of) an asset and attach it
    pub fn load(&mut self, identifier: &str) -> Result<NodeId> {
        let mesh = match self.mesh_cache.get(identifier) {
            Some(mesh) => Arc::clone(mesh),
            None => {
                let mesh = Arc::new(imgsynth_io::load_mesh(identifier)?);
                self.mesh_cache.insert(identifier.to_string(), Arc::clone(&mesh));
                mesh
            }
        };
        Ok(self.attach(SceneNode::new(identifier, mesh)))
    }

    /// Attach an already built node
    pub fn attach(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    pub fn get(&self, id: NodeId) -> Result<&SceneNode> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(Error::UnknownNode(id.0))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownNode(id.0))
    }

    /// Detach a node; removing an unknown node is an error
    pub fn remove(&mut self, id: NodeId) -> Result<SceneNode> {
        let node = self
            .nodes
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(Error::UnknownNode(id.0))?;
        while matches!(self.nodes.last(), Some(None)) {
            self.nodes.pop();
        }
        Ok(node)
    }

    /// Number of attached nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over attached nodes
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().flatten()
    }
}
