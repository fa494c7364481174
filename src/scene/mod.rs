//! Authoritative scene: flat node arena, parent table, per-scene id
//! indices.
//!
//! Every primitive a builder creates is a [`Node`] owned by the [`Scene`]
//! arena and addressed by [`NodeId`]. Ownership (a bond group owning its
//! cylinders, an atom owning its label) is an explicit parent index per
//! node, so finding the nearest tagged ancestor is a table walk. The scene
//! is plain data: an external renderer reads shapes and colors from it and
//! writes nothing back.

mod bounds;
mod node;
pub mod pick;
mod tag;

pub use bounds::Aabb;
use glam::Vec3;
pub use node::{text_scale, LabelShape, Node, NodeId, Shape};
pub use pick::{Ray, RayHit};
use rustc_hash::FxHashMap;
pub use tag::{AtomTag, BondTag, EntityId, EntityKind, EntityTag, FaceTag};

use crate::description::ModelKind;

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The authoritative scene. Owns all nodes in a flat arena.
#[derive(Debug, Clone)]
pub struct Scene {
    kind: ModelKind,
    /// Nodes in insertion order; index == `NodeId`.
    nodes: Vec<Node>,
    /// Scaled atom positions in atom-index order (molecules only).
    atom_positions: Vec<Vec3>,
    /// Face id -> triangle nodes carrying that face id.
    face_index: FxHashMap<usize, Vec<NodeId>>,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Scene {
    /// Create a scene holding only its root group.
    #[must_use]
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            nodes: vec![Node::group()],
            atom_positions: Vec::new(),
            face_index: FxHashMap::default(),
            generation: 0,
            rendered_generation: 0,
        }
    }

    /// Domain variant this scene was built for.
    #[must_use]
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// The root group every builder attaches to.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    // -- Mutation helpers --

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered (call after a redraw consumed
    /// the scene).
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    // -- Node management --

    /// Attach `node` under `parent` and return its id. An unknown parent
    /// attaches to the root.
    pub fn add_node(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let parent = if parent.index() < self.nodes.len() {
            parent
        } else {
            NodeId::ROOT
        };
        let id = NodeId::from_index(self.nodes.len());
        node.parent = Some(parent);
        if let Some(EntityTag::Face(face)) = &node.tag {
            self.face_index.entry(face.face_id).or_default().push(id);
        }
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        self.invalidate();
        id
    }

    /// Read access to a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes with their ids, in insertion order (root first).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_index(i), node))
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds nothing but its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Owning node of `id`, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn lineage(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.node(id).map(|_| id);
        std::iter::successors(start, move |&current| self.parent(current))
    }

    /// Every node below `id`, depth first.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .node(id)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(node) = self.node(next) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Current color of a node.
    #[must_use]
    pub fn color(&self, id: NodeId) -> Option<[f32; 3]> {
        self.node(id).map(|n| n.color)
    }

    /// Recolor a node; returns the color it had before.
    pub fn set_color(&mut self, id: NodeId, color: [f32; 3]) -> Option<[f32; 3]> {
        let node = self.nodes.get_mut(id.index())?;
        let previous = std::mem::replace(&mut node.color, color);
        self.invalidate();
        Some(previous)
    }

    // -- Tag lookup --

    /// Triangle nodes carrying face id `face_id`.
    #[must_use]
    pub fn face_nodes(&self, face_id: usize) -> &[NodeId] {
        self.face_index.get(&face_id).map_or(&[], Vec::as_slice)
    }

    /// Nodes that carry an entity tag.
    pub fn tagged(&self) -> impl Iterator<Item = (NodeId, &EntityTag)> + '_ {
        self.iter()
            .filter_map(|(id, node)| node.tag.as_ref().map(|tag| (id, tag)))
    }

    /// Number of tagged nodes of the given kind.
    #[must_use]
    pub fn count_tagged(&self, kind: EntityKind) -> usize {
        self.tagged().filter(|(_, tag)| tag.kind() == kind).count()
    }

    /// Number of nodes a ray query can hit.
    #[must_use]
    pub fn pickable_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.pickable).count()
    }

    // -- Molecule metadata --

    /// Scaled atom positions, indexed by atom index.
    #[must_use]
    pub fn atom_positions(&self) -> &[Vec3] {
        &self.atom_positions
    }

    pub(crate) fn set_atom_positions(&mut self, positions: Vec<Vec3>) {
        self.atom_positions = positions;
    }

    // -- Extent --

    /// Bounding box of all geometry (labels excluded).
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        self.nodes
            .iter()
            .filter(|n| n.shape.is_geometry())
            .filter_map(|n| n.shape.bounds())
            .reduce(|a, b| a.union(&b))
    }

    /// Multiply every label by `diagonal / divisor` of the geometry bounds.
    /// Returns the factor applied. Degenerate extents leave labels alone.
    pub(crate) fn scale_labels(&mut self, divisor: f32) -> f32 {
        let diagonal = self.bounds().map_or(0.0, |b| b.diagonal());
        let factor = if diagonal > f32::EPSILON && divisor > f32::EPSILON {
            diagonal / divisor
        } else {
            1.0
        };
        for node in &mut self.nodes {
            if let Shape::Label(label) = &mut node.shape {
                label.scale *= factor;
            }
        }
        self.invalidate();
        factor
    }
}
