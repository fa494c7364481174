use rustc_hash::FxHashSet;

use crate::scene::{NodeId, Scene};

/// Nodes currently recolored for the selection, with the colors they had
/// before.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSet {
    entries: Vec<(NodeId, [f32; 3])>,
    color: [f32; 3],
}

impl HighlightSet {
    /// An empty set that paints selections in `color`.
    #[must_use]
    pub fn new(color: [f32; 3]) -> Self {
        Self {
            entries: Vec::new(),
            color,
        }
    }

    /// Restore the previous selection, then highlight `nodes`.
    ///
    /// Duplicate and unknown ids are ignored, so every recorded original
    /// color is a real pre-highlight color.
    pub fn select(&mut self, scene: &mut Scene, nodes: &[NodeId]) {
        self.clear(scene);
        let mut seen = FxHashSet::default();
        for &id in nodes {
            if !seen.insert(id) {
                continue;
            }
            if let Some(original) = scene.set_color(id, self.color) {
                self.entries.push((id, original));
            }
        }
    }

    /// Put back every original color and forget the selection.
    pub fn clear(&mut self, scene: &mut Scene) {
        for (id, original) in self.entries.drain(..) {
            let _ = scene.set_color(id, original);
        }
    }

    /// Whether nothing is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of highlighted nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether `id` is highlighted.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.iter().any(|(n, _)| *n == id)
    }

    /// Highlighted nodes in selection order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Color used for highlighted nodes.
    #[must_use]
    pub fn color(&self) -> [f32; 3] {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::description::ModelKind;
    use crate::scene::{Node, Shape};

    const GOLD: [f32; 3] = [1.0, 0.84, 0.0];

    fn spheres(colors: &[[f32; 3]]) -> (Scene, Vec<NodeId>) {
        let mut scene = Scene::new(ModelKind::Molecule);
        let root = scene.root();
        let ids = colors
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                scene.add_node(
                    root,
                    Node::new(Shape::Sphere {
                        center: Vec3::X * i as f32,
                        radius: 0.3,
                    })
                    .with_color(c),
                )
            })
            .collect();
        (scene, ids)
    }

    #[test]
    fn select_then_clear_restores_colors() {
        let (mut scene, ids) = spheres(&[[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let mut set = HighlightSet::new(GOLD);
        set.select(&mut scene, &ids);
        assert_eq!(set.len(), 2);
        assert_eq!(scene.color(ids[0]), Some(GOLD));
        set.clear(&mut scene);
        assert!(set.is_empty());
        assert_eq!(scene.color(ids[0]), Some([1.0, 0.0, 0.0]));
        assert_eq!(scene.color(ids[1]), Some([0.0, 0.0, 1.0]));
    }

    #[test]
    fn second_select_leaves_only_second_entity_lit() {
        let (mut scene, ids) = spheres(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let mut set = HighlightSet::new(GOLD);
        set.select(&mut scene, &ids[..1]);
        set.select(&mut scene, &ids[1..]);
        assert!(!set.contains(ids[0]));
        assert!(set.contains(ids[1]));
        assert_eq!(scene.color(ids[0]), Some([1.0, 0.0, 0.0]));
        assert_eq!(scene.color(ids[1]), Some(GOLD));
    }

    #[test]
    fn reselecting_same_nodes_keeps_true_originals() {
        let (mut scene, ids) = spheres(&[[0.2, 0.2, 0.2]]);
        let mut set = HighlightSet::new(GOLD);
        set.select(&mut scene, &[ids[0], ids[0]]);
        assert_eq!(set.len(), 1);
        set.select(&mut scene, &ids);
        set.clear(&mut scene);
        assert_eq!(scene.color(ids[0]), Some([0.2, 0.2, 0.2]));
    }
}
