use super::{ResolvedEntity, SelectionReference};
use crate::scene::{EntityId, EntityKind, EntityTag, NodeId, Ray, Scene};

/// Resolve the entity owning a picked primitive.
///
/// Faces expand to every triangle sharing the face id, atoms stay a single
/// sphere, and anything else walks up the parent table to the nearest bond
/// group and takes its shape-bearing descendants.
#[must_use]
pub fn resolve_hit(scene: &Scene, hit: NodeId) -> Option<ResolvedEntity> {
    let node = scene.node(hit)?;
    match &node.tag {
        Some(tag @ EntityTag::Face(face)) => Some(ResolvedEntity {
            tag: tag.clone(),
            nodes: scene.face_nodes(face.face_id).to_vec(),
        }),
        Some(tag @ EntityTag::Atom(_)) => Some(ResolvedEntity {
            tag: tag.clone(),
            nodes: vec![hit],
        }),
        _ => scene.lineage(hit).find_map(|id| match &scene.node(id)?.tag {
            Some(tag @ EntityTag::Bond(_)) => Some(bond_entity(scene, id, tag)),
            _ => None,
        }),
    }
}

fn bond_entity(scene: &Scene, group: NodeId, tag: &EntityTag) -> ResolvedEntity {
    let nodes = scene
        .descendants(group)
        .into_iter()
        .filter(|&id| scene.node(id).is_some_and(|n| n.shape.is_geometry()))
        .collect();
    ResolvedEntity {
        tag: tag.clone(),
        nodes,
    }
}

/// Resolve an entity by kind and stable id by rescanning the scene's tags.
#[must_use]
pub fn resolve_id(
    scene: &Scene,
    kind: EntityKind,
    id: EntityId,
) -> Option<ResolvedEntity> {
    if let (EntityKind::Face, EntityId::Index(face_id)) = (kind, id) {
        let first = *scene.face_nodes(face_id).first()?;
        return resolve_hit(scene, first);
    }
    let (node, tag) = scene.tagged().find(|(_, tag)| tag.matches(kind, id))?;
    Some(match tag {
        EntityTag::Bond(_) => bond_entity(scene, node, tag),
        _ => ResolvedEntity {
            tag: tag.clone(),
            nodes: vec![node],
        },
    })
}

/// Resolve a captured reference against `scene`, which may be a rebuild
/// of the scene it was captured from.
#[must_use]
pub fn resolve_reference(
    scene: &Scene,
    reference: &SelectionReference,
) -> Option<ResolvedEntity> {
    resolve_id(scene, reference.kind, reference.id)
}

/// Cast `ray` into the scene and resolve whatever it hits first.
#[must_use]
pub fn resolve_ray(scene: &Scene, ray: &Ray) -> Option<ResolvedEntity> {
    let hit = scene.raycast(ray)?;
    let resolved = resolve_hit(scene, hit.node);
    if resolved.is_none() {
        log::debug!("ray hit untagged node {:?}", hit.node);
    }
    resolved
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::builder::build_scene;
    use crate::description::validate;
    use crate::options::Options;
    use crate::scene::Shape;

    fn water() -> Scene {
        let value = serde_json::json!({
            "atoms": [
                {"element": "O", "position": [0.0, 0.0, 0.0],
                 "bondAngles": [{"angle": 104.5, "atomsInvolved": "H-O-H",
                                 "atomsInvolvedIndices": [1, 0, 2]}]},
                {"element": "H", "position": [0.96, 0.0, 0.0]},
                {"element": "H", "position": [-0.24, 0.93, 0.0]}
            ],
            "bonds": [
                {"start": 0, "end": 1, "type": "single"},
                {"start": 0, "end": 2, "type": "double"}
            ]
        });
        let desc = validate(&value).unwrap().description;
        build_scene(&desc, &Options::default()).unwrap().scene
    }

    fn split_face_solid() -> Scene {
        let value = serde_json::json!({
            "vertices": [[0,0,0],[1,0,0],[1,1,0],[0,1,0],[0,0,1]],
            "faces": [
                {"triangles": [{"indices": [0,1,2]}, {"indices": [0,2,3]}]},
                {"triangles": [{"indices": [0,1,4]}]}
            ]
        });
        let desc = validate(&value).unwrap().description;
        build_scene(&desc, &Options::default()).unwrap().scene
    }

    fn cylinders(scene: &Scene) -> Vec<NodeId> {
        scene
            .iter()
            .filter(|(_, n)| matches!(n.shape, Shape::Cylinder { .. }))
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn face_hit_selects_every_triangle_of_the_face() {
        let scene = split_face_solid();
        let hit = scene.face_nodes(0)[1];
        let resolved = resolve_hit(&scene, hit).unwrap();
        assert_eq!(resolved.kind(), EntityKind::Face);
        assert_eq!(resolved.id(), EntityId::Index(0));
        assert_eq!(resolved.nodes, scene.face_nodes(0));
        assert_eq!(resolved.nodes.len(), 2);
    }

    #[test]
    fn cylinder_hit_resolves_to_its_bond() {
        let scene = water();
        // Second bond is double: its two cylinders come last
        let cyl = *cylinders(&scene).last().unwrap();
        let resolved = resolve_hit(&scene, cyl).unwrap();
        assert_eq!(resolved.id(), EntityId::Pair { start: 0, end: 2 });
        assert_eq!(resolved.nodes.len(), 2);
        assert!(resolved.nodes.contains(&cyl));
    }

    #[test]
    fn label_hit_resolves_nothing_but_root_is_safe() {
        let scene = water();
        let label = scene
            .iter()
            .find(|(_, n)| matches!(n.shape, Shape::Label(_)))
            .map(|(id, _)| id)
            .unwrap();
        // Labels hang off atoms; they are not tagged and not under a bond
        assert!(resolve_hit(&scene, label).is_none());
        assert!(resolve_hit(&scene, scene.root()).is_none());
    }

    #[test]
    fn resolve_by_id_matches_live_pick() {
        let scene = water();
        let atom = resolve_id(&scene, EntityKind::Atom, EntityId::Index(2)).unwrap();
        let EntityTag::Atom(tag) = atom.details() else {
            panic!("expected atom");
        };
        assert_eq!(tag.element, "H");
        assert_eq!(resolve_hit(&scene, atom.nodes[0]).unwrap(), atom);

        let bond = resolve_id(
            &scene,
            EntityKind::Bond,
            EntityId::Pair { start: 0, end: 1 },
        )
        .unwrap();
        assert_eq!(bond.nodes.len(), 1);
        assert!(resolve_id(
            &scene,
            EntityKind::Bond,
            EntityId::Pair { start: 1, end: 0 },
        )
        .is_none());
        assert!(resolve_id(&scene, EntityKind::Atom, EntityId::Index(9)).is_none());
    }

    #[test]
    fn ray_through_atom_resolves_atom() {
        let scene = water();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let resolved = resolve_ray(&scene, &ray).unwrap();
        assert_eq!(resolved.kind(), EntityKind::Atom);
        assert_eq!(resolved.id(), EntityId::Index(0));

        let miss = Ray::new(Vec3::new(50.0, 50.0, 10.0), -Vec3::Z);
        assert!(resolve_ray(&scene, &miss).is_none());
    }
}
