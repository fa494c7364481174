//! End-to-end selection round trips: pick, capture, persist, rebuild,
//! restore.

use glam::Vec3;
use pickscene::description::BondOrder;
use pickscene::scene::{EntityId, EntityKind, EntityTag, NodeId, Ray};
use pickscene::selection::SelectionReference;
use pickscene::session::{SessionRecord, Session};
use serde_json::{json, Value};

fn methane() -> Value {
    json!({
        "atoms": [
            {"element": "C", "position": [0.0, 0.0, 0.0], "vseprShape": "tetrahedral",
             "bondAngles": [
                {"angle": 109.5, "atomsInvolved": "H-C-H", "atomsInvolvedIndices": [1, 0, 2]},
                {"angle": 109.5, "atomsInvolved": "H-C-H", "atomsInvolvedIndices": [3, 0, 4]}
             ]},
            {"element": "h", "position": [0.63, 0.63, 0.63]},
            {"element": "H", "position": [-0.63, -0.63, 0.63]},
            {"element": "H", "position": [-0.63, 0.63, -0.63]},
            {"element": "H", "position": [0.63, -0.63, -0.63]}
        ],
        "bonds": [
            {"start": 0, "end": 1, "type": "single", "energy": 413.0},
            {"start": 0, "end": 2, "type": "single", "energy": 413.0},
            {"start": 0, "end": 3, "type": "single", "energy": 413.0},
            {"start": 0, "end": 4, "type": "single", "energy": 413.0}
        ],
        "analysis": {"name": "methane", "bondingType": "covalent"}
    })
}

fn prism() -> Value {
    json!({
        "vertices": [[0,0,0],[2,0,0],[0,2,0],[0,0,3],[2,0,3],[0,2,3]],
        "faces": [
            {"details": {"surfaceArea": 2.0, "perimeter": 6.83},
             "triangles": [{"indices": [0,2,1]}]},
            {"details": {"surfaceArea": 2.0, "perimeter": 6.83},
             "triangles": [{"indices": [3,4,5]}]},
            {"details": {"surfaceArea": 6.0, "perimeter": 10.0},
             "triangles": [{"indices": [0,1,4]}, {"indices": [0,4,3]}]},
            {"details": {"surfaceArea": 6.0, "perimeter": 10.0},
             "triangles": [{"indices": [0,3,5]}, {"indices": [0,5,2]}]}
        ],
        "labels": [{"text": "3 cm", "position": [-0.3, 0.0, 1.5]}],
        "analysis": {"volume": 6.0, "surfaceArea": 22.49}
    })
}

fn lit_nodes(session: &Session) -> Vec<NodeId> {
    let mut nodes: Vec<NodeId> = session
        .active()
        .map(|a| a.highlight().nodes().collect())
        .unwrap_or_default();
    nodes.sort_unstable();
    nodes
}

#[test]
fn atom_pick_restores_identically_after_rebuild() {
    let mut live = Session::default();
    let _ = live.load_value(&methane()).unwrap();

    // Straight down onto the second hydrogen
    let target = Vec3::new(0.63, 0.63, 0.63) * live.options().geometry.molecule_scale;
    let ray = Ray::through(target + Vec3::Z * 10.0, target);
    let picked = live.pick(&ray).cloned().unwrap();
    assert_eq!(picked.kind(), EntityKind::Atom);
    assert_eq!(picked.id(), EntityId::Index(1));

    let json = live.snapshot().unwrap().to_json().unwrap();
    let reference = SelectionReference::from_json(&json).unwrap();

    let mut fresh = Session::default();
    let _ = fresh.load_value(&methane()).unwrap();
    let restored = fresh.restore(&reference).cloned().unwrap();

    assert_eq!(restored.nodes, picked.nodes);
    assert_eq!(restored.details(), picked.details());
    assert_eq!(lit_nodes(&fresh), lit_nodes(&live));
    assert_eq!(reference.details, *picked.details());
}

#[test]
fn restored_center_atom_gets_same_overlays() {
    let mut live = Session::default();
    let _ = live.load_value(&methane()).unwrap();
    let _ = live.select_id(EntityKind::Atom, EntityId::Index(0)).unwrap();
    let reference = live.snapshot().unwrap();

    let mut fresh = Session::default();
    let _ = fresh.load_value(&methane()).unwrap();
    let _ = fresh.restore(&reference).unwrap();

    let before = live.active().unwrap().overlays();
    let after = fresh.active().unwrap().overlays();
    assert_eq!(before.len(), 2);
    assert_eq!(before, after);
    // Tetrahedral geometry: measured angle matches the reported one
    assert!((after[0].degrees() - 109.47).abs() < 0.1);
}

#[test]
fn second_selection_leaves_no_highlight_behind() {
    let mut session = Session::default();
    let _ = session.load_value(&methane()).unwrap();
    let highlight = session.options().colors.highlight;

    let first = session
        .select_id(EntityKind::Bond, EntityId::Pair { start: 0, end: 1 })
        .cloned()
        .unwrap();
    let second = session
        .select_id(EntityKind::Atom, EntityId::Index(3))
        .cloned()
        .unwrap();

    let scene = session.active().unwrap().scene();
    for node in &first.nodes {
        assert_ne!(scene.color(*node), Some(highlight));
    }
    assert_eq!(lit_nodes(&session), second.nodes);

    session.clear_selection();
    let scene = session.active().unwrap().scene();
    assert!(scene
        .iter()
        .all(|(_, node)| node.color != highlight));
}

#[test]
fn solid_face_record_survives_persistence() {
    let mut session = Session::default();
    let active = session.load_value(&prism()).unwrap();
    assert_eq!(active.scene().pickable_count(), 6);

    // Pick the side quad from outside, below the y = 0 plane
    let ray = Ray::new(Vec3::new(1.5, -5.0, 1.0), Vec3::Y);
    let picked = session.pick(&ray).cloned().unwrap();
    assert_eq!(picked.id(), EntityId::Index(2));
    assert_eq!(picked.nodes.len(), 2);
    let EntityTag::Face(face) = picked.details() else {
        panic!("expected a face");
    };
    assert_eq!(face.details.surface_area, Some(6.0));

    let saved = session.record().unwrap().to_json().unwrap();
    session.reset();

    let mut reopened = Session::default();
    let record = SessionRecord::from_json(&saved).unwrap();
    let restored = reopened.open_record(record).unwrap().cloned().unwrap();
    assert_eq!(restored, picked);
    assert_eq!(lit_nodes(&reopened), picked.nodes);
}

#[test]
fn repeated_bond_pair_restores_the_same_bond() {
    let carbon_monoxide = json!({
        "atoms": [
            {"element": "C", "position": [0.0, 0.0, 0.0]},
            {"element": "O", "position": [1.13, 0.0, 0.0]}
        ],
        "bonds": [
            {"start": 0, "end": 1, "type": "single"},
            {"start": 0, "end": 1, "type": "triple"}
        ]
    });
    let mut live = Session::default();
    let active = live.load_value(&carbon_monoxide).unwrap();
    assert_eq!(active.diagnostics().len(), 1);

    let picked = live
        .select_id(EntityKind::Bond, EntityId::Pair { start: 0, end: 1 })
        .cloned()
        .unwrap();
    let reference = live.snapshot().unwrap();

    let mut fresh = Session::default();
    let _ = fresh.load_value(&carbon_monoxide).unwrap();
    let restored = fresh.restore(&reference).cloned().unwrap();
    assert_eq!(restored, picked);
    let EntityTag::Bond(bond) = restored.details() else {
        panic!("expected a bond");
    };
    assert_eq!(picked.nodes.len(), 1);
    assert_eq!(bond.bond_order, BondOrder::Single);
}
