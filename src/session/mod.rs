//! The active-model session.
//!
//! [`Session`] is the single owner of everything that belongs to the model
//! on screen: its description, scene, highlight set, current selection and
//! angle overlays. Loading a description builds a fresh scene and swaps the
//! whole [`ActiveModel`] in one step; a failed build leaves the previous
//! model untouched. Selection operations never fail: a miss clears the
//! current selection and returns `None`.

mod record;
mod summary;

pub use record::SessionRecord;
pub use summary::{ModelAnalysis, ModelSummary};

use serde_json::Value;

use crate::builder::build_scene;
use crate::description::{validate, validate_str, StructuredDescription, Validated};
use crate::error::{InvalidPrimitive, SceneError};
use crate::options::Options;
use crate::overlay::AngleOverlay;
use crate::scene::{EntityId, EntityKind, EntityTag, NodeId, Ray, Scene};
use crate::selection::{
    resolve_hit, resolve_id, resolve_ray, HighlightSet, ResolvedEntity,
    SelectionReference,
};

// ---------------------------------------------------------------------------
// ActiveModel
// ---------------------------------------------------------------------------

/// Everything owned by the model currently loaded.
#[derive(Debug, Clone)]
pub struct ActiveModel {
    description: StructuredDescription,
    scene: Scene,
    highlight: HighlightSet,
    selection: Option<ResolvedEntity>,
    overlays: Vec<AngleOverlay>,
    diagnostics: Vec<InvalidPrimitive>,
}

impl ActiveModel {
    /// The description the scene was built from.
    #[must_use]
    pub fn description(&self) -> &StructuredDescription {
        &self.description
    }

    /// The built scene, with highlight colors applied.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Highlighted nodes and their original colors.
    #[must_use]
    pub fn highlight(&self) -> &HighlightSet {
        &self.highlight
    }

    /// The selected entity, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&ResolvedEntity> {
        self.selection.as_ref()
    }

    /// Angle overlays for the selected atom.
    #[must_use]
    pub fn overlays(&self) -> &[AngleOverlay] {
        &self.overlays
    }

    /// Primitives skipped or normalized while validating and building.
    #[must_use]
    pub fn diagnostics(&self) -> &[InvalidPrimitive] {
        &self.diagnostics
    }

    /// Replace the selection. The highlight is cleared even when
    /// `resolved` is `None`.
    fn apply(&mut self, resolved: Option<ResolvedEntity>, options: &Options) {
        let nodes = resolved.as_ref().map_or(&[][..], |r| r.nodes.as_slice());
        self.highlight.select(&mut self.scene, nodes);
        self.overlays = match resolved.as_ref().map(|r| &r.tag) {
            Some(EntityTag::Atom(atom)) => {
                AngleOverlay::for_atom(&self.scene, atom, options)
            }
            _ => Vec::new(),
        };
        match &resolved {
            Some(entity) => log::debug!(
                "selected {:?} {:?}: {} node(s), {} overlay(s)",
                entity.kind(),
                entity.id(),
                entity.nodes.len(),
                self.overlays.len()
            ),
            None if self.selection.is_some() => log::debug!("selection cleared"),
            None => {}
        }
        self.selection = resolved;
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Owns the active model and the options it is built with.
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: Options,
    active: Option<ActiveModel>,
}

impl Session {
    /// An empty session.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            active: None,
        }
    }

    /// Options used for builds and overlays.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The loaded model, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveModel> {
        self.active.as_ref()
    }

    // -- Model lifecycle --

    /// Parse, validate and load a JSON description.
    pub fn load_json(&mut self, json: &str) -> Result<&ActiveModel, SceneError> {
        let validated = validate_str(json)?;
        self.load_validated(validated)
    }

    /// Validate and load an untyped description.
    pub fn load_value(&mut self, value: &Value) -> Result<&ActiveModel, SceneError> {
        let validated = validate(value)?;
        self.load_validated(validated)
    }

    /// Load an already normalized description.
    pub fn load(
        &mut self,
        description: StructuredDescription,
    ) -> Result<&ActiveModel, SceneError> {
        self.load_validated(Validated {
            description,
            diagnostics: Vec::new(),
        })
    }

    fn load_validated(
        &mut self,
        validated: Validated,
    ) -> Result<&ActiveModel, SceneError> {
        let Validated {
            description,
            mut diagnostics,
        } = validated;
        let built = match build_scene(&description, &self.options) {
            Ok(built) => built,
            Err(e) => {
                log::error!("build failed, keeping previous model: {e}");
                return Err(e);
            }
        };
        diagnostics.extend(built.diagnostics);

        let model = ActiveModel {
            description,
            scene: built.scene,
            highlight: HighlightSet::new(self.options.colors.highlight),
            selection: None,
            overlays: Vec::new(),
            diagnostics,
        };
        log::info!(
            "{} {:?} model: {} node(s), {} pickable, {} diagnostic(s)",
            if self.active.is_some() { "replaced" } else { "loaded" },
            model.scene.kind(),
            model.scene.len(),
            model.scene.pickable_count(),
            model.diagnostics.len()
        );
        Ok(&*self.active.insert(model))
    }

    /// Drop the active model with its scene, highlight and overlays.
    pub fn reset(&mut self) {
        if self.active.take().is_some() {
            log::info!("session reset");
        }
    }

    /// Tell the session a renderer consumed the current scene state.
    pub fn mark_rendered(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.scene.mark_rendered();
        }
    }

    // -- Selection --

    fn select_with(
        &mut self,
        resolve: impl FnOnce(&Scene) -> Option<ResolvedEntity>,
    ) -> Option<&ResolvedEntity> {
        let active = self.active.as_mut()?;
        let resolved = resolve(&active.scene);
        active.apply(resolved, &self.options);
        active.selection.as_ref()
    }

    /// Select whatever `ray` hits first. A miss clears the selection.
    pub fn pick(&mut self, ray: &Ray) -> Option<&ResolvedEntity> {
        self.select_with(|scene| resolve_ray(scene, ray))
    }

    /// Select the entity owning a primitive the caller already hit.
    pub fn pick_node(&mut self, node: NodeId) -> Option<&ResolvedEntity> {
        self.select_with(|scene| resolve_hit(scene, node))
    }

    /// Select by kind and stable id.
    pub fn select_id(
        &mut self,
        kind: EntityKind,
        id: EntityId,
    ) -> Option<&ResolvedEntity> {
        self.select_with(|scene| resolve_id(scene, kind, id))
    }

    /// Reapply a captured selection, overlays included.
    pub fn restore(
        &mut self,
        reference: &SelectionReference,
    ) -> Option<&ResolvedEntity> {
        let restored = self.select_id(reference.kind, reference.id);
        if restored.is_none() {
            log::debug!(
                "reference {:?} {:?} not found in active model",
                reference.kind,
                reference.id
            );
        }
        restored
    }

    /// Deselect and restore original colors.
    pub fn clear_selection(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.apply(None, &self.options);
        }
    }

    /// Reference to the current selection.
    #[must_use]
    pub fn snapshot(&self) -> Option<SelectionReference> {
        self.active
            .as_ref()?
            .selection
            .as_ref()
            .map(SelectionReference::capture)
    }

    // -- Persistence and reporting --

    /// Summary of the active model.
    #[must_use]
    pub fn summary(&self) -> Option<ModelSummary> {
        self.active.as_ref().map(ModelSummary::of)
    }

    /// The active description and selection, ready to persist.
    #[must_use]
    pub fn record(&self) -> Option<SessionRecord> {
        let active = self.active.as_ref()?;
        Some(SessionRecord {
            description: active.description.clone(),
            selection: self.snapshot(),
        })
    }

    /// Load a record's description, then restore its selection. Returns
    /// the restored entity, or `None` when the record had no selection or
    /// it no longer resolves.
    pub fn open_record(
        &mut self,
        record: SessionRecord,
    ) -> Result<Option<&ResolvedEntity>, SceneError> {
        let SessionRecord {
            description,
            selection,
        } = record;
        let _ = self.load(description)?;
        Ok(match selection {
            Some(reference) => self.restore(&reference),
            None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use serde_json::json;

    use super::*;
    use crate::description::{SolidAnalysis, SolidDescription};

    fn water_json() -> Value {
        json!({
            "atoms": [
                {"element": "O", "position": [0.0, 0.0, 0.0], "vseprShape": "bent",
                 "bondAngles": [{"angle": 104.5, "atomsInvolved": "H-O-H",
                                 "atomsInvolvedIndices": [1, 0, 2]}]},
                {"element": "H", "position": [0.96, 0.0, 0.0]},
                {"element": "H", "position": [-0.24, 0.93, 0.0]}
            ],
            "bonds": [
                {"start": 0, "end": 1, "type": "single", "energy": 459.0},
                {"start": 0, "end": 2, "type": "single", "energy": 459.0}
            ],
            "analysis": {"name": "water", "bondingType": "covalent"}
        })
    }

    fn cube_face_json() -> Value {
        json!({
            "vertices": [[0,0,0],[1,0,0],[1,1,0],[0,1,0]],
            "faces": [{"details": {"surfaceArea": 1.0, "perimeter": 4.0},
                       "triangles": [{"indices": [0,1,2]}, {"indices": [0,2,3]}]}],
            "analysis": {"volume": 0.0, "surfaceArea": 1.0}
        })
    }

    fn loaded(value: &Value) -> Session {
        let mut session = Session::default();
        let _ = session.load_value(value).unwrap();
        session
    }

    #[test]
    fn atom_pick_highlights_and_builds_overlays() {
        let mut session = loaded(&water_json());
        let highlight = session.options().colors.highlight;
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let picked = session.pick(&ray).unwrap();
        assert_eq!(picked.id(), EntityId::Index(0));
        let node = picked.nodes[0];

        let active = session.active().unwrap();
        assert_eq!(active.scene().color(node), Some(highlight));
        assert_eq!(active.overlays().len(), 1);
        assert_eq!(active.overlays()[0].label.text, "104.5°");
    }

    #[test]
    fn miss_clears_selection_and_overlays() {
        let mut session = loaded(&water_json());
        let _ = session.select_id(EntityKind::Atom, EntityId::Index(0));
        let miss = Ray::new(Vec3::new(100.0, 0.0, 10.0), -Vec3::Z);
        assert!(session.pick(&miss).is_none());

        let active = session.active().unwrap();
        assert!(active.selection().is_none());
        assert!(active.highlight().is_empty());
        assert!(active.overlays().is_empty());
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn bond_selection_has_no_overlays() {
        let mut session = loaded(&water_json());
        let _ = session.select_id(EntityKind::Atom, EntityId::Index(0));
        let bond = session
            .select_id(EntityKind::Bond, EntityId::Pair { start: 0, end: 2 })
            .unwrap();
        assert_eq!(bond.nodes.len(), 1);
        assert!(session.active().unwrap().overlays().is_empty());
    }

    #[test]
    fn typed_empty_solid_reports_the_key() {
        let mut session = Session::default();
        let err = session
            .load(StructuredDescription::Solid(SolidDescription {
                vertices: vec![],
                faces: vec![],
                labels: vec![],
                analysis: SolidAnalysis::default(),
            }))
            .unwrap_err();
        assert!(matches!(err, SceneError::Schema(e) if e.key == "vertices"));
        assert!(session.active().is_none());
    }

    #[test]
    fn failed_rebuild_keeps_previous_model() {
        let mut session = loaded(&water_json());
        let _ = session.select_id(EntityKind::Atom, EntityId::Index(1));

        let err = session.load_value(&json!({"atoms": []})).unwrap_err();
        assert!(matches!(err, SceneError::Schema(_)));
        let err = session
            .load_value(&json!({
                "vertices": [[0,0,0]],
                "faces": [{"triangles": [{"indices": [0, 5, 9]}]}]
            }))
            .unwrap_err();
        assert!(matches!(err, SceneError::EmptyModel));

        let active = session.active().unwrap();
        assert_eq!(active.scene().count_tagged(EntityKind::Atom), 3);
        assert_eq!(active.selection().unwrap().id(), EntityId::Index(1));
    }

    #[test]
    fn replacing_model_drops_old_selection() {
        let mut session = loaded(&water_json());
        let _ = session.select_id(EntityKind::Atom, EntityId::Index(0));
        let active = session.load_value(&cube_face_json()).unwrap();
        assert!(active.selection().is_none());
        assert!(active.highlight().is_empty());
        assert!(active.overlays().is_empty());

        session.reset();
        assert!(session.active().is_none());
        assert!(session.pick(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
    }

    #[test]
    fn record_round_trip_restores_face() {
        let mut session = loaded(&cube_face_json());
        let selected = session
            .select_id(EntityKind::Face, EntityId::Index(0))
            .cloned()
            .unwrap();
        let json = session.record().unwrap().to_json().unwrap();

        let mut fresh = Session::default();
        let record = SessionRecord::from_json(&json).unwrap();
        let restored = fresh.open_record(record).unwrap().cloned().unwrap();
        assert_eq!(restored, selected);
        assert_eq!(restored.nodes.len(), 2);
    }

    #[test]
    fn diagnostics_combine_validation_and_build() {
        let mut value = water_json();
        value["bonds"]
            .as_array_mut()
            .unwrap()
            .push(json!({"start": 1, "end": 1}));
        value["bonds"][0]["type"] = json!("quadruple");
        let session = loaded(&value);
        // One from validation (bond type), one from building (self-bond)
        assert_eq!(session.active().unwrap().diagnostics().len(), 2);
    }
}
