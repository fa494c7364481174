use serde::{Deserialize, Serialize};

use super::ActiveModel;
use crate::description::{
    ModelKind, MoleculeAnalysis, SolidAnalysis, StructuredDescription,
};
use crate::scene::EntityKind;

/// Whole-model annotations, per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelAnalysis {
    /// Volume and surface area of a solid.
    Solid(SolidAnalysis),
    /// Name and bonding type of a molecule.
    Molecule(MoleculeAnalysis),
}

/// What a UI shows about the loaded model before anything is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    /// Domain variant.
    pub kind: ModelKind,
    /// Annotations from the description.
    pub analysis: ModelAnalysis,
    /// Face groups (solids) or atoms (molecules) in the description.
    pub entity_count: usize,
    /// Bonds that made it into the scene.
    pub bond_count: usize,
    /// Primitives a pick can hit.
    pub pickable_count: usize,
    /// Primitives skipped or normalized.
    pub diagnostic_count: usize,
    /// Bounding-box diagonal of the scene geometry.
    pub extent: f32,
}

impl ModelSummary {
    pub(super) fn of(model: &ActiveModel) -> Self {
        let (analysis, entity_count) = match &model.description {
            StructuredDescription::Solid(solid) => (
                ModelAnalysis::Solid(solid.analysis.clone()),
                solid.faces.len(),
            ),
            StructuredDescription::Molecule(molecule) => (
                ModelAnalysis::Molecule(molecule.analysis.clone()),
                molecule.atoms.len(),
            ),
        };
        let scene = &model.scene;
        Self {
            kind: scene.kind(),
            analysis,
            entity_count,
            bond_count: scene.count_tagged(EntityKind::Bond),
            pickable_count: scene.pickable_count(),
            diagnostic_count: model.diagnostics.len(),
            extent: scene.bounds().map_or(0.0, |b| b.diagonal()),
        }
    }
}
