//! Scene builders for the two domain variants.
//!
//! [`build_scene`] dispatches a validated description to the solid or
//! molecule builder. Both tag every pickable primitive with its logical
//! entity, skip individual defective primitives with a diagnostic, and
//! finish by scaling labels to the model's extent.

pub mod elements;
pub mod molecule;
pub mod solid;

use crate::description::StructuredDescription;
use crate::error::{InvalidPrimitive, SceneError};
use crate::options::Options;
use crate::scene::Scene;

/// A freshly built scene plus the primitives the builder skipped.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The built scene.
    pub scene: Scene,
    /// Primitives skipped during the build.
    pub diagnostics: Vec<InvalidPrimitive>,
}

/// Build a scene for either variant.
pub fn build_scene(
    description: &StructuredDescription,
    options: &Options,
) -> Result<BuildOutput, SceneError> {
    match description {
        StructuredDescription::Solid(solid) => {
            solid::build_solid(solid, options)
        }
        StructuredDescription::Molecule(molecule) => {
            molecule::build_molecule(molecule, options)
        }
    }
}
