use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Sizing of molecular primitives.
pub struct GeometryOptions {
    /// Multiplier from description coordinates to scene coordinates for
    /// molecules.
    #[schemars(title = "Molecule Scale", range(min = 0.1, max = 10.0))]
    pub molecule_scale: f32,
    /// Multiplier on the element-table sphere radius.
    #[schemars(title = "Atom Size", range(min = 0.1, max = 3.0))]
    pub atom_radius_scale: f32,
    /// Single-bond cylinder radius.
    #[schemars(title = "Bond Radius", range(min = 0.01, max = 1.0))]
    pub bond_radius: f32,
    /// Radius multiplier for each cylinder of a double or triple bond.
    #[schemars(skip)]
    pub multi_bond_radius_factor: f32,
    /// Lateral distance of each multi-bond cylinder from the bond axis.
    #[schemars(title = "Bond Spacing", range(min = 0.01, max = 1.0))]
    pub bond_spacing: f32,
    /// Element label height above the sphere center, in sphere radii.
    #[schemars(skip)]
    pub label_lift: f32,
    /// Element label height, in sphere radii.
    #[schemars(skip)]
    pub atom_label_size: f32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            molecule_scale: 1.5,
            atom_radius_scale: 1.0,
            bond_radius: 0.08,
            multi_bond_radius_factor: 0.6,
            bond_spacing: 0.1,
            label_lift: 1.5,
            atom_label_size: 0.9,
        }
    }
}
