//! Normalized structured descriptions: the validated input of a build.
//!
//! A description is either a faceted solid or a molecule. These types are
//! what the validator produces from an untyped JSON payload and what a
//! session persists; they serialize back to the same camelCase shape the
//! external generator emits.

pub mod validate;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use validate::{validate, validate_as, validate_str, Validated};

/// Which domain variant a description (and the scene built from it)
/// belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Faceted solid: vertices, triangulated face groups, labels.
    Solid,
    /// Ball-and-stick molecule: atoms and bonds.
    Molecule,
}

/// The validated input; one of the two domain variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructuredDescription {
    /// A faceted solid.
    Solid(SolidDescription),
    /// A molecule.
    Molecule(MoleculeDescription),
}

impl StructuredDescription {
    /// Domain variant of this description.
    #[must_use]
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Solid(_) => ModelKind::Solid,
            Self::Molecule(_) => ModelKind::Molecule,
        }
    }
}

// ---------------------------------------------------------------------------
// Solid
// ---------------------------------------------------------------------------

/// A faceted solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidDescription {
    /// Ordered vertex positions.
    pub vertices: Vec<Vec3>,
    /// Ordered face groups; a group's position is its face id.
    pub faces: Vec<FaceGroup>,
    /// Dimension labels.
    #[serde(default)]
    pub labels: Vec<DimensionLabel>,
    /// Whole-model measurements.
    #[serde(default)]
    pub analysis: SolidAnalysis,
}

/// One original polygonal face, triangulated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceGroup {
    /// Measurements shown when the face is selected.
    #[serde(default)]
    pub details: FaceDetails,
    /// Triangles making up the face.
    #[serde(default)]
    pub triangles: Vec<Triangle>,
}

/// Per-face measurements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaceDetails {
    /// Face area.
    pub surface_area: Option<f64>,
    /// Face perimeter.
    pub perimeter: Option<f64>,
}

/// Three indices into the solid's vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    /// Vertex indices, in winding order.
    pub indices: [usize; 3],
}

/// A dimension label placed at literal coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionLabel {
    /// Label text.
    pub text: String,
    /// Anchor position in model coordinates.
    pub position: Vec3,
}

/// Whole-solid measurements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolidAnalysis {
    /// Enclosed volume.
    pub volume: Option<f64>,
    /// Total surface area.
    pub surface_area: Option<f64>,
}

// ---------------------------------------------------------------------------
// Molecule
// ---------------------------------------------------------------------------

/// A molecule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoleculeDescription {
    /// Ordered atoms; an atom's position is its atom index.
    pub atoms: Vec<Atom>,
    /// Bonds between atom indices.
    #[serde(default)]
    pub bonds: Vec<Bond>,
    /// Whole-molecule annotations.
    #[serde(default)]
    pub analysis: MoleculeAnalysis,
}

/// One atom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atom {
    /// Element symbol as given (compared case-insensitively).
    pub element: String,
    /// Position in molecule coordinates.
    #[serde(default)]
    pub position: Vec3,
    /// VSEPR geometry name, e.g. "tetrahedral".
    #[serde(default)]
    pub vsepr_shape: String,
    /// Bond angles centered on this atom.
    #[serde(default)]
    pub bond_angles: Vec<BondAngle>,
}

/// A bond angle between three atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondAngle {
    /// Angle in degrees.
    pub angle: f64,
    /// Human-readable atom triple, e.g. "H-O-H".
    #[serde(default)]
    pub atoms_involved: String,
    /// Atom indices `[end, center, end]`.
    pub atoms_involved_indices: [usize; 3],
}

/// A bond between two atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    /// Start atom index.
    pub start: usize,
    /// End atom index.
    pub end: usize,
    /// Bond order.
    #[serde(rename = "type", default)]
    pub order: BondOrder,
    /// Bond energy, if known.
    #[serde(default)]
    pub energy: Option<f64>,
}

/// Bond order; decides how many parallel cylinders are drawn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BondOrder {
    /// One cylinder.
    #[default]
    Single,
    /// Two cylinders.
    Double,
    /// Three cylinders.
    Triple,
}

impl BondOrder {
    /// Parse a bond type name (`single`, `double`, `triple`; any case).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "single" | "1" => Some(Self::Single),
            "double" | "2" => Some(Self::Double),
            "triple" | "3" => Some(Self::Triple),
            _ => None,
        }
    }

    /// Bond order from its numeric multiplicity.
    #[must_use]
    pub fn from_multiplicity(n: u64) -> Option<Self> {
        match n {
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            _ => None,
        }
    }

    /// Number of cylinders drawn for this order.
    #[must_use]
    pub fn cylinder_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }
}

/// Whole-molecule annotations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoleculeAnalysis {
    /// Molecule name.
    pub name: Option<String>,
    /// Dominant bonding type, e.g. "covalent".
    pub bonding_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_order_parsing() {
        assert_eq!(BondOrder::parse("Double"), Some(BondOrder::Double));
        assert_eq!(BondOrder::parse(" triple "), Some(BondOrder::Triple));
        assert_eq!(BondOrder::parse("aromatic"), None);
        assert_eq!(BondOrder::from_multiplicity(1), Some(BondOrder::Single));
        assert_eq!(BondOrder::from_multiplicity(4), None);
        assert_eq!(BondOrder::Triple.cylinder_count(), 3);
    }

    #[test]
    fn molecule_serializes_with_camel_case_keys() {
        let desc = StructuredDescription::Molecule(MoleculeDescription {
            atoms: vec![Atom {
                element: "O".to_owned(),
                position: Vec3::ZERO,
                vsepr_shape: "bent".to_owned(),
                bond_angles: vec![],
            }],
            bonds: vec![],
            analysis: MoleculeAnalysis::default(),
        });
        let value = serde_json::to_value(&desc).unwrap();
        assert_eq!(value["atoms"][0]["vseprShape"], "bent");
        assert!(value["atoms"][0].get("bondAngles").is_some());

        let parsed: StructuredDescription =
            serde_json::from_value(value).unwrap();
        assert_eq!(parsed, desc);
        assert_eq!(parsed.kind(), ModelKind::Molecule);
    }

    #[test]
    fn untagged_solid_is_recognized() {
        let json = r#"{
            "vertices": [[0,0,0],[1,0,0],[0,1,0]],
            "faces": [{"triangles": [{"indices": [0,1,2]}]}]
        }"#;
        let parsed: StructuredDescription = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind(), ModelKind::Solid);
    }

    #[test]
    fn bond_type_key_is_renamed() {
        let bond: Bond =
            serde_json::from_str(r#"{"start":0,"end":1,"type":"double"}"#)
                .unwrap();
        assert_eq!(bond.order, BondOrder::Double);
        assert_eq!(bond.energy, None);
    }
}
