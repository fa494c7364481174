use serde::{Deserialize, Serialize};

use crate::description::{BondAngle, BondOrder, FaceDetails};

/// Kind of logical entity a tag stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A face group of a solid.
    Face,
    /// An atom.
    Atom,
    /// A bond.
    Bond,
}

/// Stable, scene-independent id of an entity: face index, atom index, or
/// atom-index pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Face id or atom index.
    Index(usize),
    /// Bond endpoints.
    Pair {
        /// Start atom index.
        start: usize,
        /// End atom index.
        end: usize,
    },
}

/// Logical entity metadata attached to scene nodes. Set once by the
/// builder; the kind is the variant, never inferred from payload fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityTag {
    /// Carried by every triangle of a face group.
    Face(FaceTag),
    /// Carried by an atom sphere.
    Atom(AtomTag),
    /// Carried by the group node owning a bond's cylinders.
    Bond(BondTag),
}

/// Face-group payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceTag {
    /// Position of the face group in the description.
    pub face_id: usize,
    /// Face measurements.
    pub details: FaceDetails,
}

/// Atom payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomTag {
    /// Position of the atom in the description.
    pub atom_index: usize,
    /// Element symbol.
    pub element: String,
    /// VSEPR geometry name.
    pub vsepr_shape: String,
    /// Bond angles centered on this atom.
    pub bond_angles: Vec<BondAngle>,
}

/// Bond payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondTag {
    /// Start atom index.
    pub start_atom_index: usize,
    /// End atom index.
    pub end_atom_index: usize,
    /// Bond order.
    pub bond_order: BondOrder,
    /// Bond energy, if known.
    pub energy: Option<f64>,
}

impl EntityTag {
    /// Kind of entity.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Face(_) => EntityKind::Face,
            Self::Atom(_) => EntityKind::Atom,
            Self::Bond(_) => EntityKind::Bond,
        }
    }

    /// Stable id of the entity.
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Self::Face(face) => EntityId::Index(face.face_id),
            Self::Atom(atom) => EntityId::Index(atom.atom_index),
            Self::Bond(bond) => EntityId::Pair {
                start: bond.start_atom_index,
                end: bond.end_atom_index,
            },
        }
    }

    /// Whether this tag names the entity `kind` + `id`.
    #[must_use]
    pub fn matches(&self, kind: EntityKind, id: EntityId) -> bool {
        self.kind() == kind && self.id() == id
    }
}
