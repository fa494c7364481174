use serde::{Deserialize, Serialize};

use super::{resolve_reference, ResolvedEntity};
use crate::error::SceneError;
use crate::scene::{EntityId, EntityKind, EntityTag, Scene};

/// A scene-independent handle on a selected entity.
///
/// Holds only the entity kind, its stable id and a deep copy of its
/// details, so it survives rebuilding the scene from the same description
/// and can be persisted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReference {
    /// Entity kind.
    pub kind: EntityKind,
    /// Face id, atom index, or bond endpoint pair.
    pub id: EntityId,
    /// Details as they were when captured.
    pub details: EntityTag,
}

impl SelectionReference {
    /// Capture a resolved entity.
    #[must_use]
    pub fn capture(entity: &ResolvedEntity) -> Self {
        Self::from_tag(&entity.tag)
    }

    /// Reference for the entity a tag describes.
    #[must_use]
    pub fn from_tag(tag: &EntityTag) -> Self {
        Self {
            kind: tag.kind(),
            id: tag.id(),
            details: tag.clone(),
        }
    }

    /// Find the referenced entity in `scene`.
    #[must_use]
    pub fn resolve(&self, scene: &Scene) -> Option<ResolvedEntity> {
        resolve_reference(scene, self)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{BondOrder, FaceDetails};
    use crate::scene::{BondTag, FaceTag};

    #[test]
    fn json_round_trip_keeps_bond_pair() {
        let reference = SelectionReference::from_tag(&EntityTag::Bond(BondTag {
            start_atom_index: 3,
            end_atom_index: 1,
            bond_order: BondOrder::Triple,
            energy: Some(839.0),
        }));
        let json = reference.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "bond");
        assert_eq!(value["id"]["start"], 3);
        assert_eq!(value["details"]["bondOrder"], "triple");

        let back = SelectionReference::from_json(&json).unwrap();
        assert_eq!(back, reference);
    }

    #[test]
    fn face_id_serializes_as_plain_index() {
        let reference = SelectionReference::from_tag(&EntityTag::Face(FaceTag {
            face_id: 4,
            details: FaceDetails::default(),
        }));
        let value = serde_json::to_value(&reference).unwrap();
        assert_eq!(value["id"], 4);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SelectionReference::from_json("{\"kind\": \"atom\"").unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }
}
