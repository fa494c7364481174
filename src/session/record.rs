use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::description::StructuredDescription;
use crate::error::SceneError;
use crate::selection::SelectionReference;

/// A persisted session: the model description and, optionally, the
/// selection to restore on top of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Normalized description of the model.
    pub description: StructuredDescription,
    /// Selection at the time of saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionReference>,
}

impl SessionRecord {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a record from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the record to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::description::validate;

    #[test]
    fn molecule_record_without_selection_round_trips() {
        let description = validate(&json!({
            "atoms": [
                {"element": "C", "position": [0, 0, 0]},
                {"element": "O", "position": [1.2, 0, 0]}
            ],
            "bonds": [{"start": 0, "end": 1, "type": "double", "energy": 745.0}]
        }))
        .unwrap()
        .description;
        let record = SessionRecord {
            description,
            selection: None,
        };
        let json = record.to_json().unwrap();
        assert!(!json.contains("selection"));
        assert_eq!(SessionRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(
            SessionRecord::from_json("[1, 2"),
            Err(SceneError::Json(_))
        ));
    }
}
