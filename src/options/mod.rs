//! Centralized scene-building options with TOML preset support.
//!
//! All tunable constants (display scales, label divisors, colors, overlay
//! sizing) are consolidated here. Options serialize to/from TOML so a
//! front end can ship presets and override only the sections it cares
//! about.

mod colors;
mod geometry;
mod labels;
mod overlay;

use std::path::Path;

pub use colors::ColorOptions;
pub use geometry::GeometryOptions;
pub use labels::LabelOptions;
pub use overlay::OverlayOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[labels]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Molecular display scale, atom and bond sizing.
    pub geometry: GeometryOptions,
    /// Label sizing relative to model extent.
    pub labels: LabelOptions,
    /// Color palette, including the highlight color.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Angle overlay sizing.
    pub overlay: OverlayOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path).map_err(SceneError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, SceneError> {
        toml::from_str(content)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SceneError::Io)?;
        }
        std::fs::write(path, content).map_err(SceneError::Io)
    }
}
