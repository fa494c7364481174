use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Label sizing. After a build, every label is multiplied by
/// `bounding-box diagonal / divisor` so text stays legible at any model
/// scale. The divisors are empirical.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Labels", inline)]
#[serde(default)]
pub struct LabelOptions {
    /// Divisor for dimension labels on faceted solids.
    #[schemars(title = "Solid Label Divisor", range(min = 1.0, max = 100.0))]
    pub solid_label_divisor: f32,
    /// Divisor for element labels on molecules (denser labeling).
    #[schemars(
        title = "Molecule Label Divisor",
        range(min = 1.0, max = 100.0)
    )]
    pub molecule_label_divisor: f32,
    /// Unscaled height of a solid dimension label.
    #[schemars(skip)]
    pub solid_label_height: f32,
    /// Width of one glyph relative to label height.
    #[schemars(skip)]
    pub glyph_aspect: f32,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            solid_label_divisor: 12.0,
            molecule_label_divisor: 5.0,
            solid_label_height: 1.0,
            glyph_aspect: 0.6,
        }
    }
}
