use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Angle Overlay", inline)]
#[serde(default)]
/// Bond-angle arc and label sizing.
pub struct OverlayOptions {
    /// Arc radius before the molecular display scale is applied.
    #[schemars(title = "Arc Radius", range(min = 0.05, max = 5.0))]
    pub arc_radius: f32,
    /// Number of line segments sampled along the arc.
    #[schemars(title = "Arc Segments", range(min = 2, max = 256))]
    pub arc_segments: u32,
    /// Label distance beyond the arc along the bisector.
    #[schemars(skip)]
    pub label_offset: f32,
    /// Label height in scene units.
    #[schemars(skip)]
    pub label_height: f32,
    /// Tolerance for zero-length vectors, zero angles and colinearity.
    #[schemars(skip)]
    pub epsilon: f32,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            arc_radius: 0.4,
            arc_segments: 32,
            label_offset: 0.25,
            label_height: 0.3,
            epsilon: 1e-4,
        }
    }
}
