use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Color palette options for built scenes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// RGB color applied to every primitive of the selected entity.
    pub highlight: [f32; 3],
    /// RGB color for solid face triangles.
    pub face: [f32; 3],
    /// RGB color for bond cylinders.
    pub bond: [f32; 3],
    /// RGB color for text labels.
    pub label: [f32; 3],
    /// RGB color for angle overlay arcs.
    pub overlay: [f32; 3],
    /// Per-element color overrides keyed by element symbol.
    pub element_colors: HashMap<String, [f32; 3]>,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            highlight: [1.0, 0.84, 0.0],
            face: [0.55, 0.62, 0.78],
            bond: [0.72, 0.72, 0.72],
            label: [1.0, 1.0, 1.0],
            overlay: [0.2, 0.9, 0.9],
            element_colors: HashMap::new(),
        }
    }
}

impl ColorOptions {
    /// Look up an element color override. Symbols compare
    /// case-insensitively; `None` means use the built-in element table.
    #[must_use]
    pub fn element_color(&self, symbol: &str) -> Option<[f32; 3]> {
        let symbol = symbol.trim();
        self.element_colors
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(symbol))
            .map(|(_, color)| *color)
    }
}
