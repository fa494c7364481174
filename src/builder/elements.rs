//! Element display table: sphere radius and CPK color by symbol.

/// Display style of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    /// Canonical element symbol.
    pub symbol: &'static str,
    /// Sphere radius before scaling.
    pub radius: f32,
    /// CPK RGB color.
    pub color: [f32; 3],
}

/// Used for any symbol not in the table.
pub const DEFAULT_ELEMENT: ElementStyle = ElementStyle {
    symbol: "?",
    radius: 0.35,
    color: [0.87, 0.4, 0.87],
};

const ELEMENTS: &[ElementStyle] = &[
    ElementStyle { symbol: "H", radius: 0.2, color: [1.0, 1.0, 1.0] },
    ElementStyle { symbol: "He", radius: 0.22, color: [0.85, 1.0, 1.0] },
    ElementStyle { symbol: "Li", radius: 0.4, color: [0.8, 0.5, 1.0] },
    ElementStyle { symbol: "Be", radius: 0.35, color: [0.76, 1.0, 0.0] },
    ElementStyle { symbol: "B", radius: 0.33, color: [1.0, 0.71, 0.71] },
    ElementStyle { symbol: "C", radius: 0.3, color: [0.5, 0.5, 0.5] },
    ElementStyle { symbol: "N", radius: 0.29, color: [0.19, 0.31, 0.97] },
    ElementStyle { symbol: "O", radius: 0.28, color: [1.0, 0.05, 0.05] },
    ElementStyle { symbol: "F", radius: 0.27, color: [0.56, 0.88, 0.31] },
    ElementStyle { symbol: "Ne", radius: 0.25, color: [0.7, 0.89, 0.96] },
    ElementStyle { symbol: "Na", radius: 0.45, color: [0.67, 0.36, 0.95] },
    ElementStyle { symbol: "Mg", radius: 0.42, color: [0.54, 1.0, 0.0] },
    ElementStyle { symbol: "Al", radius: 0.4, color: [0.75, 0.65, 0.65] },
    ElementStyle { symbol: "Si", radius: 0.38, color: [0.94, 0.78, 0.63] },
    ElementStyle { symbol: "P", radius: 0.36, color: [1.0, 0.5, 0.0] },
    ElementStyle { symbol: "S", radius: 0.36, color: [1.0, 1.0, 0.19] },
    ElementStyle { symbol: "Cl", radius: 0.35, color: [0.12, 0.94, 0.12] },
    ElementStyle { symbol: "Ar", radius: 0.33, color: [0.5, 0.82, 0.89] },
    ElementStyle { symbol: "K", radius: 0.5, color: [0.56, 0.25, 0.83] },
    ElementStyle { symbol: "Ca", radius: 0.47, color: [0.24, 1.0, 0.0] },
    ElementStyle { symbol: "Fe", radius: 0.4, color: [0.88, 0.4, 0.2] },
    ElementStyle { symbol: "Cu", radius: 0.38, color: [0.78, 0.5, 0.2] },
    ElementStyle { symbol: "Zn", radius: 0.38, color: [0.49, 0.5, 0.69] },
    ElementStyle { symbol: "Br", radius: 0.38, color: [0.65, 0.16, 0.16] },
    ElementStyle { symbol: "Kr", radius: 0.36, color: [0.36, 0.72, 0.82] },
    ElementStyle { symbol: "I", radius: 0.42, color: [0.58, 0.0, 0.58] },
    ElementStyle { symbol: "Xe", radius: 0.4, color: [0.26, 0.62, 0.69] },
];

/// Look up an element by symbol, case-insensitively, falling back to
/// [`DEFAULT_ELEMENT`].
#[must_use]
pub fn element_style(symbol: &str) -> &'static ElementStyle {
    let symbol = symbol.trim();
    ELEMENTS
        .iter()
        .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
        .unwrap_or(&DEFAULT_ELEMENT)
}
