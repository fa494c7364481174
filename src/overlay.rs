//! Bond-angle overlays: an arc between two bonds at a shared center atom
//! plus a label with the angle value.
//!
//! Overlays are derived data. They are recomputed from atom positions and
//! never stored in the scene, so rebuilding or restoring a selection
//! reproduces them exactly.

use glam::Vec3;

use crate::options::Options;
use crate::scene::{AtomTag, LabelShape, Scene};

/// Orthonormal frame of the plane an angle lies in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcBasis {
    /// Direction of the first arm.
    pub x: Vec3,
    /// In-plane direction toward the second arm.
    pub y: Vec3,
    /// Plane normal.
    pub normal: Vec3,
}

/// Arc and label for one bond angle.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleOverlay {
    /// Vertex of the angle.
    pub center: Vec3,
    /// Arc radius in scene units.
    pub radius: f32,
    /// Measured angle in radians.
    pub angle: f32,
    /// Plane of the arc.
    pub basis: ArcBasis,
    /// Arc polyline from the first arm to the second.
    pub arc_points: Vec<Vec3>,
    /// Angle value text.
    pub label: LabelShape,
    /// RGB color of arc and label.
    pub color: [f32; 3],
}

impl AngleOverlay {
    /// Arc and label for the angle `p1`-`center`-`p2`.
    ///
    /// Returns `None` when either arm has zero length or the angle is
    /// zero. A straight (180°) angle gets an arbitrary but valid plane.
    #[must_use]
    pub fn compute(
        p1: Vec3,
        center: Vec3,
        p2: Vec3,
        label: impl Into<String>,
        options: &Options,
    ) -> Option<Self> {
        let overlay = &options.overlay;
        let eps = overlay.epsilon;
        let v1 = p1 - center;
        let v2 = p2 - center;
        if v1.length() < eps || v2.length() < eps {
            return None;
        }

        let cross = v1.cross(v2);
        let angle = cross.length().atan2(v1.dot(v2));
        if !angle.is_finite() || angle < eps {
            return None;
        }

        let colinear = cross.length() < eps * v1.length() * v2.length();
        let normal = if colinear {
            let x = v1.normalize();
            let fallback = if x.cross(Vec3::Y).length() < eps {
                Vec3::X
            } else {
                Vec3::Y
            };
            v1.cross(fallback)
        } else {
            cross
        };
        let x = v1.normalize();
        let normal = normal.normalize();
        let y = normal.cross(x);
        let basis = ArcBasis { x, y, normal };

        let radius = overlay.arc_radius * options.geometry.molecule_scale;
        let segments = overlay.arc_segments.max(1);
        let arc_points = (0..=segments)
            .map(|i| {
                let t = angle * i as f32 / segments as f32;
                center + (x * t.cos() + y * t.sin()) * radius
            })
            .collect();

        // Straight angles leave only rounding noise in the arm sum
        let bisector = if colinear {
            y
        } else {
            (x + v2.normalize()).try_normalize().unwrap_or(y)
        };
        let label = LabelShape::new(
            label,
            center + bisector * (radius + overlay.label_offset),
            overlay.label_height,
            options.labels.glyph_aspect,
        );

        Some(Self {
            center,
            radius,
            angle,
            basis,
            arc_points,
            label,
            color: options.colors.overlay,
        })
    }

    /// Measured angle in degrees.
    #[must_use]
    pub fn degrees(&self) -> f32 {
        self.angle.to_degrees()
    }

    /// Overlays for every bond angle an atom reports, measured on the
    /// scene's scaled atom positions. Angles naming unknown atoms are
    /// skipped.
    #[must_use]
    pub fn for_atom(scene: &Scene, atom: &AtomTag, options: &Options) -> Vec<Self> {
        let positions = scene.atom_positions();
        atom.bond_angles
            .iter()
            .filter_map(|bond_angle| {
                let [a, c, b] = bond_angle.atoms_involved_indices;
                let (Some(&p1), Some(&center), Some(&p2)) =
                    (positions.get(a), positions.get(c), positions.get(b))
                else {
                    log::debug!(
                        "bond angle {} on atom {} names unknown atoms",
                        bond_angle.atoms_involved,
                        atom.atom_index
                    );
                    return None;
                };
                Self::compute(
                    p1,
                    center,
                    p2,
                    format!("{:.1}°", bond_angle.angle),
                    options,
                )
            })
            .collect()
    }
}
