use glam::{Vec2, Vec3};

use super::{Aabb, EntityTag};

/// Index of a node in its [`Scene`](super::Scene) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root group of every scene.
    pub const ROOT: Self = Self(0);

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A text marker. Labels are never pickable.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelShape {
    /// Label text.
    pub text: String,
    /// Anchor position in scene coordinates.
    pub position: Vec3,
    /// World-space width and height of the rendered text quad.
    pub scale: Vec2,
}

impl LabelShape {
    /// A label whose width follows its character count so the text keeps
    /// its aspect ratio.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        position: Vec3,
        height: f32,
        glyph_aspect: f32,
    ) -> Self {
        let text = text.into();
        let scale = text_scale(&text, height, glyph_aspect);
        Self {
            text,
            position,
            scale,
        }
    }
}

/// Width/height of a text quad of `height` for `text`.
#[must_use]
pub fn text_scale(text: &str, height: f32, glyph_aspect: f32) -> Vec2 {
    let chars = text.chars().count().max(1) as f32;
    Vec2::new(height * chars * glyph_aspect, height)
}

/// Geometric payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Pure ownership node with no geometry.
    Group,
    /// One triangle with its winding normal.
    Triangle {
        /// Corners in winding order.
        vertices: [Vec3; 3],
        /// Unit normal from the winding, zero when degenerate.
        normal: Vec3,
    },
    /// Atom sphere.
    Sphere {
        /// Center.
        center: Vec3,
        /// Radius.
        radius: f32,
    },
    /// Bond cylinder between two points.
    Cylinder {
        /// Start cap center.
        start: Vec3,
        /// End cap center.
        end: Vec3,
        /// Radius.
        radius: f32,
    },
    /// Text marker.
    Label(LabelShape),
}

impl Shape {
    /// A triangle with its normal computed from the winding.
    #[must_use]
    pub fn triangle(vertices: [Vec3; 3]) -> Self {
        let [a, b, c] = vertices;
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self::Triangle { vertices, normal }
    }

    /// Whether this shape has extent (labels and groups do not count).
    #[must_use]
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            Self::Triangle { .. } | Self::Sphere { .. } | Self::Cylinder { .. }
        )
    }

    /// World-space bounds. Labels report their anchor point.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        match self {
            Self::Group => None,
            Self::Triangle { vertices, .. } => Aabb::from_points(vertices),
            Self::Sphere { center, radius } => {
                Some(Aabb::from_point(*center).expand(*radius))
            }
            Self::Cylinder { start, end, radius } => Some(
                Aabb::from_point(*start)
                    .include(*end)
                    .expand(*radius),
            ),
            Self::Label(label) => Some(Aabb::from_point(label.position)),
        }
    }
}

/// One primitive in the scene arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    /// Geometry.
    pub shape: Shape,
    /// RGB color as currently displayed.
    pub color: [f32; 3],
    /// Whether ray queries consider this node.
    pub pickable: bool,
    /// Logical entity this node stands for, if any.
    pub tag: Option<EntityTag>,
}

impl Node {
    /// An unparented, untagged, non-pickable white node.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            shape,
            color: [1.0, 1.0, 1.0],
            pickable: false,
            tag: None,
        }
    }

    /// An ownership-only node.
    #[must_use]
    pub fn group() -> Self {
        Self::new(Shape::Group)
    }

    /// Set the display color.
    #[must_use]
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Make ray queries consider this node.
    #[must_use]
    pub fn pickable(mut self) -> Self {
        self.pickable = true;
        self
    }

    /// Attach an entity tag.
    #[must_use]
    pub fn tagged(mut self, tag: EntityTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Owning node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Directly owned nodes.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
