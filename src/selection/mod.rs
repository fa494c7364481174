//! Entity selection: resolve picks to logical entities, highlight them,
//! and capture scene-independent references for later restoration.
//!
//! A pick lands on one primitive; selection always works on the whole
//! entity that primitive belongs to (every triangle of a face group, an
//! atom sphere, or all cylinders of a bond).

mod highlight;
mod resolver;
mod snapshot;

pub use highlight::HighlightSet;
pub use resolver::{resolve_hit, resolve_id, resolve_ray, resolve_reference};
pub use snapshot::SelectionReference;

use crate::scene::{EntityId, EntityKind, EntityTag, NodeId};

/// A logical entity together with the scene nodes that render it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntity {
    /// The entity's tag, which doubles as its UI details payload.
    pub tag: EntityTag,
    /// Shape-bearing nodes to highlight, in arena order.
    pub nodes: Vec<NodeId>,
}

impl ResolvedEntity {
    /// Entity kind.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.tag.kind()
    }

    /// Stable entity id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.tag.id()
    }

    /// Details for a UI panel.
    #[must_use]
    pub fn details(&self) -> &EntityTag {
        &self.tag
    }

    /// Scene-independent reference to this entity.
    #[must_use]
    pub fn reference(&self) -> SelectionReference {
        SelectionReference::capture(self)
    }
}
