//! Hit-testing against the item bounds emitted by the most recent render.
//!
//! The renderer records one [`RenderedItemBounds`] per item, in draw order,
//! in the same surface-pixel space it draws in. Nothing here recomputes
//! geometry from the model: if the renderer moves a rectangle or an
//! affordance, hit-testing follows automatically.
//!
//! Two tests exist and they are deliberately different:
//! - **body**: edge-inclusive rectangle containment (hover);
//! - **delete affordance**: Euclidean distance to the circle center (click).
//!
//! Both return the first match in draw order.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::layout::{Point, Rect};
use crate::model::ItemId;

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    DeleteAffordance,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// The circular delete control drawn on each item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteAffordance {
    pub center: Point,
    pub radius: f64,
}

impl DeleteAffordance {
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.center.distance(pt) <= self.radius
    }
}

/// Surface-space geometry of one item as drawn by the last render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedItemBounds {
    pub item_id: ItemId,
    pub rect: Rect,
    pub delete: DeleteAffordance,
}

/// First item (in draw order) whose body contains `pt`.
#[must_use]
pub fn item_at(bounds: &[RenderedItemBounds], pt: Point) -> Option<ItemId> {
    bounds.iter().find(|b| b.rect.contains(pt)).map(|b| b.item_id)
}

/// First item (in draw order) whose delete affordance contains `pt`.
#[must_use]
pub fn delete_target_at(bounds: &[RenderedItemBounds], pt: Point) -> Option<ItemId> {
    bounds.iter().find(|b| b.delete.contains(pt)).map(|b| b.item_id)
}

/// Classify `pt`: affordances win over bodies, since the affordance sits on top.
#[must_use]
pub fn hit_test(bounds: &[RenderedItemBounds], pt: Point) -> Option<Hit> {
    if let Some(item_id) = delete_target_at(bounds, pt) {
        return Some(Hit { item_id, part: HitPart::DeleteAffordance });
    }
    item_at(bounds, pt).map(|item_id| Hit { item_id, part: HitPart::Body })
}
