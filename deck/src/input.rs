//! Input model: pointer events, cursor, hover state, and the tooltip overlay seam.
//!
//! Pointer events arrive in device coordinates together with the surface's
//! on-screen rectangle; [`crate::layout::LayoutTransform::device_to_surface`]
//! turns them into surface pixels before any hit-testing. `HoverState` is the
//! two-state machine driven by pointer moves. Tooltip side effects go through
//! the injected [`Overlay`] capability so the state machine stays testable.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::TOOLTIP_OFFSET_PX;
use crate::layout::{Point, ScreenRect};
use crate::model::{Item, ItemId};

/// A pointer move or click over the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Cursor position in device (client) coordinates.
    pub device: Point,
    /// The surface's displayed rectangle, in the same coordinate space.
    pub screen: ScreenRect,
}

impl PointerEvent {
    #[must_use]
    pub fn new(device: Point, screen: ScreenRect) -> Self {
        Self { device, screen }
    }
}

/// Cursor shown over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Over an item.
    Pointer,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
        }
    }
}

/// Hover state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(ItemId),
}

/// What a pointer move did to the hover state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    /// Same target as before (possibly none).
    Unchanged,
    /// Target changed. Either side may be `None`.
    Changed { from: Option<ItemId>, to: Option<ItemId> },
}

impl HoverState {
    #[must_use]
    pub fn hovered(self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Hovering(id) => Some(id),
        }
    }

    /// Move to `target` and report whether anything changed.
    pub fn update(&mut self, target: Option<ItemId>) -> HoverChange {
        let from = self.hovered();
        if from == target {
            return HoverChange::Unchanged;
        }
        *self = target.map_or(Self::Idle, Self::Hovering);
        HoverChange::Changed { from, to: target }
    }

    /// Force `Idle`. Returns the item that was hovered, if any.
    pub fn reset(&mut self) -> Option<ItemId> {
        let from = self.hovered();
        *self = Self::Idle;
        from
    }

    /// Cursor for the current state.
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::Idle => Cursor::Default,
            Self::Hovering(_) => Cursor::Pointer,
        }
    }
}

/// Text shown in the hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    /// Emphasized first line.
    pub title: String,
    pub lines: Vec<String>,
}

impl TooltipContent {
    #[must_use]
    pub fn for_item(item: &Item) -> Self {
        Self {
            title: format!("Container #{}", item.id),
            lines: vec![
                format!("Dimensions: {}m × {}m", item.width, item.length),
                format!("Weight: {}t", item.weight),
            ],
        }
    }
}

/// Tooltip side effects. At most one tooltip is alive at a time.
pub trait Overlay {
    /// Show a tooltip at `at` (device coordinates, already offset from the cursor).
    fn create(&mut self, content: &TooltipContent, at: Point);

    /// Move the live tooltip, if any.
    fn reposition(&mut self, at: Point);

    /// Fade out and remove the live tooltip, if any.
    fn destroy(&mut self);
}

/// Where the tooltip goes for a cursor at `device`.
#[must_use]
pub fn tooltip_anchor(device: Point) -> Point {
    Point::new(device.x + TOOLTIP_OFFSET_PX, device.y + TOOLTIP_OFFSET_PX)
}

/// Prompt shown before deleting an item.
#[must_use]
pub fn confirm_prompt(id: ItemId) -> String {
    format!("Delete container #{id}?")
}
