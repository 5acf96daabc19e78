//! Layout transform: the single authority for meters ↔ surface pixels.
//!
//! Rendering and hit-testing both go through [`LayoutTransform`], so a
//! rectangle drawn at some pixel position is exactly the rectangle the
//! interaction layer tests pointer positions against.
//!
//! Three coordinate spaces are involved:
//! - **deck** space, in meters, origin at the deck's top-left corner;
//! - **surface** space, in logical pixels of the drawing surface, with the
//!   deck offset by the axis-label margins;
//! - **device** space, the CSS pixels pointer events arrive in. The surface may
//!   be displayed scaled, so device → surface divides by the display ratio.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::consts::{MARGIN_BOTTOM_PX, MARGIN_LEFT_PX, MARGIN_RIGHT_PX, MARGIN_TOP_PX, SCALE_PX_PER_M};
use crate::model::{Deck, Item};

/// A point in surface or device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Edge-inclusive containment test.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Layout axis. X maps to surface x (deck width), Z to surface y (deck length).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Where the host displays the surface, in device (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A surface displayed unscaled at the device origin.
    #[must_use]
    pub fn unscaled(size: SurfaceSize) -> Self {
        Self::new(0.0, 0.0, f64::from(size.width), f64::from(size.height))
    }
}

/// Pixel offsets reserved around the deck rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Meters ↔ surface pixel mapping.
///
/// `scale` is in pixels per meter. The deck's top-left corner sits at
/// `(margins.left, margins.top)` on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTransform {
    pub scale: f64,
    pub margins: Margins,
}

impl Default for LayoutTransform {
    fn default() -> Self {
        Self {
            scale: SCALE_PX_PER_M,
            margins: Margins {
                left: MARGIN_LEFT_PX,
                top: MARGIN_TOP_PX,
                right: MARGIN_RIGHT_PX,
                bottom: MARGIN_BOTTOM_PX,
            },
        }
    }
}

impl LayoutTransform {
    fn margin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.margins.left,
            Axis::Z => self.margins.top,
        }
    }

    /// Convert a deck coordinate in meters to surface pixels.
    #[must_use]
    pub fn to_surface(&self, meters: f64, axis: Axis) -> f64 {
        meters * self.scale + self.margin(axis)
    }

    /// Convert a surface pixel coordinate back to deck meters.
    #[must_use]
    pub fn from_surface(&self, pixels: f64, axis: Axis) -> f64 {
        (pixels - self.margin(axis)) / self.scale
    }

    /// Convert a length in meters to a length in pixels (no margin).
    #[must_use]
    pub fn to_pixels(&self, meters: f64) -> f64 {
        meters * self.scale
    }

    /// Surface dimensions for `deck`: the scaled deck rounded up, plus both margins.
    ///
    /// Rounding up keeps the last grid cell fully inside the surface.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn surface_size(&self, deck: &Deck) -> SurfaceSize {
        let width = (deck.width * self.scale).ceil().max(0.0) + self.margins.left + self.margins.right;
        let height = (deck.length * self.scale).ceil().max(0.0) + self.margins.top + self.margins.bottom;
        SurfaceSize::new(width.ceil() as u32, height.ceil() as u32)
    }

    /// The deck's rectangle on the surface.
    #[must_use]
    pub fn deck_rect(&self, deck: &Deck) -> Rect {
        Rect::new(self.margins.left, self.margins.top, self.to_pixels(deck.width), self.to_pixels(deck.length))
    }

    /// An item's footprint on the surface.
    #[must_use]
    pub fn item_rect(&self, item: &Item) -> Rect {
        Rect::new(
            self.to_surface(item.position_x, Axis::X),
            self.to_surface(item.position_z, Axis::Z),
            self.to_pixels(item.width),
            self.to_pixels(item.length),
        )
    }

    /// Map a device-space pointer position onto the surface.
    ///
    /// `screen` is where the host currently displays the surface; `surface` is
    /// its logical size. When the two differ (CSS scaling, device pixel ratio)
    /// the offset from the screen origin is stretched by their ratio. A
    /// zero-sized screen rectangle maps with ratio 1.
    #[must_use]
    pub fn device_to_surface(&self, device: Point, screen: ScreenRect, surface: SurfaceSize) -> Point {
        let ratio = |logical: u32, displayed: f64| {
            if displayed > 0.0 {
                f64::from(logical) / displayed
            } else {
                1.0
            }
        };
        Point::new(
            (device.x - screen.left) * ratio(surface.width, screen.width),
            (device.y - screen.top) * ratio(surface.height, screen.height),
        )
    }

    /// Inverse of [`Self::device_to_surface`].
    #[must_use]
    pub fn surface_to_device(&self, surface_pt: Point, screen: ScreenRect, surface: SurfaceSize) -> Point {
        let ratio = |logical: u32, displayed: f64| {
            if logical > 0 {
                displayed / f64::from(logical)
            } else {
                1.0
            }
        };
        Point::new(
            surface_pt.x * ratio(surface.width, screen.width) + screen.left,
            surface_pt.y * ratio(surface.height, screen.height) + screen.top,
        )
    }
}
