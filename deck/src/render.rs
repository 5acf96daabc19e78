//! Rendering: draws a load snapshot onto a [`Surface`].
//!
//! Rendering is deterministic: the same snapshot, layout and hover state
//! always produce the same sequence of surface calls. Besides pixels, a render
//! produces the [`RenderedItemBounds`] the interaction layer hit-tests against.
//! They are recorded from the very rectangles being drawn, so the two can
//! never disagree.
//!
//! Layers, bottom first: grid (1 m and 0.5 m), axis labels and captions, deck
//! fill, then items clipped to the deck rectangle. Empty and invalid
//! snapshots short-circuit into a centered message.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::color::{
    self, AFFORDANCE_FILL, CAPTION, DECK_FILL, GRID_MAJOR, GRID_MINOR, HOVER_HIGHLIGHT, ITEM_SHADOW, Rgb, Rgba,
    TICK_LABEL, WARNING,
};
use crate::consts::{
    BORDER_DARKEN_PCT, DELETE_INSET_PX, DELETE_RADIUS_PX, ERROR_LINE_SPACING_PX, FALLBACK_SURFACE_HEIGHT_PX,
    FALLBACK_SURFACE_WIDTH_PX, GRADIENT_DELTA_PCT, GRID_LINE_WIDTH, ITEM_BORDER_WIDTH, LABEL_DIVISIONS,
    LABEL_LINE_HEIGHT, MAX_LABEL_FONT_PX, MIN_LABEL_FONT_PX, MIN_LABEL_SPACING_PX,
};
use crate::hit::{DeleteAffordance, RenderedItemBounds};
use crate::layout::{LayoutTransform, Point, Rect, SurfaceSize};
use crate::model::{Deck, Item, ItemId, LoadSnapshot};
use crate::surface::{ColorStop, Paint, Shadow, Stroke, Surface, TextStyle};

/// Message drawn when the snapshot has no deck descriptor.
pub const INVALID_SNAPSHOT_MESSAGE: &str = "Data received from the API is invalid or incomplete.";

/// Message drawn over an empty deck.
pub const EMPTY_DECK_MESSAGE: &str = "Empty deck";

/// Glyph drawn inside the delete affordance.
const DELETE_GLYPH: &str = "×";

/// Floating-point slack when stepping grid lines up to the deck edge.
const STEP_EPSILON: f64 = 1e-9;

/// Draw `snapshot` and return the bounds of every drawn item, in draw order.
///
/// `hovered` is re-stroked in the highlight color. A missing snapshot or deck
/// draws [`INVALID_SNAPSHOT_MESSAGE`] and yields no bounds.
///
/// # Errors
///
/// Propagates the first failing surface call.
pub fn render<S: Surface>(
    surface: &mut S,
    layout: &LayoutTransform,
    snapshot: Option<&LoadSnapshot>,
    hovered: Option<ItemId>,
) -> Result<Vec<RenderedItemBounds>, S::Error> {
    let Some((snapshot, deck)) = snapshot.and_then(|s| s.deck.as_ref().map(|d| (s, d))) else {
        draw_message(surface, INVALID_SNAPSHOT_MESSAGE)?;
        return Ok(Vec::new());
    };

    // Layer 1: size and clear.
    surface.resize(layout.surface_size(deck));
    surface.clear();

    // Layer 2: grid, labels, deck area.
    let deck_rect = layout.deck_rect(deck);
    draw_grid(surface, layout, deck_rect);
    draw_axis_labels(surface, layout, deck, deck_rect)?;
    surface.fill_rect(deck_rect, &Paint::Solid(DECK_FILL));

    if snapshot.items.is_empty() {
        draw_centered_text(surface, EMPTY_DECK_MESSAGE, TextStyle::centered(16.0, TICK_LABEL).bold())?;
        return Ok(Vec::new());
    }

    // Layer 3: items, clipped to the deck.
    let mut bounds = Vec::with_capacity(snapshot.items.len());
    surface.save();
    surface.clip_rect(deck_rect);
    for item in &snapshot.items {
        let item_bounds = item_bounds(layout, item);
        bounds.push(item_bounds);
        draw_item(surface, item, &item_bounds, hovered == Some(item.id))?;
    }
    surface.restore();

    Ok(bounds)
}

/// Clear the surface and draw a centered, multi-line error message.
///
/// Lines are split on `\n`. The surface keeps its current size, or takes a
/// small fallback size if it has never been sized.
///
/// # Errors
///
/// Propagates the first failing surface call.
pub fn draw_message<S: Surface>(surface: &mut S, message: &str) -> Result<(), S::Error> {
    let size = surface.size();
    if size.width == 0 || size.height == 0 {
        surface.resize(SurfaceSize::new(FALLBACK_SURFACE_WIDTH_PX, FALLBACK_SURFACE_HEIGHT_PX));
    }
    surface.clear();

    let SurfaceSize { width, height } = surface.size();
    let center = Point::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
    let style = TextStyle::centered(16.0, WARNING).bold();
    for (idx, line) in message.split('\n').enumerate() {
        let y = center.y + index_f64(idx) * ERROR_LINE_SPACING_PX;
        surface.fill_text(line, Point::new(center.x, y), &style)?;
    }
    Ok(())
}

/// Geometry of one item and its delete affordance.
#[must_use]
pub fn item_bounds(layout: &LayoutTransform, item: &Item) -> RenderedItemBounds {
    let rect = layout.item_rect(item);
    RenderedItemBounds {
        item_id: item.id,
        rect,
        delete: DeleteAffordance {
            center: Point::new(rect.right() - DELETE_INSET_PX, rect.y + DELETE_INSET_PX),
            radius: DELETE_RADIUS_PX,
        },
    }
}

/// Adaptive distance between axis tick labels.
#[must_use]
pub fn label_spacing(deck_rect: Rect) -> f64 {
    MIN_LABEL_SPACING_PX.max(deck_rect.width.min(deck_rect.height) / LABEL_DIVISIONS)
}

/// Label font size for an item of the given pixel footprint.
#[must_use]
pub fn label_font_size(rect: Rect) -> f64 {
    (rect.width.min(rect.height) / 4.0)
        .floor()
        .clamp(MIN_LABEL_FONT_PX, MAX_LABEL_FONT_PX)
}

// =============================================================
// Grid
// =============================================================

fn draw_grid<S: Surface>(surface: &mut S, layout: &LayoutTransform, deck_rect: Rect) {
    draw_grid_lines(surface, deck_rect, layout.scale, Stroke::new(GRID_MAJOR, GRID_LINE_WIDTH));
    draw_grid_lines(surface, deck_rect, layout.scale / 2.0, Stroke::new(GRID_MINOR, GRID_LINE_WIDTH));
}

fn draw_grid_lines<S: Surface>(surface: &mut S, deck_rect: Rect, step: f64, stroke: Stroke) {
    for x in steps(deck_rect.width, step) {
        let px = deck_rect.x + x;
        surface.line(Point::new(px, deck_rect.y), Point::new(px, deck_rect.bottom()), stroke);
    }
    for y in steps(deck_rect.height, step) {
        let py = deck_rect.y + y;
        surface.line(Point::new(deck_rect.x, py), Point::new(deck_rect.right(), py), stroke);
    }
}

/// `0, step, 2*step, ...` up to and including `extent`.
fn steps(extent: f64, step: f64) -> impl Iterator<Item = f64> {
    let valid = step > 0.0 && extent >= 0.0;
    (0u32..)
        .map(move |i| f64::from(i) * step)
        .take_while(move |v| valid && *v <= extent + STEP_EPSILON)
}

// =============================================================
// Axis labels
// =============================================================

fn draw_axis_labels<S: Surface>(
    surface: &mut S,
    layout: &LayoutTransform,
    deck: &Deck,
    deck_rect: Rect,
) -> Result<(), S::Error> {
    let spacing = label_spacing(deck_rect);
    let tick = TextStyle::centered(10.0, TICK_LABEL);

    for x in steps(deck_rect.width, spacing) {
        let meters = round_tenths(x / layout.scale);
        if meters <= deck.width {
            surface.fill_text(&format!("{meters:.1}m"), Point::new(deck_rect.x + x, deck_rect.y - 15.0), &tick)?;
        }
    }
    for y in steps(deck_rect.height, spacing) {
        let meters = round_tenths(y / layout.scale);
        if meters <= deck.length {
            surface.fill_text(&format!("{meters:.1}m"), Point::new(deck_rect.x - 25.0, deck_rect.y + y), &tick)?;
        }
    }

    let caption = TextStyle::centered(12.0, CAPTION).bold();
    surface.fill_text(
        &format!("Width: {:.1}m", deck.width),
        Point::new(deck_rect.x + deck_rect.width / 2.0, deck_rect.y - 25.0),
        &caption,
    )?;
    surface.fill_text(
        &format!("Length: {:.1}m", deck.length),
        Point::new(deck_rect.x - 40.0, deck_rect.y + deck_rect.height / 2.0),
        &caption.rotated(-90.0),
    )?;
    Ok(())
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =============================================================
// Items
// =============================================================

fn draw_item<S: Surface>(
    surface: &mut S,
    item: &Item,
    bounds: &RenderedItemBounds,
    hovered: bool,
) -> Result<(), S::Error> {
    let base = Rgb::parse_or_default(item.color.as_deref());
    let rect = bounds.rect;

    // Body: shaded gradient with a drop shadow.
    surface.set_shadow(Some(Shadow { color: ITEM_SHADOW, blur: 10.0, offset_x: 3.0, offset_y: 3.0 }));
    let gradient = Paint::LinearGradient {
        from: Point::new(rect.x, rect.y),
        to: Point::new(rect.x, rect.bottom()),
        stops: vec![
            ColorStop { offset: 0.0, color: color::lighten(base, GRADIENT_DELTA_PCT).into() },
            ColorStop { offset: 1.0, color: color::darken(base, GRADIENT_DELTA_PCT).into() },
        ],
    };
    surface.fill_rect(rect, &gradient);
    surface.set_shadow(None);

    // Border.
    let border = Rgba::opaque(color::darken(base, BORDER_DARKEN_PCT));
    surface.stroke_rect(rect, Stroke::new(border, ITEM_BORDER_WIDTH));
    if hovered {
        surface.stroke_rect(rect, Stroke::new(HOVER_HIGHLIGHT, ITEM_BORDER_WIDTH));
    }

    draw_item_labels(surface, item, rect, base)?;
    draw_delete_affordance(surface, &bounds.delete)
}

fn draw_item_labels<S: Surface>(surface: &mut S, item: &Item, rect: Rect, base: Rgb) -> Result<(), S::Error> {
    let font_size = label_font_size(rect);
    let style = TextStyle::centered(font_size, color::contrast_color(base).into()).bold();

    let lines = [format!("#{}", item.id), format!("{:.1}t", item.weight)];
    let center = rect.center();
    let line_height = font_size * LABEL_LINE_HEIGHT;
    let start_y = center.y - line_height * index_f64(lines.len() - 1) / 2.0;
    for (idx, line) in lines.iter().enumerate() {
        surface.fill_text(line, Point::new(center.x, start_y + index_f64(idx) * line_height), &style)?;
    }
    Ok(())
}

fn draw_delete_affordance<S: Surface>(surface: &mut S, affordance: &DeleteAffordance) -> Result<(), S::Error> {
    let DeleteAffordance { center, radius } = *affordance;
    surface.fill_circle(center, radius, AFFORDANCE_FILL)?;
    surface.stroke_circle(center, radius, Stroke::new(WARNING, 2.0))?;
    surface.fill_text(DELETE_GLYPH, Point::new(center.x, center.y + 1.0), &TextStyle::centered(16.0, WARNING).bold())
}

// =============================================================
// Helpers
// =============================================================

fn draw_centered_text<S: Surface>(surface: &mut S, text: &str, style: TextStyle) -> Result<(), S::Error> {
    let SurfaceSize { width, height } = surface.size();
    surface.fill_text(text, Point::new(f64::from(width) / 2.0, f64::from(height) / 2.0), &style)
}

#[allow(clippy::cast_precision_loss)]
fn index_f64(idx: usize) -> f64 {
    idx as f64
}
