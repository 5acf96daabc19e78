//! Shared numeric constants for the deck crate.

// ── Layout ──────────────────────────────────────────────────────

/// Surface pixels per deck meter.
pub const SCALE_PX_PER_M: f64 = 20.0;

/// Left margin reserved for Z-axis labels and the length caption.
pub const MARGIN_LEFT_PX: f64 = 50.0;

/// Top margin reserved for X-axis labels and the width caption.
pub const MARGIN_TOP_PX: f64 = 30.0;

/// Right margin past the deck rectangle.
pub const MARGIN_RIGHT_PX: f64 = 20.0;

/// Bottom margin past the deck rectangle.
pub const MARGIN_BOTTOM_PX: f64 = 20.0;

// ── Grid and axis labels ────────────────────────────────────────

/// Lower bound on the distance between two axis tick labels.
pub const MIN_LABEL_SPACING_PX: f64 = 40.0;

/// Number of tick labels the adaptive spacing aims for along the shorter side.
pub const LABEL_DIVISIONS: f64 = 5.0;

/// Stroke width of both grid densities.
pub const GRID_LINE_WIDTH: f64 = 0.5;

// ── Items ───────────────────────────────────────────────────────

/// Fallback fill for items the server sent without a color.
pub const DEFAULT_ITEM_COLOR: &str = "#3498db";

/// Percentage the gradient top is lightened and the bottom darkened.
pub const GRADIENT_DELTA_PCT: f64 = 15.0;

/// Percentage the item border is darkened.
pub const BORDER_DARKEN_PCT: f64 = 30.0;

/// Item border width in pixels.
pub const ITEM_BORDER_WIDTH: f64 = 2.0;

/// Item label font size bounds in pixels.
pub const MIN_LABEL_FONT_PX: f64 = 10.0;
pub const MAX_LABEL_FONT_PX: f64 = 16.0;

/// Item label line height as a multiple of the font size.
pub const LABEL_LINE_HEIGHT: f64 = 1.2;

// ── Delete affordance ───────────────────────────────────────────

/// Distance from the item's top-right corner to the affordance center, on both axes.
pub const DELETE_INSET_PX: f64 = 15.0;

/// Affordance radius in surface pixels. Also the click hit radius.
pub const DELETE_RADIUS_PX: f64 = 10.0;

// ── Messages ────────────────────────────────────────────────────

/// Vertical distance between lines of the in-surface error message.
pub const ERROR_LINE_SPACING_PX: f64 = 20.0;

// ── Tooltip ─────────────────────────────────────────────────────

/// Tooltip offset from the device cursor, on both axes.
pub const TOOLTIP_OFFSET_PX: f64 = 15.0;

/// Delay before a freshly created tooltip fades in.
pub const TOOLTIP_FADE_IN_MS: u32 = 10;

/// Delay between fading a tooltip out and removing it.
pub const TOOLTIP_FADE_OUT_MS: u32 = 300;

// ── Surface ─────────────────────────────────────────────────────

/// Surface size used for messages when nothing has sized the surface yet.
pub const FALLBACK_SURFACE_WIDTH_PX: u32 = 300;
pub const FALLBACK_SURFACE_HEIGHT_PX: u32 = 150;
