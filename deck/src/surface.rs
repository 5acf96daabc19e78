//! The drawing-surface boundary the render pipeline draws through.
//!
//! [`Surface`] is the minimal 2D capability set the deck renderer needs:
//! resize, clear, rectangles, circles, lines, linear gradients, rectangular
//! clipping, and styled text. Backends:
//!
//! | Backend | Module | Use |
//! |---------|--------|-----|
//! | [`DisplayList`] | here | records calls; tests and tooling |
//! | [`crate::svg::SvgSurface`] | `svg` | SVG export for the native host |
//! | [`crate::web::CanvasSurface`] | `web` | browser `<canvas>` 2D context |

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::convert::Infallible;

use crate::color::Rgba;
use crate::layout::{Point, Rect, SurfaceSize};

/// A gradient color stop; `offset` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Fill paint for rectangles.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Linear gradient between two surface points.
    LinearGradient { from: Point, to: Point, stops: Vec<ColorStop> },
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Self::Solid(color)
    }
}

/// Stroke color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

impl Stroke {
    #[must_use]
    pub fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

/// Drop shadow applied to subsequent fills until cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Font family used for all labels.
pub const FONT_FAMILY: &str = "Roboto, sans-serif";

/// Everything needed to place and paint one run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_px: f64,
    pub weight: FontWeight,
    pub color: Rgba,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Rotation around the anchor point, in degrees.
    pub angle_deg: f64,
}

impl TextStyle {
    /// Centered, middle-baseline text of the given size and color.
    #[must_use]
    pub fn centered(size_px: f64, color: Rgba) -> Self {
        Self {
            size_px,
            weight: FontWeight::Normal,
            color,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            angle_deg: 0.0,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    #[must_use]
    pub fn rotated(mut self, angle_deg: f64) -> Self {
        self.angle_deg = angle_deg;
        self
    }

    /// CSS font shorthand, e.g. `bold 12px Roboto, sans-serif`.
    #[must_use]
    pub fn css_font(&self) -> String {
        match self.weight {
            FontWeight::Normal => format!("{}px {FONT_FAMILY}", self.size_px),
            FontWeight::Bold => format!("bold {}px {FONT_FAMILY}", self.size_px),
        }
    }
}

/// A resizable 2D drawing surface.
///
/// Coordinates are surface pixels. `save`/`restore` scope clipping and
/// shadows the way a canvas 2D context does.
pub trait Surface {
    type Error;

    /// Resize the backing store. Implicitly clears it.
    fn resize(&mut self, size: SurfaceSize);

    fn size(&self) -> SurfaceSize;

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    fn save(&mut self);

    fn restore(&mut self);

    /// Intersect the current clip region with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    fn set_shadow(&mut self, shadow: Option<Shadow>);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// # Errors
    ///
    /// Backend-specific failure (e.g. a rejected arc on a browser context).
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Backend-specific failure.
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Backend-specific failure.
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), Self::Error>;
}

// =============================================================
// Recording surface
// =============================================================

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    ClipRect(Rect),
    SetShadow(Option<Shadow>),
    FillRect { rect: Rect, paint: Paint },
    StrokeRect { rect: Rect, stroke: Stroke },
    Line { from: Point, to: Point, stroke: Stroke },
    FillCircle { center: Point, radius: f64, color: Rgba },
    StrokeCircle { center: Point, radius: f64, stroke: Stroke },
    Text { text: String, at: Point, style: TextStyle },
}

/// A surface that records every call instead of rasterizing.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self { size, commands: Vec::new() }
    }

    /// Commands recorded since the last [`Surface::clear`] or [`Surface::resize`].
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text runs drawn since the last clear, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Replay the recorded calls onto another surface.
    ///
    /// # Errors
    ///
    /// Propagates the first error from `target`.
    pub fn replay<S: Surface>(&self, target: &mut S) -> Result<(), S::Error> {
        target.resize(self.size);
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Save => target.save(),
                DrawCommand::Restore => target.restore(),
                DrawCommand::ClipRect(rect) => target.clip_rect(*rect),
                DrawCommand::SetShadow(shadow) => target.set_shadow(*shadow),
                DrawCommand::FillRect { rect, paint } => target.fill_rect(*rect, paint),
                DrawCommand::StrokeRect { rect, stroke } => target.stroke_rect(*rect, *stroke),
                DrawCommand::Line { from, to, stroke } => target.line(*from, *to, *stroke),
                DrawCommand::FillCircle { center, radius, color } => target.fill_circle(*center, *radius, *color)?,
                DrawCommand::StrokeCircle { center, radius, stroke } => {
                    target.stroke_circle(*center, *radius, *stroke)?;
                }
                DrawCommand::Text { text, at, style } => target.fill_text(text, *at, style)?,
            }
        }
        Ok(())
    }
}

impl Surface for DisplayList {
    type Error = Infallible;

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.commands.clear();
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClipRect(rect));
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.commands.push(DrawCommand::SetShadow(shadow));
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect { rect, paint: paint.clone() });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeRect { rect, stroke });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, stroke });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Text { text: text.to_owned(), at, style: *style });
        Ok(())
    }
}
