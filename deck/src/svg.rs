//! SVG export surface.
//!
//! Writes a standalone SVG document. Gradients and clip rectangles become
//! `<defs>` entries; every `clip_rect` opens a clipped `<g>` that the matching
//! `restore` closes. Drop shadows are not exported.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fmt::{self, Write as _};

use crate::color::Rgba;
use crate::layout::{Point, Rect, SurfaceSize};
use crate::surface::{ColorStop, FONT_FAMILY, FontWeight, Paint, Shadow, Stroke, Surface, TextAlign, TextBaseline, TextStyle};

/// A [`Surface`] that builds an SVG document in memory.
#[derive(Debug, Default)]
pub struct SvgSurface {
    size: SurfaceSize,
    defs: String,
    body: String,
    next_id: usize,
    /// Groups opened since the last `save`.
    open_groups: usize,
    /// `open_groups` of each enclosing `save`.
    saved: Vec<usize>,
}

impl SvgSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Close any open groups and return the finished document.
    #[must_use]
    pub fn finish(mut self) -> String {
        let open = self.open_groups + self.saved.iter().sum::<usize>();
        for _ in 0..open {
            self.body.push_str("</g>\n");
        }

        let SurfaceSize { width, height } = self.size;
        let mut doc = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        );
        if !self.defs.is_empty() {
            doc.push_str("<defs>\n");
            doc.push_str(&self.defs);
            doc.push_str("</defs>\n");
        }
        doc.push_str(&self.body);
        doc.push_str("</svg>\n");
        doc
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn gradient_def(&mut self, from: Point, to: Point, stops: &[ColorStop]) -> String {
        let id = self.fresh_id("grad");
        let mut def = format!(
            "<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\">\n",
            from.x, from.y, to.x, to.y
        );
        for stop in stops {
            def.push_str(&format!(
                "<stop offset=\"{}\" {}/>\n",
                stop.offset,
                color_attrs("stop-color", "stop-opacity", stop.color)
            ));
        }
        def.push_str("</linearGradient>\n");
        self.defs.push_str(&def);
        id
    }
}

/// `name="#rrggbb"` plus an opacity attribute when translucent.
fn color_attrs(name: &str, opacity_name: &str, color: Rgba) -> String {
    if color.a >= 1.0 {
        format!("{name}=\"{}\"", color.rgb())
    } else {
        format!("{name}=\"{}\" {opacity_name}=\"{}\"", color.rgb(), color.a)
    }
}

fn stroke_attrs(stroke: Stroke) -> String {
    format!(
        "fill=\"none\" {} stroke-width=\"{}\"",
        color_attrs("stroke", "stroke-opacity", stroke.color),
        stroke.width
    )
}

/// Escape text for XML and HTML content.
pub(crate) fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Surface for SvgSurface {
    type Error = fmt::Error;

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.clear();
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.defs.clear();
        self.body.clear();
        self.open_groups = 0;
        self.saved.clear();
    }

    fn save(&mut self) {
        self.saved.push(self.open_groups);
        self.open_groups = 0;
    }

    fn restore(&mut self) {
        for _ in 0..self.open_groups {
            self.body.push_str("</g>\n");
        }
        self.open_groups = self.saved.pop().unwrap_or(0);
    }

    fn clip_rect(&mut self, rect: Rect) {
        let id = self.fresh_id("clip");
        self.defs.push_str(&format!(
            "<clipPath id=\"{id}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>\n",
            rect.x, rect.y, rect.width, rect.height
        ));
        self.body.push_str(&format!("<g clip-path=\"url(#{id})\">\n"));
        self.open_groups += 1;
    }

    fn set_shadow(&mut self, _shadow: Option<Shadow>) {}

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let fill = match paint {
            Paint::Solid(color) => color_attrs("fill", "fill-opacity", *color),
            Paint::LinearGradient { from, to, stops } => {
                format!("fill=\"url(#{})\"", self.gradient_def(*from, *to, stops))
            }
        };
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {fill}/>\n",
            rect.x, rect.y, rect.width, rect.height
        ));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>\n",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            stroke_attrs(stroke)
        ));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.body.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {} stroke-width=\"{}\"/>\n",
            from.x,
            from.y,
            to.x,
            to.y,
            color_attrs("stroke", "stroke-opacity", stroke.color),
            stroke.width
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) -> Result<(), fmt::Error> {
        writeln!(
            self.body,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {}/>",
            center.x,
            center.y,
            radius,
            color_attrs("fill", "fill-opacity", color)
        )
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<(), fmt::Error> {
        writeln!(
            self.body,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {}/>",
            center.x,
            center.y,
            radius,
            stroke_attrs(stroke)
        )
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), fmt::Error> {
        let anchor = match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let baseline = match style.baseline {
            TextBaseline::Top => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "text-after-edge",
        };
        let weight = match style.weight {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        write!(
            self.body,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{anchor}\" dominant-baseline=\"{baseline}\" \
             font-family=\"{FONT_FAMILY}\" font-size=\"{}\" font-weight=\"{weight}\" {}",
            at.x,
            at.y,
            style.size_px,
            color_attrs("fill", "fill-opacity", style.color)
        )?;
        if style.angle_deg.abs() > f64::EPSILON {
            write!(self.body, " transform=\"rotate({} {:.2} {:.2})\"", style.angle_deg, at.x, at.y)?;
        }
        writeln!(self.body, ">{}</text>", escape_markup(text))
    }
}
