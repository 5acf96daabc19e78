//! Browser backends: a `<canvas>` 2D surface and the DOM tooltip overlay.

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::color::Rgba;
use crate::consts::{TOOLTIP_FADE_IN_MS, TOOLTIP_FADE_OUT_MS};
use crate::input::{Overlay, TooltipContent};
use crate::layout::{Point, Rect, SurfaceSize};
use crate::surface::{Paint, Shadow, Stroke, Surface, TextAlign, TextBaseline, TextStyle};
use crate::svg::escape_markup;

// =============================================================
// Canvas surface
// =============================================================

/// [`Surface`] over a canvas element's 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// # Errors
    ///
    /// Fails when the canvas cannot provide a 2D context.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self { canvas: canvas.clone(), ctx })
    }

    fn set_stroke(&self, stroke: Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width);
    }

    /// Draw `text` rotated about `at`. Callers bracket this with save/restore,
    /// so a failed transform is undone with the rest of the state.
    fn fill_rotated_text(&self, text: &str, at: Point, angle_deg: f64) -> Result<(), JsValue> {
        self.ctx.translate(at.x, at.y)?;
        self.ctx.rotate(angle_deg.to_radians())?;
        self.ctx.fill_text(text, 0.0, 0.0)
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn resize(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) {
        let SurfaceSize { width, height } = self.size();
        self.ctx.clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ctx.begin_path();
        self.ctx.rect(rect.x, rect.y, rect.width, rect.height);
        self.ctx.clip();
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        match shadow {
            Some(Shadow { color, blur, offset_x, offset_y }) => {
                self.ctx.set_shadow_color(&color.to_css());
                self.ctx.set_shadow_blur(blur);
                self.ctx.set_shadow_offset_x(offset_x);
                self.ctx.set_shadow_offset_y(offset_y);
            }
            None => {
                self.ctx.set_shadow_color("transparent");
                self.ctx.set_shadow_blur(0.0);
                self.ctx.set_shadow_offset_x(0.0);
                self.ctx.set_shadow_offset_y(0.0);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::LinearGradient { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
                for stop in stops {
                    if let Err(err) = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css()) {
                        tracing::warn!(?err, "rejected gradient stop");
                    }
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.set_stroke(stroke);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.set_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)?;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)?;
        self.set_stroke(stroke);
        self.ctx.stroke();
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), JsValue> {
        self.ctx.set_font(&style.css_font());
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_text_baseline(match style.baseline {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        });

        if style.angle_deg.abs() <= f64::EPSILON {
            return self.ctx.fill_text(text, at.x, at.y);
        }
        self.ctx.save();
        let drawn = self.fill_rotated_text(text, at, style.angle_deg);
        self.ctx.restore();
        drawn
    }
}


// =============================================================
// Tooltip overlay
// =============================================================

/// Hover tooltip rendered as a `div.tooltip` on the document body.
///
/// Fades in shortly after creation and is removed after its fade-out.
pub struct DomTooltip {
    document: Document,
    current: Option<HtmlElement>,
}

impl DomTooltip {
    /// # Errors
    ///
    /// Fails outside a browser window.
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self { document, current: None })
    }

    fn build(&self, content: &TooltipContent, at: Point) -> Result<HtmlElement, JsValue> {
        let el = self.document.create_element("div")?.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
        el.set_class_name("tooltip");

        let mut html = format!("<strong>{}</strong>", escape_markup(&content.title));
        for line in &content.lines {
            html.push_str("<br>");
            html.push_str(&escape_markup(line));
        }
        el.set_inner_html(&html);

        let style = el.style();
        style.set_property("opacity", "0")?;
        place(&el, at)?;

        let body = self.document.body().ok_or_else(|| JsValue::from_str("no document body"))?;
        body.append_child(&el)?;
        Ok(el)
    }
}

fn place(el: &HtmlElement, at: Point) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("left", &format!("{}px", at.x))?;
    style.set_property("top", &format!("{}px", at.y))
}

impl Overlay for DomTooltip {
    fn create(&mut self, content: &TooltipContent, at: Point) {
        self.destroy();
        match self.build(content, at) {
            Ok(el) => {
                let fading_in = el.clone();
                Timeout::new(TOOLTIP_FADE_IN_MS, move || {
                    if let Err(err) = fading_in.style().set_property("opacity", "1") {
                        tracing::warn!(?err, "tooltip fade-in failed");
                    }
                })
                .forget();
                self.current = Some(el);
            }
            Err(err) => tracing::warn!(?err, "tooltip creation failed"),
        }
    }

    fn reposition(&mut self, at: Point) {
        if let Some(el) = &self.current {
            if let Err(err) = place(el, at) {
                tracing::warn!(?err, "tooltip reposition failed");
            }
        }
    }

    fn destroy(&mut self) {
        let Some(el) = self.current.take() else {
            return;
        };
        if let Err(err) = el.style().set_property("opacity", "0") {
            tracing::warn!(?err, "tooltip fade-out failed");
        }
        Timeout::new(TOOLTIP_FADE_OUT_MS, move || el.remove()).forget();
    }
}
