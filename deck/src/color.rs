//! Color values and the pure shading helpers used by the item renderer.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

use crate::consts::DEFAULT_ITEM_COLOR;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Label color for light backgrounds.
pub const DARK_TEXT: Rgb = Rgb::new(0, 0, 0);

/// Label color for dark backgrounds.
pub const LIGHT_TEXT: Rgb = Rgb::new(255, 255, 255);

/// Luminance at or above which a background counts as light.
const CONTRAST_THRESHOLD: f64 = 128.0;

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` value.
    #[must_use]
    pub const fn from_u32(packed: u32) -> Self {
        Self::new(((packed >> 16) & 0xFF) as u8, ((packed >> 8) & 0xFF) as u8, (packed & 0xFF) as u8)
    }

    /// Pack into a `0xRRGGBB` value.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parse `#RGB` or `#RRGGBB`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let hex = raw.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let digits: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_owned(),
            _ => return None,
        };
        match u32::from_str_radix(&digits, 16) {
            Ok(packed) => Some(Self::from_u32(packed)),
            Err(_) => None,
        }
    }

    /// Parse an optional item color, falling back to the default item color.
    #[must_use]
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_else(Self::default_item)
    }

    /// The color applied to items that arrive without one.
    #[must_use]
    pub fn default_item() -> Self {
        Self::parse(DEFAULT_ITEM_COLOR).unwrap_or(Self::new(0x34, 0x98, 0xdb))
    }

    /// Perceived luminance on a 0–255 scale.
    #[must_use]
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    /// Attach an alpha channel.
    #[must_use]
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba { r: self.r, g: self.g, b: self.b, a }
    }

    /// Canonical lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// An RGB color with a `0.0..=1.0` alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { r: rgb.r, g: rgb.g, b: rgb.b, a: 1.0 }
    }

    #[must_use]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// CSS color string: `#rrggbb` when opaque, `rgba(...)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a >= 1.0 {
            self.rgb().to_hex()
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::opaque(rgb)
    }
}

/// Channel delta for a percentage: `round(2.55 * percent)`.
#[allow(clippy::cast_possible_truncation)]
fn channel_delta(percent: f64) -> i32 {
    (2.55 * percent).round() as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shift(color: Rgb, delta: i32) -> Rgb {
    let apply = |c: u8| (i32::from(c) + delta).clamp(0, 255) as u8;
    Rgb::new(apply(color.r), apply(color.g), apply(color.b))
}

/// Raise every channel by `round(2.55 * percent)`, clamped to 255.
#[must_use]
pub fn lighten(color: Rgb, percent: f64) -> Rgb {
    shift(color, channel_delta(percent))
}

/// Lower every channel by `round(2.55 * percent)`, clamped to 0.
#[must_use]
pub fn darken(color: Rgb, percent: f64) -> Rgb {
    shift(color, -channel_delta(percent))
}

/// Pick dark or light label text for legibility on `background`.
#[must_use]
pub fn contrast_color(background: Rgb) -> Rgb {
    if background.luminance() >= CONTRAST_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

// ── Palette ─────────────────────────────────────────────────────

pub const GRID_MAJOR: Rgba = Rgba::new(0xe0, 0xe0, 0xe0, 1.0);
pub const GRID_MINOR: Rgba = Rgba::new(0xf0, 0xf0, 0xf0, 1.0);
pub const TICK_LABEL: Rgba = Rgba::new(0x66, 0x66, 0x66, 1.0);
pub const CAPTION: Rgba = Rgba::new(0x33, 0x33, 0x33, 1.0);
pub const DECK_FILL: Rgba = Rgba::new(240, 240, 240, 0.5);
pub const ITEM_SHADOW: Rgba = Rgba::new(0, 0, 0, 0.2);
pub const AFFORDANCE_FILL: Rgba = Rgba::new(255, 255, 255, 0.9);
pub const WARNING: Rgba = Rgba::new(0xD3, 0x2F, 0x2F, 1.0);
pub const HOVER_HIGHLIGHT: Rgba = Rgba::new(0x1E, 0x90, 0xFF, 1.0);
