use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// `Default` is fully transparent black, which registry validation treats
/// as "never set".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    #[serde(alias = "r")]
    pub red: f64,
    #[serde(alias = "g")]
    pub green: f64,
    #[serde(alias = "b")]
    pub blue: f64,
    #[serde(alias = "a", default = "opaque_alpha")]
    pub alpha: f64,
}

fn opaque_alpha() -> f64 {
    1.0
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Moves each color channel `amount` of the way toward white.
    /// Alpha is left untouched.
    #[must_use]
    pub fn lightened(self, amount: f64) -> Self {
        Self {
            red: self.red + (1.0 - self.red) * amount,
            green: self.green + (1.0 - self.green) * amount,
            blue: self.blue + (1.0 - self.blue) * amount,
            alpha: self.alpha,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for a filled circle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscPrimitive {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

impl DiscPrimitive {
    #[must_use]
    pub const fn new(center: Point, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.center.is_finite() {
            return Err(ChartError::InvalidData(
                "disc center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "disc radius must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Glyph textures supplied by the host asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlyphTexture {
    MarkerCircle,
    MarkerCross,
}

impl GlyphTexture {
    /// Well-known file name the asset loader resolves for this glyph.
    #[must_use]
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::MarkerCircle => "graph_marker_circle.png",
            Self::MarkerCross => "graph_marker_cross.png",
        }
    }
}

/// Draw command for a tinted glyph stretched over `rect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturePrimitive {
    pub glyph: GlyphTexture,
    pub rect: Rect,
    pub tint: Color,
}

impl TexturePrimitive {
    #[must_use]
    pub const fn new(glyph: GlyphTexture, rect: Rect, tint: Color) -> Self {
        Self { glyph, rect, tint }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.rect.is_finite() {
            return Err(ChartError::InvalidData(
                "texture rect must be finite".to_owned(),
            ));
        }
        if self.rect.width < 0.0 || self.rect.height < 0.0 {
            return Err(ChartError::InvalidData(
                "texture rect size must be >= 0".to_owned(),
            ));
        }
        self.tint.validate()
    }
}
