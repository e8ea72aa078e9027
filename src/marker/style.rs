use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::marker::MarkerShape;
use crate::render::Color;

pub const DEFAULT_MARKER_SIZE: f64 = 7.0;
pub const DEFAULT_FILL_COLOR: Color = Color::rgb(0.0, 0.13, 0.14);
pub const DEFAULT_FILL_HIGHLIGHT_COLOR: Color = Color::rgb(0.07, 1.0, 0.84);
pub const DEFAULT_STROKE_COLOR: Color = Color::BLACK;

/// Visual configuration applied to newly created markers.
///
/// Serializable so hosts can keep marker looks next to the rest of their
/// chart setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default)]
    pub shape: MarkerShape,
    #[serde(default = "default_fill_color")]
    pub fill_color: Color,
    #[serde(default = "default_fill_highlight_color")]
    pub fill_highlight_color: Color,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: Color,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: default_size(),
            shape: MarkerShape::default(),
            fill_color: default_fill_color(),
            fill_highlight_color: default_fill_highlight_color(),
            stroke_color: default_stroke_color(),
            visible: default_visible(),
        }
    }
}

impl MarkerStyle {
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: MarkerShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub fn with_fill_colors(mut self, normal: Color, highlighted: Color) -> Self {
        self.fill_color = normal;
        self.fill_highlight_color = highlighted;
        self
    }

    #[must_use]
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(ChartError::InvalidData(
                "marker size must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.fill_highlight_color.validate()?;
        self.stroke_color.validate()?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let style: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse marker style json: {e}"))
        })?;
        style.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize marker style: {e}"))
        })
    }
}

fn default_size() -> f64 {
    DEFAULT_MARKER_SIZE
}

fn default_fill_color() -> Color {
    DEFAULT_FILL_COLOR
}

fn default_fill_highlight_color() -> Color {
    DEFAULT_FILL_HIGHLIGHT_COLOR
}

fn default_stroke_color() -> Color {
    DEFAULT_STROKE_COLOR
}

fn default_visible() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::MarkerStyle;
    use crate::marker::MarkerShape;
    use crate::render::Color;

    #[test]
    fn empty_json_yields_defaults() {
        let style = MarkerStyle::from_json_str("{}").expect("defaults");
        assert_eq!(style, MarkerStyle::default());
    }

    #[test]
    fn default_stroke_is_opaque_black() {
        assert_eq!(MarkerStyle::default().stroke_color, Color::rgba(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn unknown_shape_name_fails_to_parse() {
        let err = MarkerStyle::from_json_str(r#"{"shape":"hexagon"}"#).expect_err("bad shape");
        assert!(err.to_string().contains("hexagon"));
    }

    #[test]
    fn negative_size_is_rejected() {
        assert!(MarkerStyle::default().with_size(-1.0).validate().is_err());
    }

    #[test]
    fn json_round_trip_keeps_shape() {
        let style = MarkerStyle::default().with_shape(MarkerShape::Cross).with_visible(false);
        let json = style.to_json_pretty().expect("serialize");
        assert_eq!(MarkerStyle::from_json_str(&json).expect("parse"), style);
    }
}
