use serde::{Deserialize, Serialize};

use crate::core::{PlotScales, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::marker::MarkerStyle;

/// Public marker layer bootstrap configuration.
///
/// Serializable so host applications can persist/load the layer setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayerConfig {
    pub viewport: Viewport,
    pub x_start: f64,
    pub x_end: f64,
    #[serde(default = "default_y_min")]
    pub y_min: f64,
    #[serde(default = "default_y_max")]
    pub y_max: f64,
    #[serde(default)]
    pub marker_style: MarkerStyle,
}

impl MarkerLayerConfig {
    /// Creates a minimal config with a unit vertical domain.
    #[must_use]
    pub fn new(viewport: Viewport, x_start: f64, x_end: f64) -> Self {
        Self {
            viewport,
            x_start,
            x_end,
            y_min: default_y_min(),
            y_max: default_y_max(),
            marker_style: MarkerStyle::default(),
        }
    }

    #[must_use]
    pub fn with_y_domain(mut self, y_min: f64, y_max: f64) -> Self {
        self.y_min = y_min;
        self.y_max = y_max;
        self
    }

    /// Style applied to markers added without an explicit one.
    #[must_use]
    pub fn with_marker_style(mut self, style: MarkerStyle) -> Self {
        self.marker_style = style;
        self
    }

    pub fn scales(&self) -> ChartResult<PlotScales> {
        PlotScales::new((self.x_start, self.x_end), (self.y_min, self.y_max))
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.scales()?;
        self.marker_style.validate()?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse marker layer config: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize marker layer config: {e}"))
        })
    }
}

fn default_y_min() -> f64 {
    0.0
}

fn default_y_max() -> f64 {
    1.0
}
