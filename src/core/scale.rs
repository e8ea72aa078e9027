use serde::{Deserialize, Serialize};

use crate::core::types::{DataPoint, Point, Viewport};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinearScale")]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

#[derive(Deserialize)]
struct RawLinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl TryFrom<RawLinearScale> for LinearScale {
    type Error = ChartError;

    fn try_from(raw: RawLinearScale) -> ChartResult<Self> {
        Self::new(raw.domain_start, raw.domain_end)
    }
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps `value` onto `[0, extent_px]`. Values outside the domain map
    /// outside the extent; clipping is left to the canvas.
    pub fn domain_to_pixel(self, value: f64, extent_px: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * extent_px)
    }

    pub fn pixel_to_domain(self, pixel: f64, extent_px: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        if !extent_px.is_finite() || extent_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "pixel extent must be finite and > 0".to_owned(),
            ));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / extent_px;
        Ok(self.domain_start + normalized * span)
    }
}

/// Axis pair used by a marker owner to turn samples into canvas coordinates.
///
/// The vertical axis grows upwards in domain space and downwards in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl PlotScales {
    pub fn new(x_domain: (f64, f64), y_domain: (f64, f64)) -> ChartResult<Self> {
        Ok(Self {
            x: LinearScale::new(x_domain.0, x_domain.1)?,
            y: LinearScale::new(y_domain.0, y_domain.1)?,
        })
    }

    pub fn project(self, value: DataPoint, viewport: Viewport) -> ChartResult<Point> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let x = self.x.domain_to_pixel(value.x, width)?;
        let y = height - self.y.domain_to_pixel(value.y, height)?;
        Ok(Point::new(x, y))
    }

    pub fn unproject(self, point: Point, viewport: Viewport) -> ChartResult<DataPoint> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let x = self.x.pixel_to_domain(point.x, width)?;
        let y = self.y.pixel_to_domain(height - point.y, height)?;
        Ok(DataPoint::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{LinearScale, PlotScales};
    use crate::core::{DataPoint, Point, Viewport};

    #[test]
    fn linear_scale_rejects_degenerate_domain() {
        assert!(LinearScale::new(3.0, 3.0).is_err());
        assert!(LinearScale::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn deserializing_degenerate_scale_fails() {
        let json = r#"{"x":{"domain_start":3.0,"domain_end":3.0},"y":{"domain_start":0.0,"domain_end":1.0}}"#;
        let err = serde_json::from_str::<PlotScales>(json).expect_err("degenerate x domain");
        assert!(err.to_string().contains("non-zero"));

        let scales: PlotScales = serde_json::from_str(
            r#"{"x":{"domain_start":0.0,"domain_end":2.0},"y":{"domain_start":0.0,"domain_end":1.0}}"#,
        )
        .expect("valid scales");
        assert_eq!(scales, PlotScales::new((0.0, 2.0), (0.0, 1.0)).expect("scales"));
    }

    #[test]
    fn plot_scales_flip_vertical_axis() {
        let scales = PlotScales::new((0.0, 10.0), (0.0, 100.0)).expect("scales");
        let viewport = Viewport::new(200, 400);

        let bottom_left = scales
            .project(DataPoint::new(0.0, 0.0), viewport)
            .expect("project");
        let top_right = scales
            .project(DataPoint::new(10.0, 100.0), viewport)
            .expect("project");

        assert_eq!(bottom_left, Point::new(0.0, 400.0));
        assert_eq!(top_right, Point::new(200.0, 0.0));
    }

    #[test]
    fn plot_scales_unproject_inverts_project() {
        let scales = PlotScales::new((-5.0, 5.0), (10.0, 20.0)).expect("scales");
        let viewport = Viewport::new(640, 480);
        let value = DataPoint::new(1.25, 17.5);

        let point = scales.project(value, viewport).expect("project");
        let back = scales.unproject(point, viewport).expect("unproject");

        assert_relative_eq!(back.x, value.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, value.y, epsilon = 1e-9);
    }

    #[test]
    fn plot_scales_reject_invalid_viewport() {
        let scales = PlotScales::new((0.0, 1.0), (0.0, 1.0)).expect("scales");
        assert!(scales.project(DataPoint::new(0.5, 0.5), Viewport::new(0, 10)).is_err());
    }
}
