use std::fmt;

use tracing::warn;

use crate::core::{DataPoint, Point, Rect};
use crate::interaction::HoverState;
use crate::marker::{MarkerShape, MarkerStyle};
use crate::render::{Color, DiscPrimitive, RenderFrame, TexturePrimitive};

/// Extra hit-test margin around the drawn glyph.
pub const HOVER_PADDING: f64 = 10.0;

/// How far a hovered cross glyph moves toward white.
pub const HOVER_LIGHTEN_AMOUNT: f64 = 0.5;

/// One `(x, y)` data sample drawn as a hoverable glyph.
///
/// The marker does not map its value onto the canvas itself: the owner
/// computes `coordinate` from `value` and pushes it with `set_coordinate`
/// whenever its scales change. The bounding box is always
/// `(size + HOVER_PADDING)` square and centered on `coordinate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMarker {
    value: DataPoint,
    coordinate: Point,
    size: f64,
    bounds: Rect,
    shape: MarkerShape,
    fill_color: Color,
    fill_highlight_color: Color,
    stroke_color: Color,
    visible: bool,
    hover: HoverState,
    repaint_requested: bool,
}

impl Default for ChartMarker {
    fn default() -> Self {
        Self::from_style(DataPoint::default(), &MarkerStyle::default())
    }
}

impl ChartMarker {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self::from_style(DataPoint::new(x, y), &MarkerStyle::default())
    }

    #[must_use]
    pub fn from_style(value: DataPoint, style: &MarkerStyle) -> Self {
        let mut marker = Self {
            value,
            coordinate: Point::default(),
            size: 0.0,
            bounds: Rect::default(),
            shape: style.shape,
            fill_color: style.fill_color,
            fill_highlight_color: style.fill_highlight_color,
            stroke_color: style.stroke_color,
            visible: style.visible,
            hover: HoverState::Normal,
            repaint_requested: false,
        };
        marker.set_size(style.size);
        marker.repaint_requested = false;
        marker
    }

    #[must_use]
    pub fn value(&self) -> DataPoint {
        self.value
    }

    pub fn set_value(&mut self, x: f64, y: f64) {
        self.value = DataPoint::new(x, y);
    }

    #[must_use]
    pub fn coordinate(&self) -> Point {
        self.coordinate
    }

    pub fn set_coordinate(&mut self, coordinate: Point) {
        self.repaint_requested |= self.coordinate != coordinate;
        self.coordinate = coordinate;
        self.bounds = Rect::centered_on(coordinate, self.bounds.width, self.bounds.height);
    }

    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Sets the glyph diameter. Negative or non-finite sizes clamp to zero.
    pub fn set_size(&mut self, size: f64) {
        let size = if size.is_finite() && size >= 0.0 {
            size
        } else {
            warn!(size, "marker size out of range, clamping to 0");
            0.0
        };

        self.repaint_requested |= self.size != size;
        self.size = size;
        let extent = size + HOVER_PADDING;
        self.bounds = Rect::centered_on(self.coordinate, extent, extent);
    }

    #[must_use]
    pub fn bounding_size(&self) -> (f64, f64) {
        (self.bounds.width, self.bounds.height)
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether `point` falls inside the padded hover box. Hidden markers
    /// still report hits.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    #[must_use]
    pub fn shape(&self) -> MarkerShape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: MarkerShape) {
        self.repaint_requested |= self.shape != shape;
        self.shape = shape;
    }

    #[must_use]
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.repaint_requested |= self.fill_color != color;
        self.fill_color = color;
    }

    #[must_use]
    pub fn fill_highlight_color(&self) -> Color {
        self.fill_highlight_color
    }

    pub fn set_fill_highlight_color(&mut self, color: Color) {
        self.repaint_requested |= self.fill_highlight_color != color;
        self.fill_highlight_color = color;
    }

    #[must_use]
    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.repaint_requested |= self.stroke_color != color;
        self.stroke_color = color;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.repaint_requested |= self.visible != visible;
        self.visible = visible;
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hover == HoverState::Hovered
    }

    pub fn on_pointer_enter(&mut self) {
        self.hover = HoverState::Hovered;
        self.repaint_requested = true;
    }

    pub fn on_pointer_leave(&mut self) {
        self.hover = HoverState::Normal;
        self.repaint_requested = true;
    }

    /// Returns whether a repaint was requested since the last call. Hover
    /// changes and any setter that changes how the marker looks raise it.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    /// Appends this marker's primitives to `frame`.
    pub fn draw(&self, frame: &mut RenderFrame) {
        if !self.visible {
            return;
        }

        let center = self.bounds.center();
        let glyph_rect = Rect::centered_on(center, self.size, self.size);

        match self.shape {
            MarkerShape::Circle => {
                let fill = match self.hover {
                    HoverState::Hovered => self.fill_highlight_color,
                    HoverState::Normal => self.fill_color,
                };
                frame.push_disc(DiscPrimitive::new(center, self.size / 2.0, fill));
                frame.push_texture(TexturePrimitive::new(
                    self.shape.glyph(),
                    glyph_rect,
                    self.stroke_color,
                ));
            }
            MarkerShape::Cross => {
                let tint = match self.hover {
                    HoverState::Hovered => self.stroke_color.lightened(HOVER_LIGHTEN_AMOUNT),
                    HoverState::Normal => self.stroke_color,
                };
                frame.push_texture(TexturePrimitive::new(self.shape.glyph(), glyph_rect, tint));
            }
        }
    }
}

impl fmt::Display for ChartMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value: {} Coord: {}", self.value, self.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartMarker;
    use crate::core::{Point, Viewport};
    use crate::marker::MarkerShape;
    use crate::render::{Color, RenderFrame};

    #[test]
    fn default_marker_matches_stock_style() {
        let marker = ChartMarker::default();
        assert_eq!(marker.size(), 7.0);
        assert_eq!(marker.bounding_size(), (17.0, 17.0));
        assert!(marker.is_visible());
        assert!(!marker.is_hovered());
    }

    #[test]
    fn resizing_keeps_box_centered() {
        let mut marker = ChartMarker::new(1.0, 2.0);
        marker.set_coordinate(Point::new(50.0, 60.0));
        marker.set_size(20.0);
        assert_eq!(marker.bounds().center(), Point::new(50.0, 60.0));
        assert_eq!(marker.bounds().origin(), Point::new(35.0, 45.0));
    }

    #[test]
    fn nan_size_clamps_to_zero() {
        let mut marker = ChartMarker::default();
        marker.set_size(f64::NAN);
        assert_eq!(marker.size(), 0.0);
        assert_eq!(marker.bounding_size(), (10.0, 10.0));
    }

    #[test]
    fn repaint_request_is_consumed_once() {
        let mut marker = ChartMarker::default();
        assert!(!marker.take_repaint_request());
        marker.on_pointer_enter();
        assert!(marker.take_repaint_request());
        assert!(!marker.take_repaint_request());
    }

    #[test]
    fn visual_setters_request_repaint() {
        let mut marker = ChartMarker::default();
        assert!(!marker.take_repaint_request(), "fresh marker is clean");

        marker.set_visible(false);
        assert!(marker.take_repaint_request());
        marker.set_shape(MarkerShape::Cross);
        assert!(marker.take_repaint_request());
        marker.set_size(30.0);
        assert!(marker.take_repaint_request());
        marker.set_fill_color(Color::WHITE);
        assert!(marker.take_repaint_request());
        marker.set_fill_highlight_color(Color::WHITE);
        assert!(marker.take_repaint_request());
        marker.set_stroke_color(Color::WHITE);
        assert!(marker.take_repaint_request());
        marker.set_coordinate(Point::new(5.0, 5.0));
        assert!(marker.take_repaint_request());
    }

    #[test]
    fn unchanged_setters_do_not_request_repaint() {
        let mut marker = ChartMarker::default();
        marker.set_visible(true);
        marker.set_shape(MarkerShape::Circle);
        marker.set_size(7.0);
        marker.set_coordinate(Point::default());
        assert!(!marker.take_repaint_request());
    }

    #[test]
    fn display_combines_value_and_coordinate() {
        let mut marker = ChartMarker::new(3.0, 4.5);
        marker.set_coordinate(Point::new(120.0, 80.25));
        assert_eq!(marker.to_string(), "Value: (3, 4.5) Coord: (120, 80.25)");
    }

    #[test]
    fn zero_size_marker_still_emits_primitives() {
        let mut marker = ChartMarker::default();
        marker.set_size(0.0);
        let mut frame = RenderFrame::new(Viewport::new(10, 10));
        marker.draw(&mut frame);
        assert_eq!(frame.commands.len(), 2);
        frame.validate().expect("zero-size primitives are valid");
    }
}
