//! Hoverable chart markers.

mod chart_marker;
mod shape;
mod style;

pub use chart_marker::{ChartMarker, HOVER_LIGHTEN_AMOUNT, HOVER_PADDING};
pub use shape::MarkerShape;
pub use style::{
    DEFAULT_FILL_COLOR, DEFAULT_FILL_HIGHLIGHT_COLOR, DEFAULT_MARKER_SIZE, DEFAULT_STROKE_COLOR,
    MarkerStyle,
};
