pub mod scale;
pub mod types;

pub use scale::{LinearScale, PlotScales};
pub use types::{DataPoint, MarkerId, Point, Rect, Viewport};
