//! compound-chart: hoverable chart markers and validated compound records.
//!
//! Markers are plain data objects owned by a `MarkerLayer`, which maps
//! samples to canvas coordinates, routes pointer hover, and emits
//! backend-agnostic render frames. Compound definitions are registry records
//! with a one-shot validation pass.

pub mod api;
pub mod compound;
pub mod core;
pub mod error;
pub mod interaction;
pub mod marker;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{MarkerLayer, MarkerLayerConfig};
pub use compound::CompoundDefinition;
pub use error::{ChartError, ChartResult};
pub use marker::{ChartMarker, MarkerShape};
