mod layer_config;
mod marker_layer;

pub use layer_config::MarkerLayerConfig;
pub use marker_layer::{MarkerLayer, MarkerMut};
