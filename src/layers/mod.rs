pub mod marker;
pub mod vector;

pub use marker::{MarkerMode, MarkerStyle, MarkerTrace};
pub use vector::{build_layers, LayerDescriptor, LayerStyle, LayerStyleOverrides, LayerType};
