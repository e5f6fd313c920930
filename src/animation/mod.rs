pub mod controls;
pub mod sequence;

// Re-export commonly used types and functions for convenience
pub use controls::{PlaybackMenu, Slider, SliderStep, TimelineControls};
pub use sequence::{animate, group_indices, AnimationSequence, Frame};
