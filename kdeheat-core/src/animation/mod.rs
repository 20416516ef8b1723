//! Multi-frame heatmap animations.

pub(crate) mod sequence;
