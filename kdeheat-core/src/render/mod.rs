//! Turning density fields into pixels.
//!
//! `pipeline` is the entry point; the other modules are its colormap, resampling and raster
//! stages.

pub(crate) mod colormap;
pub(crate) mod pipeline;
pub(crate) mod raster;
pub(crate) mod resample;
