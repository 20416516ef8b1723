//! Inputs read from disk: coordinate JSON and raster images.

pub(crate) mod decode;
pub(crate) mod points;
