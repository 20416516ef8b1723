//! Alpha compositing, cropping and resizing of rendered frames.

pub(crate) mod composite;
