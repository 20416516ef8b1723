//! Shared types: point sets, extents, errors, pixel math and the tracing context.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
pub(crate) mod trace;
