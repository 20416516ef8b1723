//! Point-cloud motion between animation frames.

pub(crate) mod walk;
