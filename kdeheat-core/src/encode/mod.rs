//! File outputs: atomic image writes and animated GIF assembly.

pub(crate) mod gif;
pub(crate) mod output;
