//! Frame drawing: full and incremental repaints.

pub mod renderer;
