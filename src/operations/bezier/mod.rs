//! Bezier-to-arc approximation.

mod approximate;

pub use approximate::{BezierPiece, BezierToArcs};
