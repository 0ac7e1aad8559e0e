pub mod curve;
pub mod path;

pub use curve::{Arc, BezierSeed, Circle, Curve, Line};
pub use path::{Path, PathKind};
