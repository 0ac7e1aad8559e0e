mod break_path;
mod dead_ends;

pub use break_path::break_at_point;
pub use dead_ends::{RemoveDeadEnds, RemovedPath};
