//! Boolean combination of models.
//!
//! The pipeline runs split, classify, select, and rebuild; see [`Combine`].

mod classify;
mod engine;
mod select;
mod split;

pub use classify::{is_point_inside_model, ContainmentOptions, PointClassification, PointContainment};
pub use engine::{Combine, CombineOptions, CombineResult, DeletedPath};
pub use select::{
    should_keep_fragment, should_keep_shared, BooleanOp, CombineFlags, DeleteReason, KeepDecision, SharedSide,
};
pub use split::{Fragment, ModelSource};
