pub mod bezier;
pub mod boolean;
pub mod chain;
pub mod fillet;
pub mod intersect;
pub mod modification;
pub mod query;
pub mod transform;
