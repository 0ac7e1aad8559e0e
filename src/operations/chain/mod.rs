//! Chain discovery: ordering connected paths into open or endless chains.

mod find;
mod loops;
mod points;
mod types;

pub use find::FindChains;
pub use loops::{FindLoops, Loop};
pub use points::{is_chain_clockwise, path_key_points};
pub use types::{Chain, ChainLink, ChainSet, ContainOptions, FindChainsOptions};
