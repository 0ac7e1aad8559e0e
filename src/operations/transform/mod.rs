mod mirror;
mod rotate;
mod scale;
mod translate;

pub use mirror::Mirror;
pub use rotate::Rotate;
pub use scale::{scaled_path, ConvertUnits, Scale};
pub use translate::{flattened, moved_path, Translate};
