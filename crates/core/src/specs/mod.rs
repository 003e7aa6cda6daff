pub mod manifest;
pub mod model;
pub mod policy;

pub use manifest::{Manifest, ModelEntry};
pub use model::{ModelRegistry, ModelSpec};
pub use policy::{PolicyRegistry, PolicySpec};
