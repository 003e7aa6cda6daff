pub mod scaffold_config;
pub mod sources;
pub mod validation;

pub use scaffold_config::*;
pub use sources::*;
pub use validation::*;
