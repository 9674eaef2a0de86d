mod defaults;
mod loader;
mod types;
mod validation;

pub use loader::{load_config, load_config_file, CONFIG_SECTION};
pub use types::*;
pub use validation::validate_config;
