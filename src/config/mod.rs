pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::load_config_auto;
pub use schema::{Config, HomebrewConfig, NodeConfig, ToolConfig};
pub use validator::validate_config;
