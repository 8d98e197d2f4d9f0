//! CLI command handlers. Each command is in its own file.

mod config_path;
mod fetch;
mod platforms;

pub use config_path::run_config_path;
pub use fetch::run_fetch;
pub use platforms::run_platforms;
