//! Workspace config file source: shallow.toml and config/shallow.{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Base config file name under the workspace root.
pub const CONFIG_FILE_NAME: &str = "shallow.toml";

/// Add workspace config files to builder.
/// Precedence: shallow.toml (base) then config/shallow.{SHALLOW_ENV}.toml (env-specific).
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = workspace_root.join(CONFIG_FILE_NAME);
    if base_config_path.exists() {
        debug!(config_path = %base_config_path.display(), "Adding workspace config file");
        builder = builder.add_source(File::from(base_config_path).required(false));
    }

    if let Ok(env_name) = std::env::var("SHALLOW_ENV") {
        let env_config_path = workspace_root
            .join("config")
            .join(format!("shallow.{}.toml", env_name));
        if env_config_path.exists() {
            debug!(config_path = %env_config_path.display(), "Adding environment config file");
            builder = builder.add_source(File::from(env_config_path).required(false));
        }
    }

    Ok(builder)
}
