//! Configuration loading facade

use super::merge::merge_policy;
use super::sources::{environment, workspace_file};
use super::ShallowConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Loads [`ShallowConfig`] from layered sources
///
/// Precedence (lowest to highest): defaults, `<root>/shallow.toml`,
/// `<root>/config/shallow.{SHALLOW_ENV}.toml`, `SHALLOW__*` environment variables.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace root
    pub fn load(workspace_root: &Path) -> Result<ShallowConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: ShallowConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from a single file on top of the defaults
    pub fn load_file(path: &Path) -> Result<ShallowConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    /// Default configuration without reading any source
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> ShallowConfig {
        ShallowConfig::default()
    }
}
