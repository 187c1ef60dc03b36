//! Merge rules: defaults, override order, conflict handling.

use crate::render::DEFAULT_BUFFER_CAPACITY;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("placeholder.style", "element")?
        .set_default("placeholder.namespace", "shallow")?
        .set_default("renderer.buffer_capacity", DEFAULT_BUFFER_CAPACITY as u64)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
