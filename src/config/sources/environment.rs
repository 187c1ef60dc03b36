//! Environment variable source: SHALLOW__SECTION__KEY

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "SHALLOW";

/// Add environment overrides to builder, e.g. `SHALLOW__RENDERER__BUFFER_CAPACITY=32`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
