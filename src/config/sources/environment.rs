//! Environment source: `KIPYGEN__VALIDATOR__TIMEOUT_MS=500` sets `validator.timeout_ms`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("KIPYGEN")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
