use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    BacktestConfig, CatalogConfig, GatewayConfig, LoggingConfig, SameSubjectPolicy,
    SessionConfig, Settings,
};

/// The file looked up when no explicit path is given. Its absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "quantdash.toml";

/// Prefix for environment overrides, e.g. `QUANTDASH__GATEWAY__BASE_URL`.
pub const ENV_PREFIX: &str = "QUANTDASH";

/// Loads the application configuration.
///
/// Sources are layered lowest to highest: built-in defaults, the TOML file, then
/// `QUANTDASH__SECTION__KEY` environment variables. An explicitly requested file must
/// exist; the default `quantdash.toml` is optional. The result is validated before it
/// is returned.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_layered(path, environment())
}

/// The `QUANTDASH__` environment source. List settings take comma-separated values,
/// e.g. `QUANTDASH__CATALOG__PRIORITY=NDQ.AX,COIN`.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("catalog.priority")
}

fn load_layered(
    path: Option<&Path>,
    environment: config::Environment,
) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
