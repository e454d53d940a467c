// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{FinancialSettings, ForecastSettings, InventorySettings, Settings};

/// Loads the engine settings from an optional `meridian.toml` file.
///
/// Every knob has a default that matches the published behavior of the
/// engines, so a missing file (or a file with only some sections) is not an
/// error — deployments only write the file when they need to deviate.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `meridian.toml`.
        .add_source(config::File::with_name("meridian").required(false))
        .build()?;

    // Attempt to deserialize the configuration into our `Settings` struct;
    // omitted sections fall back to their Default impls.
    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}
