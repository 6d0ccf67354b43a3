mod allow_list;
mod interpolation;
mod loader;
mod schema;
mod validation;

pub use allow_list::AllowList;
pub use interpolation::{
    interpolate,
    interpolate_toml,
    interpolate_with,
    InterpolationError,
    InterpolationResult,
};
pub use loader::{
    ConfigLoadError,
    ConfigLoadResult,
    ConfigLoader,
    DEFAULT_CONFIG_FILE,
};
pub use schema::{
    DestinationEndpoint,
    Environment,
    EnvironmentConfig,
    MigrationConfig,
    MigrationSettings,
    SourceEndpoint,
};
pub use validation::{
    ConfigError,
    ValidationResult,
};
