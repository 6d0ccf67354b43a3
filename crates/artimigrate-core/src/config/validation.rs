use super::schema::{
    Environment,
    MigrationConfig,
};

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigError>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct ConfigError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl MigrationConfig {
    /// Checks the settings a run against `environment` depends on
    pub fn validate(&self, environment: Environment) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.migration.chunk_size == 0 {
            result.add_error("migration.chunk_size", "must be greater than zero");
        }
        if self.migration.prefix_root.trim_matches('/').is_empty() {
            result.add_error("migration.prefix_root", "must not be empty");
        }

        let prefix = format!("environments.{}", environment);
        let Some(endpoints) = self.environment(environment) else {
            result.add_error(prefix, "environment is not configured");
            return result;
        };

        check_url(&mut result, &format!("{prefix}.source.url"), &endpoints.source.url);
        check_url(
            &mut result,
            &format!("{prefix}.destination.url"),
            &endpoints.destination.url,
        );

        if endpoints.source.repository.trim().is_empty() {
            result.add_error(format!("{prefix}.source.repository"), "must not be empty");
        }
        if endpoints.source.username.trim().is_empty() {
            result.add_error(format!("{prefix}.source.username"), "must not be empty");
        }
        if endpoints.destination.repository.trim().is_empty() {
            result.add_error(
                format!("{prefix}.destination.repository"),
                "must not be empty",
            );
        }

        result
    }
}

fn check_url(result: &mut ValidationResult, field: &str, url: &str) {
    if url.trim().is_empty() {
        result.add_error(field, "must not be empty");
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        result.add_error(field, format!("must be an http(s) URL, got {url:?}"));
    }
}
