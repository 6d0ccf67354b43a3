use artimigrate_api::{
    Credentials,
    MigrationError,
    MigrationResult,
};
use artimigrate_bkrepo::{
    BkRepoClient,
    BkRepoSettings,
};
use artimigrate_jfrog::{
    JfrogClient,
    JfrogSettings,
};
use reqwest::Client;

use crate::config::{
    AllowList,
    Environment,
    EnvironmentConfig,
    MigrationConfig,
    MigrationSettings,
};

/// Per-run options chosen on the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub project: String,
    pub environment: Environment,
    pub overwrite: bool,
    /// Nodes in flight at once; 1 keeps the run strictly sequential
    pub jobs: usize,
}

/// Immutable description of one run, built once at startup and passed by
/// reference to every component
#[derive(Debug, Clone)]
pub struct MigrationContext {
    pub project: String,
    pub environment: Environment,
    pub overwrite: bool,
    pub jobs: usize,
    pub settings: MigrationSettings,
    pub endpoints: EnvironmentConfig,
    pub allow_list: AllowList,
}

impl MigrationContext {
    pub fn new(
        options: RunOptions, config: MigrationConfig, allow_list: AllowList,
    ) -> MigrationResult<Self> {
        if options.project.trim().is_empty() {
            return Err(MigrationError::InvalidConfig(
                "project must not be empty".to_string(),
            ));
        }
        if options.jobs == 0 {
            return Err(MigrationError::InvalidConfig(
                "jobs must be at least 1".to_string(),
            ));
        }

        let validation = config.validate(options.environment);
        if !validation.is_ok() {
            return Err(MigrationError::InvalidConfig(validation.summary()));
        }

        let MigrationConfig {
            migration,
            mut environments,
        } = config;
        let endpoints = environments
            .remove(options.environment.as_str())
            .ok_or_else(|| {
                MigrationError::InvalidConfig(format!(
                    "environment {} is not configured",
                    options.environment
                ))
            })?;

        Ok(Self {
            project: options.project,
            environment: options.environment,
            overwrite: options.overwrite,
            jobs: options.jobs,
            settings: migration,
            endpoints,
            allow_list,
        })
    }

    /// Source path prefix stripped from every node, e.g. `bk-custom/proj1`
    pub fn project_prefix(&self) -> String {
        self.settings.project_prefix(&self.project)
    }

    /// Destination location shown in logs, e.g. `proj1/custom`
    pub fn destination_label(&self) -> String {
        format!("{}/{}", self.project, self.endpoints.destination.repository)
    }

    pub fn source_client(&self, client: Client) -> JfrogClient {
        let source = &self.endpoints.source;
        JfrogClient::new(
            client,
            JfrogSettings {
                base_url: source.url.clone(),
                repository: source.repository.clone(),
                scope: self.project_prefix(),
                credentials: Credentials::new(source.username.clone(), source.password.clone()),
                query_timeout: self.settings.query_timeout(),
                idle_timeout: self.settings.idle_timeout(),
            },
        )
    }

    pub fn destination_client(&self, client: Client) -> BkRepoClient {
        let destination = &self.endpoints.destination;
        let mut settings =
            BkRepoSettings::new(&destination.url, &self.project, &destination.repository);
        settings.chunk_size = self.settings.chunk_size;
        settings.query_timeout = self.settings.query_timeout();
        BkRepoClient::new(client, settings)
    }
}
