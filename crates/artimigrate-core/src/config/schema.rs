use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use artimigrate_api::DEFAULT_CHUNK_SIZE;
use serde::Deserialize;

pub(super) const DEFAULT_PREFIX_ROOT: &str = "bk-custom";

pub(super) const DEFAULT_DESTINATION_REPOSITORY: &str = "custom";

pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 0;

pub(super) const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 300;

pub(super) const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 60;

pub(super) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Deployment whose endpoints a run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    #[default]
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            _ => Err(format!(
                "Unknown environment: {}. Valid options: dev, prod",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MigrationConfig {
    #[serde(default)]
    pub migration: MigrationSettings,

    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

impl MigrationConfig {
    pub fn environment(&self, environment: Environment) -> Option<&EnvironmentConfig> {
        self.environments.get(environment.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MigrationSettings {
    /// Root of the source project prefix; the project name is appended
    #[serde(default = "default_prefix_root")]
    pub prefix_root: String,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Whole-request timeout applied to every request, transfers included.
    /// `0` (the default) disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Timeout of listing, property and existence queries, `0` disables it
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// Longest pause between two chunks of a node's content, `0` disables it
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            prefix_root: default_prefix_root(),
            chunk_size: default_chunk_size(),
            timeout_secs: default_timeout_secs(),
            query_timeout_secs: default_query_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl MigrationSettings {
    /// Source path prefix of a project, e.g. `bk-custom/proj1`
    pub fn project_prefix(&self, project: &str) -> String {
        format!("{}/{}", self.prefix_root.trim_end_matches('/'), project)
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.query_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.idle_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.timeout_secs)
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentConfig {
    pub source: SourceEndpoint,
    pub destination: DestinationEndpoint,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceEndpoint {
    pub url: String,
    pub repository: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationEndpoint {
    pub url: String,
    #[serde(default = "default_destination_repository")]
    pub repository: String,
}

fn default_prefix_root() -> String {
    DEFAULT_PREFIX_ROOT.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_query_timeout_secs() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

fn default_idle_timeout_secs() -> u64 {
    DEFAULT_IDLE_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_destination_repository() -> String {
    DEFAULT_DESTINATION_REPOSITORY.to_string()
}
