use std::time::Duration;

use artimigrate_api::{
    MigrationError,
    MigrationResult,
};
use reqwest::Client;

use crate::config::MigrationSettings;

/// Installs the process-wide rustls crypto provider; repeated calls are
/// harmless
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Builds the HTTP client shared by the source and destination clients.
///
/// Only connection setup is bounded here unless `timeout_secs` is set;
/// queries carry their own timeout and content streams an idle timeout.
pub fn build_client(settings: &MigrationSettings) -> MigrationResult<Client> {
    let mut builder = Client::builder()
        .user_agent(concat!("artimigrate/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs));

    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| MigrationError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))
}
