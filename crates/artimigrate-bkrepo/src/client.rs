//! BKRepo API client and methods

use std::time::Duration;

use artimigrate_api::path::encode_path;
use artimigrate_api::{
    Credentials,
    DestinationRepository,
    MigrationError,
    MigrationResult,
    UploadRequest,
    DEFAULT_CHUNK_SIZE,
};
use async_trait::async_trait;
use reqwest::{
    Body,
    Client,
    RequestBuilder,
};
use secrecy::ExposeSecret;

use crate::{
    headers,
    types,
};

/// Connection settings for one BKRepo instance
#[derive(Debug, Clone)]
pub struct BkRepoSettings {
    pub base_url: String,
    pub project: String,
    /// Generic repository receiving the nodes
    pub repository: String,
    /// Size of the chunks the upload body is streamed in
    pub chunk_size: usize,
    /// Cap on the existence query
    pub query_timeout: Option<Duration>,
}

impl BkRepoSettings {
    pub fn new(base_url: &str, project: &str, repository: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            project: project.to_string(),
            repository: repository.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            query_timeout: None,
        }
    }

    fn node_location(&self, normalized_path: &str) -> String {
        let path = encode_path(normalized_path);
        format!(
            "{}/{}/{}",
            urlencoding::encode(&self.project),
            urlencoding::encode(&self.repository),
            path
        )
    }

    fn query_url(&self, normalized_path: &str) -> String {
        format!(
            "{}/repository/api/node/{}",
            self.base_url,
            self.node_location(normalized_path)
        )
    }

    fn upload_url(&self, normalized_path: &str) -> String {
        format!(
            "{}/generic/{}",
            self.base_url,
            self.node_location(normalized_path)
        )
    }
}

pub struct BkRepoClient {
    client: Client,
    settings: BkRepoSettings,
}

impl BkRepoClient {
    pub fn new(client: Client, settings: BkRepoSettings) -> Self {
        Self { client, settings }
    }

    fn authorized(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request.basic_auth(
            &credentials.username,
            Some(credentials.password.expose_secret()),
        )
    }
}

#[async_trait]
impl DestinationRepository for BkRepoClient {
    async fn query_node_size(
        &self, normalized_path: &str, credentials: &Credentials,
    ) -> MigrationResult<u64> {
        let url = self.settings.query_url(normalized_path);
        let mut request = Self::authorized(self.client.get(&url), credentials);
        if let Some(timeout) = self.settings.query_timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MigrationError::api(status.as_u16(), &body));
        }

        let response: types::NodeQueryResponse = response.json().await?;
        response.into_size()
    }

    async fn upload(&self, request: UploadRequest) -> MigrationResult<()> {
        let UploadRequest {
            normalized_path,
            size,
            properties,
            content,
            credentials,
        } = request;

        let headers = headers::upload_headers(&properties, size)?;
        let url = self.settings.upload_url(&normalized_path);
        tracing::debug!(%url, size, "Uploading node");

        let body = Body::wrap_stream(content.chunked(self.settings.chunk_size));
        let response = Self::authorized(self.client.put(&url), &credentials)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(MigrationError::api(status.as_u16(), &body))
        }
    }
}
