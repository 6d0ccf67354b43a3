//! Artifactory API client and methods

use artimigrate_api::path::encode_path;
use artimigrate_api::{
    collapse_properties,
    ContentStream,
    Credentials,
    MigrationError,
    MigrationResult,
    Node,
    NodeDescriptor,
    NodeSelector,
    Properties,
    SourceRepository,
};
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::{
    Client,
    RequestBuilder,
    Response,
};
use secrecy::ExposeSecret;

use crate::{
    aql,
    types,
};

/// Connection settings for one Artifactory instance
#[derive(Debug)]
pub struct JfrogSettings {
    pub base_url: String,
    /// Repository holding the migrated nodes
    pub repository: String,
    /// Project prefix that scopes unrestricted queries, e.g. `bk-custom/proj1`
    pub scope: String,
    pub credentials: Credentials,
    /// Cap on listing and property requests
    pub query_timeout: Option<Duration>,
    /// Longest pause tolerated between two content chunks
    pub idle_timeout: Option<Duration>,
}

impl JfrogSettings {
    fn aql_url(&self) -> String {
        format!("{}/api/search/aql", self.base_url)
    }

    fn repository_of<'a>(&'a self, node: &'a Node) -> &'a str {
        node.repo.as_deref().unwrap_or(&self.repository)
    }

    fn download_url(&self, node: &Node) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            encode_path(self.repository_of(node)),
            encode_path(&format!("{}/{}", node.source_path, node.name))
        )
    }

    fn properties_url(&self, node: &Node) -> String {
        format!(
            "{}/api/storage/{}/{}?properties",
            self.base_url,
            encode_path(self.repository_of(node)),
            encode_path(&format!("{}/{}", node.source_path, node.name))
        )
    }
}

pub struct JfrogClient {
    client: Client,
    settings: JfrogSettings,
}

impl JfrogClient {
    pub fn new(client: Client, settings: JfrogSettings) -> Self {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Self {
            client,
            settings: JfrogSettings {
                base_url,
                ..settings
            },
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let credentials = &self.settings.credentials;
        request.basic_auth(
            &credentials.username,
            Some(credentials.password.expose_secret()),
        )
    }

    fn query(&self, request: RequestBuilder) -> RequestBuilder {
        let request = self.authorized(request);
        match self.settings.query_timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    async fn ensure_success(response: Response) -> MigrationResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(MigrationError::api(status.as_u16(), &body))
    }
}

#[async_trait]
impl SourceRepository for JfrogClient {
    async fn query_nodes(&self, selector: &NodeSelector) -> MigrationResult<Vec<NodeDescriptor>> {
        let query = aql::build_query(&self.settings.repository, &self.settings.scope, selector);
        tracing::debug!(%selector, %query, "Running AQL query");

        let response = self
            .query(self.client.post(self.settings.aql_url()))
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(query)
            .send()
            .await?;

        let response: types::AqlResponse = Self::ensure_success(response).await?.json().await?;
        Ok(response.results)
    }

    async fn fetch_properties(&self, node: &Node) -> MigrationResult<Properties> {
        let response = self
            .query(self.client.get(self.settings.properties_url(node)))
            .send()
            .await?;

        let storage: types::StorageProperties = Self::ensure_success(response).await?.json().await?;
        Ok(collapse_properties(&storage.properties))
    }

    async fn open_content(&self, node: &Node) -> MigrationResult<ContentStream> {
        let response = self
            .authorized(self.client.get(self.settings.download_url(node)))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let content = ContentStream::new(response.bytes_stream().map_err(MigrationError::from));
        Ok(match self.settings.idle_timeout {
            Some(idle) => content.with_idle_timeout(idle),
            None => content,
        })
    }
}

#[cfg(test)]
mod tests {
    use artimigrate_api::testing::{
        CannedResponse,
        TestServer,
    };

    use super::*;

    fn settings() -> JfrogSettings {
        JfrogSettings {
            base_url: "https://jfrog.example.com/artifactory".to_string(),
            repository: "generic-local".to_string(),
            scope: "bk-custom/proj1".to_string(),
            credentials: Credentials::new("reader", "secret"),
            query_timeout: None,
            idle_timeout: None,
        }
    }

    fn node(repo: Option<&str>) -> Node {
        Node::new(
            NodeDescriptor {
                repo: repo.map(str::to_string),
                path: "bk-custom/proj1/a b".to_string(),
                name: "c.bin".to_string(),
                size: 1,
                created_by: "u".to_string(),
            },
            "bk-custom/proj1",
        )
    }

    #[test]
    fn test_aql_url() {
        assert_eq!(
            settings().aql_url(),
            "https://jfrog.example.com/artifactory/api/search/aql"
        );
    }

    #[test]
    fn test_download_url() {
        assert_eq!(
            settings().download_url(&node(None)),
            "https://jfrog.example.com/artifactory/generic-local/bk-custom/proj1/a%20b/c.bin"
        );
    }

    #[test]
    fn test_properties_url_prefers_node_repository() {
        assert_eq!(
            settings().properties_url(&node(Some("other-local"))),
            "https://jfrog.example.com/artifactory/api/storage/other-local/bk-custom/proj1/a%20b/c.bin?properties"
        );
    }

    fn client_for(base_url: &str, idle_timeout: Option<Duration>) -> JfrogClient {
        let _ = rustls::crypto::ring::default_provider().install_default();
        JfrogClient::new(
            Client::builder().build().unwrap(),
            JfrogSettings {
                base_url: format!("{base_url}/artifactory/"),
                idle_timeout,
                ..settings()
            },
        )
    }

    async fn read_all(content: ContentStream) -> MigrationResult<Vec<u8>> {
        content
            .try_fold(Vec::new(), |mut body, chunk| async move {
                body.extend_from_slice(&chunk);
                Ok(body)
            })
            .await
    }

    #[tokio::test]
    async fn test_query_nodes_posts_plain_text_aql() {
        let server = TestServer::start(vec![CannedResponse::json(
            200,
            r#"{"results": [{"repo": "generic-local", "path": "bk-custom/proj1/a", "name": "c.bin", "size": 3, "created_by": "u"}]}"#,
        )])
        .await
        .unwrap();
        let client = client_for(&server.base_url, None);

        let nodes = client
            .query_nodes(&NodeSelector::Name("c.bin".to_string()))
            .await
            .unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "c.bin");

        let requests = server.requests();
        let request = &requests[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.target, "/artifactory/api/search/aql");
        assert_eq!(request.header("content-type"), Some("text/plain"));
        assert_eq!(
            request.header("authorization"),
            Some("Basic cmVhZGVyOnNlY3JldA==")
        );
        let body = String::from_utf8(request.body.clone()).unwrap();
        assert!(body.starts_with("items.find("));
        assert!(body.contains(r#""name":"c.bin""#));
    }

    #[tokio::test]
    async fn test_query_nodes_rejects_error_status() {
        let server = TestServer::start(vec![CannedResponse::json(500, "aql failed")])
            .await
            .unwrap();
        let client = client_for(&server.base_url, None);

        let err = client.query_nodes(&NodeSelector::All).await.unwrap_err();
        assert!(matches!(err, MigrationError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_fetch_properties_collapses_values() {
        let server = TestServer::start(vec![CannedResponse::json(
            200,
            r#"{"properties": {"k": ["v1", "v2"], "empty": []}}"#,
        )])
        .await
        .unwrap();
        let client = client_for(&server.base_url, None);

        let properties = client.fetch_properties(&node(None)).await.unwrap();

        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("k").map(String::as_str), Some("v1"));
        assert_eq!(
            server.requests()[0].target,
            "/artifactory/api/storage/generic-local/bk-custom/proj1/a%20b/c.bin?properties"
        );
    }

    #[tokio::test]
    async fn test_fetch_properties_fails_on_not_found() {
        let server = TestServer::start(vec![CannedResponse::json(404, r#"{"errors": []}"#)])
            .await
            .unwrap();
        let client = client_for(&server.base_url, None);

        let err = client.fetch_properties(&node(None)).await.unwrap_err();
        assert!(matches!(err, MigrationError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_open_content_streams_body() {
        let server = TestServer::start(vec![CannedResponse::bytes(200, b"payload")])
            .await
            .unwrap();
        let client = client_for(&server.base_url, Some(Duration::from_secs(5)));

        let content = client.open_content(&node(None)).await.unwrap();

        assert_eq!(read_all(content).await.unwrap(), b"payload");
        let requests = server.requests();
        let request = &requests[0];
        assert_eq!(request.method, "GET");
        assert_eq!(
            request.target,
            "/artifactory/generic-local/bk-custom/proj1/a%20b/c.bin"
        );
    }

    #[tokio::test]
    async fn test_open_content_fails_on_error_status() {
        let server = TestServer::start(vec![CannedResponse::bytes(404, b"")])
            .await
            .unwrap();
        let client = client_for(&server.base_url, None);

        let err = client.open_content(&node(None)).await.unwrap_err();
        assert!(matches!(err, MigrationError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_open_content_fails_when_body_stalls() {
        let server = TestServer::start(vec![
            CannedResponse::bytes(200, b"late").with_body_delay(Duration::from_millis(800)),
        ])
        .await
        .unwrap();
        let client = client_for(&server.base_url, Some(Duration::from_millis(100)));

        let content = client.open_content(&node(None)).await.unwrap();
        let err = read_all(content).await.unwrap_err();
        assert!(err.to_string().contains("no data received"));
    }

    #[tokio::test]
    async fn test_connection_error_keeps_cause() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = client_for(&base_url, None);

        match client.query_nodes(&NodeSelector::All).await {
            Err(MigrationError::Network(message)) => {
                assert!(message.starts_with("error sending request"));
                assert!(message.to_lowercase().contains("refused"), "{message}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
