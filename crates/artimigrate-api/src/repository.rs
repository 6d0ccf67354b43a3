use async_trait::async_trait;

use crate::content::ContentStream;
use crate::error::MigrationResult;
use crate::types::{
    Credentials,
    Node,
    NodeDescriptor,
    NodeSelector,
    Properties,
    UploadRequest,
};

/// Repository that nodes are copied from
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// Runs one listing query
    async fn query_nodes(&self, selector: &NodeSelector) -> MigrationResult<Vec<NodeDescriptor>>;

    /// Fetches the custom metadata of a node, collapsed to one value per key
    async fn fetch_properties(&self, node: &Node) -> MigrationResult<Properties>;

    /// Opens a streamed read of a node's content
    async fn open_content(&self, node: &Node) -> MigrationResult<ContentStream>;
}

/// Repository that nodes are copied to
#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// Size of the node stored at `normalized_path`.
    ///
    /// Fails when the node is missing or the response is not an
    /// application-level success.
    async fn query_node_size(
        &self, normalized_path: &str, credentials: &Credentials,
    ) -> MigrationResult<u64>;

    /// Streams a node to the destination
    async fn upload(&self, request: UploadRequest) -> MigrationResult<()>;
}
