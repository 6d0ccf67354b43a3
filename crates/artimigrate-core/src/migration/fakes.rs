//! In-memory repositories for driver and lister tests

use std::collections::{
    HashMap,
    HashSet,
};
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::{
    Arc,
    Mutex,
};

use artimigrate_api::{
    ContentStream,
    Credentials,
    DestinationRepository,
    MigrationError,
    MigrationResult,
    Node,
    NodeDescriptor,
    NodeSelector,
    Properties,
    SourceRepository,
    UploadRequest,
    DEFAULT_CHUNK_SIZE,
};
use async_trait::async_trait;
use bytes::Bytes;
use futures::{
    stream,
    StreamExt,
    TryStreamExt,
};

use crate::config::{
    AllowList,
    ConfigLoader,
    Environment,
};
use crate::context::{
    MigrationContext,
    RunOptions,
};

pub(crate) const PREFIX: &str = "bk-custom/proj1";

pub(crate) fn descriptor(name: &str, size: u64) -> NodeDescriptor {
    NodeDescriptor {
        repo: None,
        path: format!("{PREFIX}/a"),
        name: name.to_string(),
        size,
        created_by: "alice".to_string(),
    }
}

pub(crate) fn context(overwrite: bool, jobs: usize) -> MigrationContext {
    let config = ConfigLoader::parse(
        r#"
        [environments.prod.source]
        url = "https://jfrog.example.com/artifactory"
        repository = "generic-local"
        username = "reader"

        [environments.prod.destination]
        url = "https://bkrepo.example.com"
        "#,
    )
    .unwrap();

    MigrationContext::new(
        RunOptions {
            project: "proj1".to_string(),
            environment: Environment::Prod,
            overwrite,
            jobs,
        },
        config,
        AllowList::default(),
    )
    .unwrap()
}

struct ReleaseGuard(Arc<AtomicUsize>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub(crate) struct FakeSource {
    responses: Vec<(NodeSelector, Option<Vec<NodeDescriptor>>)>,
    queries: Mutex<Vec<NodeSelector>>,
    failing_properties: HashSet<String>,
    failing_content: HashSet<String>,
    property_fetches: AtomicUsize,
    content_opens: AtomicUsize,
    released: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn with_response(mut self, selector: NodeSelector, nodes: Vec<NodeDescriptor>) -> Self {
        self.responses.push((selector, Some(nodes)));
        self
    }

    pub fn with_failure(mut self, selector: NodeSelector) -> Self {
        self.responses.push((selector, None));
        self
    }

    pub fn with_failing_properties(mut self, name: &str) -> Self {
        self.failing_properties.insert(name.to_string());
        self
    }

    pub fn with_failing_content(mut self, name: &str) -> Self {
        self.failing_content.insert(name.to_string());
        self
    }

    pub fn queries(&self) -> Vec<NodeSelector> {
        self.queries.lock().unwrap().clone()
    }

    pub fn property_fetches(&self) -> usize {
        self.property_fetches.load(Ordering::SeqCst)
    }

    pub fn content_opens(&self) -> usize {
        self.content_opens.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceRepository for FakeSource {
    async fn query_nodes(&self, selector: &NodeSelector) -> MigrationResult<Vec<NodeDescriptor>> {
        self.queries.lock().unwrap().push(selector.clone());

        match self.responses.iter().find(|(s, _)| s == selector) {
            Some((_, Some(nodes))) => Ok(nodes.clone()),
            Some((_, None)) => Err(MigrationError::api(500, "aql failed")),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_properties(&self, node: &Node) -> MigrationResult<Properties> {
        self.property_fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing_properties.contains(&node.name) {
            return Err(MigrationError::api(404, "no properties"));
        }
        Ok(Properties::from([("origin".to_string(), node.name.clone())]))
    }

    async fn open_content(&self, node: &Node) -> MigrationResult<ContentStream> {
        self.content_opens.fetch_add(1, Ordering::SeqCst);
        if self.failing_content.contains(&node.name) {
            return Err(MigrationError::Network("connection refused".to_string()));
        }

        let guard = ReleaseGuard(self.released.clone());
        let payload = vec![b'x'; node.size as usize];
        let chunks: Vec<MigrationResult<Bytes>> = payload
            .chunks(300)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();

        Ok(ContentStream::new(stream::iter(chunks).map(move |item| {
            let _ = &guard;
            item
        })))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedUpload {
    pub path: String,
    pub username: String,
    pub properties: Properties,
    pub chunk_sizes: Vec<usize>,
}

#[derive(Default)]
pub(crate) struct FakeDestination {
    stored: Mutex<HashMap<String, u64>>,
    uploads: Mutex<Vec<RecordedUpload>>,
    failing_uploads: HashSet<String>,
    queries: AtomicUsize,
}

impl FakeDestination {
    pub fn with_failing_upload(mut self, path: &str) -> Self {
        self.failing_uploads.insert(path.to_string());
        self
    }

    pub fn store(&self, path: &str, size: u64) {
        self.stored.lock().unwrap().insert(path.to_string(), size);
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl DestinationRepository for FakeDestination {
    async fn query_node_size(
        &self, normalized_path: &str, _credentials: &Credentials,
    ) -> MigrationResult<u64> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.stored
            .lock()
            .unwrap()
            .get(normalized_path)
            .copied()
            .ok_or_else(|| MigrationError::UnexpectedResponse("code 251004".to_string()))
    }

    async fn upload(&self, request: UploadRequest) -> MigrationResult<()> {
        if self.failing_uploads.contains(&request.normalized_path) {
            return Err(MigrationError::api(500, "storage unavailable"));
        }

        let UploadRequest {
            normalized_path,
            properties,
            content,
            credentials,
            ..
        } = request;

        let chunks: Vec<Bytes> = content.chunked(DEFAULT_CHUNK_SIZE).try_collect().await?;
        let chunk_sizes: Vec<usize> = chunks.iter().map(Bytes::len).collect();
        let total: usize = chunk_sizes.iter().sum();

        self.store(&normalized_path, total as u64);
        self.uploads.lock().unwrap().push(RecordedUpload {
            path: normalized_path,
            username: credentials.username,
            properties,
            chunk_sizes,
        });
        Ok(())
    }
}
