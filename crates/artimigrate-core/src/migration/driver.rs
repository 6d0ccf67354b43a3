use std::fmt;
use std::time::Instant;

use artimigrate_api::{
    DestinationRepository,
    MigrationError,
    MigrationResult,
    Node,
    NodeDescriptor,
    SourceRepository,
    UploadRequest,
};
use futures::{
    stream,
    StreamExt,
};
use thiserror::Error;

use super::report::MigrationReport;
use super::{
    checker,
    lister,
};
use crate::context::MigrationContext;

/// Fallible steps of a node's migration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchProperties,
    FetchContent,
    Upload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchProperties => write!(f, "fetch properties"),
            Self::FetchContent => write!(f, "fetch content"),
            Self::Upload => write!(f, "upload"),
        }
    }
}

#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    pub source: MigrationError,
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, StageFailure>;
}

impl<T> AtStage<T> for MigrationResult<T> {
    fn at(self, stage: Stage) -> Result<T, StageFailure> {
        self.map_err(|source| StageFailure { stage, source })
    }
}

/// Terminal state of one node
#[derive(Debug)]
pub enum NodeOutcome {
    /// Already present at the destination with the same size
    Skipped,
    Migrated,
    Failed(StageFailure),
}

/// Runs the list, check, fetch and upload pipeline for every node
pub struct MigrationDriver<'a, S: ?Sized, D: ?Sized> {
    context: &'a MigrationContext,
    source: &'a S,
    destination: &'a D,
}

impl<'a, S, D> MigrationDriver<'a, S, D>
where
    S: SourceRepository + ?Sized,
    D: DestinationRepository + ?Sized,
{
    pub fn new(context: &'a MigrationContext, source: &'a S, destination: &'a D) -> Self {
        Self {
            context,
            source,
            destination,
        }
    }

    pub async fn run(&self) -> MigrationReport {
        tracing::info!(
            "Start migration from jfrog [{}] to bkrepo [{}]",
            self.context.project_prefix(),
            self.context.destination_label()
        );
        let started = Instant::now();

        let descriptors = lister::list_nodes(self.source, &self.context.allow_list).await;
        let total = descriptors.len();
        tracing::info!("Retrieve {} nodes totally.", total);

        let mut report = MigrationReport::new(total);
        let mut outcomes = stream::iter(descriptors.into_iter().enumerate())
            .map(|(index, descriptor)| self.migrate_node(descriptor, index + 1, total))
            .buffer_unordered(self.context.jobs.max(1));

        while let Some(outcome) = outcomes.next().await {
            report.record(&outcome);
        }

        report.elapsed = started.elapsed();
        tracing::info!("{}", report.summary());
        report
    }

    /// Migrates one node and logs its outcome with its run position
    pub async fn migrate_node(
        &self, descriptor: NodeDescriptor, position: usize, total: usize,
    ) -> NodeOutcome {
        let node = Node::new(descriptor, &self.context.project_prefix());

        let outcome = match self.transfer(&node).await {
            Ok(outcome) => outcome,
            Err(failure) => NodeOutcome::Failed(failure),
        };

        match &outcome {
            NodeOutcome::Skipped => tracing::info!(
                "({}/{})[{}] migration skipped: node existed.",
                position,
                total,
                node
            ),
            NodeOutcome::Migrated => {
                tracing::info!("({}/{})[{}] migration success.", position, total, node)
            }
            NodeOutcome::Failed(failure) => tracing::error!(
                "({}/{})[{}] migration failed at {}: {}",
                position,
                total,
                node,
                failure.stage,
                failure.source
            ),
        }

        outcome
    }

    async fn transfer(&self, node: &Node) -> Result<NodeOutcome, StageFailure> {
        if !self.context.overwrite && checker::node_exists(self.destination, node).await {
            return Ok(NodeOutcome::Skipped);
        }

        let properties = self
            .source
            .fetch_properties(node)
            .await
            .at(Stage::FetchProperties)?;

        // Owned by the request from here on; dropped exactly once whichever
        // way the upload ends.
        let content = self
            .source
            .open_content(node)
            .await
            .at(Stage::FetchContent)?;

        let request = UploadRequest {
            normalized_path: node.normalized_path.clone(),
            size: node.size,
            properties,
            content,
            credentials: node.destination_credentials(),
        };

        self.destination.upload(request).await.at(Stage::Upload)?;
        Ok(NodeOutcome::Migrated)
    }
}
