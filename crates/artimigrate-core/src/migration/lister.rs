use artimigrate_api::{
    NodeDescriptor,
    NodeSelector,
    SourceRepository,
};

use crate::config::AllowList;

/// Collects candidate nodes, one query per allow-list entry or a single
/// unrestricted query.
///
/// A failed query is logged and contributes nothing; results are
/// concatenated in query order without deduplication.
pub async fn list_nodes<S>(source: &S, allow_list: &AllowList) -> Vec<NodeDescriptor>
where
    S: SourceRepository + ?Sized,
{
    let mut result = Vec::new();

    for selector in allow_list.selectors() {
        match source.query_nodes(&selector).await {
            Ok(nodes) => {
                match &selector {
                    NodeSelector::Name(name) => tracing::info!("Retrieve node[{}] success.", name),
                    NodeSelector::Path(path) => {
                        tracing::info!("Retrieve [{}] nodes for path[{}].", nodes.len(), path)
                    }
                    NodeSelector::All => tracing::info!("Retrieve [{}] nodes.", nodes.len()),
                }
                result.extend(nodes);
            }
            Err(e) => match &selector {
                NodeSelector::Name(name) => {
                    tracing::error!("Retrieve node[{}] failed: {}", name, e)
                }
                NodeSelector::Path(path) => {
                    tracing::error!("Retrieve nodes for path[{}] failed: {}", path, e)
                }
                NodeSelector::All => tracing::error!("Retrieve nodes failed: {}", e),
            },
        }
    }

    result
}
