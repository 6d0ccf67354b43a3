use artimigrate_api::{
    DestinationRepository,
    Node,
};

/// Advisory existence probe: true only when the destination reports a node
/// at the normalized path with exactly the source size.
///
/// Query failures are treated as "needs migration" and never propagated.
pub async fn node_exists<D>(destination: &D, node: &Node) -> bool
where
    D: DestinationRepository + ?Sized,
{
    let credentials = node.destination_credentials();
    match destination
        .query_node_size(&node.normalized_path, &credentials)
        .await
    {
        Ok(size) if size == node.size => true,
        Ok(size) => {
            tracing::debug!(
                path = %node.normalized_path,
                source_size = node.size,
                destination_size = size,
                "Destination node size differs"
            );
            false
        }
        Err(e) => {
            tracing::debug!(path = %node.normalized_path, error = %e, "Destination node not found");
            false
        }
    }
}
