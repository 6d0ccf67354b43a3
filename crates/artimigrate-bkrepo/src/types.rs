//! API response types for the BKRepo node query

use artimigrate_api::{
    MigrationError,
    MigrationResult,
};
use serde::Deserialize;

/// Application-level success code
pub(crate) const SUCCESS_CODE: i64 = 0;

#[derive(Debug, Deserialize)]
pub(crate) struct NodeQueryResponse {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<NodeDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeDetail {
    #[serde(rename = "nodeInfo")]
    pub node_info: NodeInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeInfo {
    pub size: u64,
}

impl NodeQueryResponse {
    /// Reported node size, provided the response is an application-level
    /// success
    pub fn into_size(self) -> MigrationResult<u64> {
        if self.code != SUCCESS_CODE {
            return Err(MigrationError::UnexpectedResponse(format!(
                "code {}: {}",
                self.code,
                self.message.as_deref().unwrap_or("no message")
            )));
        }
        self.data
            .map(|detail| detail.node_info.size)
            .ok_or_else(|| MigrationError::UnexpectedResponse("missing data.nodeInfo".to_string()))
    }
}
