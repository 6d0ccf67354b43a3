//! API response types for the Artifactory REST API

use artimigrate_api::NodeDescriptor;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct AqlResponse {
    pub results: Vec<NodeDescriptor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StorageProperties {
    pub properties: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aql_response_requires_results() {
        let missing = serde_json::from_str::<AqlResponse>(r#"{"range": {}}"#);
        assert!(missing.is_err());

        let parsed: AqlResponse = serde_json::from_str(
            r#"{"results": [{"repo": "generic-local", "path": "bk-custom/p", "name": "a", "size": 3, "created_by": "u"}], "range": {"total": 1}}"#,
        )
        .unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].name, "a");
    }

    #[test]
    fn test_storage_properties_requires_properties() {
        assert!(serde_json::from_str::<StorageProperties>(r#"{"uri": "x"}"#).is_err());

        let parsed: StorageProperties =
            serde_json::from_str(r#"{"properties": {"k": ["v1", "v2"]}, "uri": "x"}"#).unwrap();
        assert!(parsed.properties.contains_key("k"));
    }
}
