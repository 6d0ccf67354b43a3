//! AQL query construction

use artimigrate_api::NodeSelector;
use serde_json::{
    json,
    Map,
    Value,
};

/// Fields every listing query must return
const INCLUDED_FIELDS: [&str; 5] = ["repo", "path", "name", "size", "created_by"];

/// Builds the `items.find(...)` query for one selector.
///
/// `scope` is the project prefix (`bk-custom/<project>`); name and
/// unrestricted queries only look inside it, while path queries match the
/// given path exactly.
pub(crate) fn build_query(repository: &str, scope: &str, selector: &NodeSelector) -> String {
    let mut criteria = Map::new();
    criteria.insert("repo".to_string(), json!(repository));
    criteria.insert("type".to_string(), json!("file"));

    match selector {
        NodeSelector::All => {
            criteria.insert("$or".to_string(), scope_criteria(scope));
        }
        NodeSelector::Name(name) => {
            criteria.insert("$or".to_string(), scope_criteria(scope));
            criteria.insert("name".to_string(), json!(name));
        }
        NodeSelector::Path(path) => {
            criteria.insert("path".to_string(), json!(path.trim_matches('/')));
        }
    }

    let include = INCLUDED_FIELDS
        .iter()
        .map(|field| format!("\"{field}\""))
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "items.find({}).include({})",
        Value::Object(criteria),
        include
    )
}

fn scope_criteria(scope: &str) -> Value {
    let scope = scope.trim_matches('/');
    json!([
        { "path": scope },
        { "path": { "$match": format!("{scope}/*") } }
    ])
}
