//! Optional restriction of which nodes and paths a run migrates

use std::path::Path;

use artimigrate_api::NodeSelector;
use serde::Deserialize;

use super::interpolation::interpolate_toml;
use super::loader::{
    ConfigLoadError,
    ConfigLoadResult,
};

/// Allow-list file contents:
///
/// ```toml
/// [node]
/// list = ["n1", "n2"]
///
/// [path]
/// list = "bk-custom/proj1/a bk-custom/proj1/b"
/// ```
///
/// A list may be an array or a whitespace separated string. A section only
/// counts as configured when it carries a `list` key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllowList {
    #[serde(default)]
    node: Option<ListSection>,
    #[serde(default)]
    path: Option<ListSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ListSection {
    #[serde(default)]
    list: Option<ListValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ListValue {
    Items(Vec<String>),
    Joined(String),
}

impl ListValue {
    fn items(&self) -> Vec<String> {
        match self {
            Self::Items(items) => items
                .iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            Self::Joined(joined) => joined.split_whitespace().map(str::to_string).collect(),
        }
    }
}

impl AllowList {
    pub fn load(path: &Path) -> ConfigLoadResult<Self> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ConfigLoadResult<Self> {
        let mut value: toml::Value = toml::from_str(content)?;
        interpolate_toml(&mut value)?;

        value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize allow-list: {}", e))
        })
    }

    pub fn with_lists(node_names: Option<Vec<String>>, paths: Option<Vec<String>>) -> Self {
        let section = |items: Vec<String>| ListSection {
            list: Some(ListValue::Items(items)),
        };
        Self {
            node: node_names.map(section),
            path: paths.map(section),
        }
    }

    pub fn node_names(&self) -> Option<Vec<String>> {
        self.node.as_ref()?.list.as_ref().map(ListValue::items)
    }

    pub fn paths(&self) -> Option<Vec<String>> {
        self.path.as_ref()?.list.as_ref().map(ListValue::items)
    }

    pub fn is_restricted(&self) -> bool {
        self.node_names().is_some() || self.paths().is_some()
    }

    /// Listing queries to issue, in order: one per node name, then one per
    /// path, or a single unrestricted query when neither list is configured
    pub fn selectors(&self) -> Vec<NodeSelector> {
        let node_names = self.node_names();
        let paths = self.paths();

        if node_names.is_none() && paths.is_none() {
            return vec![NodeSelector::All];
        }

        node_names
            .into_iter()
            .flatten()
            .map(NodeSelector::Name)
            .chain(paths.into_iter().flatten().map(NodeSelector::Path))
            .collect()
    }
}
