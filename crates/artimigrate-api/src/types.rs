//! Data model shared by the source lister, the destination client and the
//! migration driver

use std::collections::BTreeMap;
use std::fmt;

use secrecy::SecretString;
use serde::Deserialize;

use crate::content::ContentStream;
use crate::path;

/// Raw node descriptor as returned by a source listing query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeDescriptor {
    #[serde(default)]
    pub repo: Option<String>,
    pub path: String,
    pub name: String,
    pub size: u64,
    pub created_by: String,
}

/// A node taken through one migration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub repo: Option<String>,
    pub source_path: String,
    pub name: String,
    pub size: u64,
    pub created_by: String,
    /// Destination location: `source_path` without the project prefix, plus
    /// `/<name>`
    pub normalized_path: String,
}

impl Node {
    pub fn new(descriptor: NodeDescriptor, project_prefix: &str) -> Self {
        let normalized_path =
            path::normalize_node_path(&descriptor.path, &descriptor.name, project_prefix);

        Self {
            repo: descriptor.repo,
            source_path: descriptor.path,
            name: descriptor.name,
            size: descriptor.size,
            created_by: descriptor.created_by,
            normalized_path,
        }
    }

    /// Destination credentials: the creator identity is used as both the
    /// username and the password
    pub fn destination_credentials(&self) -> Credentials {
        Credentials::mirrored(&self.created_by)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source_path, self.name)
    }
}

/// Custom metadata attached to a node, one value per key
pub type Properties = BTreeMap<String, String>;

/// Collapses multi-valued source metadata into [`Properties`].
///
/// Lists keep their first element, empty lists and scalar values are dropped.
pub fn collapse_properties(raw: &serde_json::Map<String, serde_json::Value>) -> Properties {
    raw.iter()
        .filter_map(|(key, value)| {
            let first = value.as_array()?.first()?;
            let value = match first {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect()
}

/// Restriction applied to a single listing query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeSelector {
    /// Every node under the project prefix
    All,
    /// Nodes with this exact name
    Name(String),
    /// Nodes stored directly under this path
    Path(String),
}

impl fmt::Display for NodeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Name(name) => write!(f, "node[{name}]"),
            Self::Path(path) => write!(f, "path[{path}]"),
        }
    }
}

/// Basic-auth credentials
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn mirrored(identity: &str) -> Self {
        Self::new(identity, identity)
    }
}

/// Everything the destination needs to store one node
#[derive(Debug)]
pub struct UploadRequest {
    pub normalized_path: String,
    pub size: u64,
    pub properties: Properties,
    pub content: ContentStream,
    pub credentials: Credentials,
}
