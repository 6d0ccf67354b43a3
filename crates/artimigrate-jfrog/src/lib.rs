//! JFrog Artifactory source for artimigrate
//!
//! - `client` - HTTP calls: AQL listing, storage properties, content download
//! - `aql` - AQL query construction
//! - `types` - API response types

mod aql;
mod client;
mod types;

pub use client::{
    JfrogClient,
    JfrogSettings,
};
