//! Core of artimigrate: configuration, logging, HTTP setup and the migration
//! driver that copies nodes from a JFrog Artifactory project to a BKRepo
//! generic repository.

pub mod config;
pub mod context;
pub mod http_client;
pub mod logging;
pub mod migration;

pub use context::{
    MigrationContext,
    RunOptions,
};
pub use migration::{
    MigrationDriver,
    MigrationReport,
    NodeOutcome,
};
