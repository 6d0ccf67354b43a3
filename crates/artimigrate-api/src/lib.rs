//! Shared building blocks for artimigrate
//!
//! - `types` - node descriptors, properties, credentials and upload requests
//! - `content` - owned, re-chunkable content streams
//! - `repository` - the source and destination repository traits
//! - `path` - project prefix normalization and URL path encoding
//! - `error` - the error taxonomy used at every repository boundary
//! - `testing` - a canned-response HTTP server (`testing` feature)

pub mod content;
pub mod error;
pub mod path;
pub mod repository;
#[cfg(feature = "testing")]
pub mod testing;
pub mod types;

pub use content::{
    ByteStream,
    ContentStream,
    DEFAULT_CHUNK_SIZE,
};
pub use error::{
    MigrationError,
    MigrationResult,
};
pub use repository::{
    DestinationRepository,
    SourceRepository,
};
pub use types::{
    collapse_properties,
    Credentials,
    Node,
    NodeDescriptor,
    NodeSelector,
    Properties,
    UploadRequest,
};
