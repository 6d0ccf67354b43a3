//! BKRepo generic repository destination for artimigrate
//!
//! - `client` - node query and streamed upload
//! - `headers` - upload header translation
//! - `types` - API response types

mod client;
mod headers;
mod types;

pub use client::{
    BkRepoClient,
    BkRepoSettings,
};
pub use headers::{
    META_HEADER_PREFIX,
    OVERWRITE_HEADER,
    SIZE_HEADER,
};
