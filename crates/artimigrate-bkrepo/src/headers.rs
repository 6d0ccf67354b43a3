use artimigrate_api::{
    MigrationError,
    MigrationResult,
    Properties,
};
use reqwest::header::{
    HeaderMap,
    HeaderName,
    HeaderValue,
};

pub const META_HEADER_PREFIX: &str = "X-BKREPO-META-";
pub const SIZE_HEADER: &str = "X-BKREPO-SIZE";
pub const OVERWRITE_HEADER: &str = "X-BKREPO-OVERWRITE";

/// Translates node metadata into upload headers.
///
/// The overwrite header is always `true`; whether existing nodes are skipped
/// is decided before the upload by the existence check.
pub(crate) fn upload_headers(properties: &Properties, size: u64) -> MigrationResult<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(properties.len() + 2);

    for (key, value) in properties {
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            MigrationError::Request(format!("Invalid value for metadata key {key:?}: {e}"))
        })?;
        headers.insert(header_name(&format!("{META_HEADER_PREFIX}{key}"))?, header_value);
    }

    headers.insert(header_name(SIZE_HEADER)?, HeaderValue::from(size));
    headers.insert(header_name(OVERWRITE_HEADER)?, HeaderValue::from_static("true"));

    Ok(headers)
}

// Names are lowercased on parse
fn header_name(name: &str) -> MigrationResult<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| MigrationError::Request(format!("Invalid header name {name:?}: {e}")))
}
