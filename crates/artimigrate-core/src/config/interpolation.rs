//! `${VAR}` and `${VAR:-default}` expansion for configuration values

use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpolationError {
    #[error("Required environment variable not found: {0}")]
    RequiredVarNotFound(String),
}

pub type InterpolationResult<T> = Result<T, InterpolationError>;

static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("Invalid regex pattern")
});

/// Expands variables using the process environment
pub fn interpolate(input: &str) -> InterpolationResult<String> {
    interpolate_with(input, |name| std::env::var(name).ok())
}

/// Expands variables with a custom lookup.
///
/// Defaults are taken literally; expanded values are not rescanned.
pub fn interpolate_with<F>(input: &str, lookup: F) -> InterpolationResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = None;

    let expanded = VAR_PATTERN.replace_all(input, |caps: &Captures<'_>| {
        let name = &caps[1];
        match lookup(name) {
            Some(value) => value,
            None => match caps.get(2) {
                Some(default) => default.as_str().to_string(),
                None => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            },
        }
    });

    match missing {
        Some(name) => Err(InterpolationError::RequiredVarNotFound(name)),
        None => Ok(expanded.into_owned()),
    }
}

/// Expands every string inside a parsed TOML document
pub fn interpolate_toml(value: &mut toml::Value) -> InterpolationResult<()> {
    match value {
        toml::Value::String(s) => *s = interpolate(s)?,
        toml::Value::Array(items) => {
            for item in items {
                interpolate_toml(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                interpolate_toml(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}
