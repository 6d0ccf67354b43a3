//! Path helpers shared by the repository clients

/// Strips `prefix` from `path` when it is a whole leading segment.
///
/// `bk-custom/proj1/a/b` loses `bk-custom/proj1` and becomes `/a/b`, while
/// `bk-custom/proj10/a` is left untouched.
pub fn strip_project_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    match path.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Destination location of a node: stripped source path joined with its name
pub fn normalize_node_path(path: &str, name: &str, prefix: &str) -> String {
    format!("{}/{}", strip_project_prefix(path, prefix), name)
}

/// Percent-encodes every segment of a slash separated path, dropping empty
/// segments
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_project_prefix() {
        assert_eq!(
            strip_project_prefix("bk-custom/proj1/a/b", "bk-custom/proj1"),
            "/a/b"
        );
        assert_eq!(strip_project_prefix("other/a/b", "bk-custom/proj1"), "other/a/b");
        assert_eq!(strip_project_prefix("bk-custom/proj1", "bk-custom/proj1"), "");
    }

    #[test]
    fn test_strip_respects_segment_boundary() {
        assert_eq!(
            strip_project_prefix("bk-custom/proj10/a", "bk-custom/proj1"),
            "bk-custom/proj10/a"
        );
    }

    #[test]
    fn test_normalize_node_path() {
        assert_eq!(
            normalize_node_path("bk-custom/proj1/a/b", "c.txt", "bk-custom/proj1"),
            "/a/b/c.txt"
        );
        assert_eq!(
            normalize_node_path("bk-custom/proj1", "c.txt", "bk-custom/proj1"),
            "/c.txt"
        );
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/a b/c#d/"), "a%20b/c%23d");
        assert_eq!(encode_path("plain/path"), "plain/path");
        assert_eq!(encode_path(""), "");
    }
}
