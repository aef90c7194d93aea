//! Resolution of `Location` header values against the current hop.

use super::url::{RequestTarget, UrlError, normalize, split_scheme};

/// Turn a `Location` value into the next hop's target.
///
/// - `scheme://...` is absolute and replaces the target entirely
/// - `//host/path` keeps the current scheme
/// - anything else is a path on the current `scheme://host`
pub fn resolve_location(current: &RequestTarget, location: &str) -> Result<RequestTarget, UrlError> {
    let location = location.trim();

    let next = if split_scheme(location).is_some() {
        location.to_string()
    } else if let Some(rest) = location.strip_prefix("//") {
        format!("{}://{rest}", current.scheme)
    } else if location.starts_with('/') {
        format!("{}{location}", current.origin())
    } else {
        format!("{}/{location}", current.origin())
    };

    normalize(&next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::url::Scheme;

    fn current() -> RequestTarget {
        normalize("https://example.com:8443/old/page?x=1").unwrap()
    }

    #[test]
    fn test_relative_path_keeps_scheme_and_host() {
        let next = resolve_location(&current(), "/new").unwrap();
        assert_eq!(next.scheme, Scheme::Https);
        assert_eq!(next.host, "example.com:8443");
        assert_eq!(next.path, "/new");
    }

    #[test]
    fn test_absolute_location() {
        let next = resolve_location(&current(), "http://other.test/landing?y=2").unwrap();
        assert_eq!(next.to_string(), "http://other.test/landing?y=2");
    }

    #[test]
    fn test_protocol_relative_location() {
        let next = resolve_location(&current(), "//cdn.example.com/asset").unwrap();
        assert_eq!(next.to_string(), "https://cdn.example.com/asset");
    }

    #[test]
    fn test_bare_path_gets_leading_slash() {
        let next = resolve_location(&current(), "login").unwrap();
        assert_eq!(next.to_string(), "https://example.com:8443/login");
    }

    #[test]
    fn test_query_only_location() {
        let next = resolve_location(&current(), "?page=2").unwrap();
        assert_eq!(next.path, "/?page=2");
    }

    #[test]
    fn test_unsupported_scheme_location() {
        let result = resolve_location(&current(), "ftp://files.example.com/");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }
}
