//! Navigation targets
//!
//! A [`Location`] is what the router navigates to. It accepts bare paths,
//! hash-mode URLs (`#/runs`, `http://host/#/runs`) and absolute URLs.

use crate::error::RouterError;
use std::fmt;
use url::form_urlencoded;

/// A parsed navigation target: a normalized path plus query pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse a path or URL into a location
    pub fn parse(input: &str) -> Result<Self, RouterError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(RouterError::InvalidLocation(input.to_string()));
        }

        let raw = if trimmed.contains("://") {
            let url = url::Url::parse(trimmed)
                .map_err(|_| RouterError::InvalidLocation(input.to_string()))?;
            match url.fragment() {
                // Hash-mode routing keeps the route in the fragment
                Some(fragment) if fragment.starts_with('/') => fragment.to_string(),
                _ => match url.query() {
                    Some(query) => format!("{}?{}", url.path(), query),
                    None => url.path().to_string(),
                },
            }
        } else if let Some(hash_route) = trimmed.strip_prefix('#') {
            hash_route.to_string()
        } else {
            trimmed.to_string()
        };

        if !raw.starts_with('/') {
            return Err(RouterError::InvalidLocation(input.to_string()));
        }

        // Drop any fragment left on a bare path
        let raw = raw.split('#').next().unwrap_or_default();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };

        let path = if path.len() > 1 {
            let stripped = path.trim_end_matches('/');
            if stripped.is_empty() { "/" } else { stripped }
        } else {
            path
        };

        let query = query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_string(),
            query,
        })
    }

    /// The normalized path, always starting with `/`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query pairs in their original order
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// First value of a query parameter
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Raw (still percent-encoded) path segments; the root path has none
    pub fn segments(&self) -> Vec<&str> {
        if self.path == "/" {
            Vec::new()
        } else {
            self.path[1..].split('/').collect()
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            return write!(f, "{}", self.path);
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        write!(f, "{}?{}", self.path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_path() {
        let location = Location::parse("/environments").unwrap();
        assert_eq!(location.path(), "/environments");
        assert!(location.query().is_empty());
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        assert_eq!(Location::parse("/runs/").unwrap().path(), "/runs");
        assert_eq!(Location::parse("/").unwrap().path(), "/");
        assert_eq!(Location::parse("//").unwrap().path(), "/");
    }

    #[test]
    fn test_hash_mode_urls() {
        assert_eq!(Location::parse("#/runs").unwrap().path(), "/runs");
        assert_eq!(
            Location::parse("http://localhost:8080/#/environment/42/show")
                .unwrap()
                .path(),
            "/environment/42/show"
        );
    }

    #[test]
    fn test_absolute_url_with_query() {
        let location = Location::parse("http://localhost/simulations?sort=id&page=2").unwrap();
        assert_eq!(location.path(), "/simulations");
        assert_eq!(location.query_param("sort"), Some("id"));
        assert_eq!(location.query_param("page"), Some("2"));
        assert_eq!(location.to_string(), "/simulations?sort=id&page=2");
    }

    #[test]
    fn test_invalid_locations() {
        assert!(Location::parse("").is_err());
        assert!(Location::parse("environments").is_err());
        assert!(Location::parse("http://").is_err());
    }

    #[test]
    fn test_segments() {
        let location = Location::parse("/simulation/7/delete").unwrap();
        assert_eq!(location.segments(), vec!["simulation", "7", "delete"]);
        assert!(Location::parse("/").unwrap().segments().is_empty());
    }
}
