//! Request identity: which managed resource an invocation reconciles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Identity of the managed resource a reconcile invocation targets.
///
/// A request names the resource, optionally qualified by a namespace. It
/// carries no resource state: steps that need current state re-read it
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    /// Resource name.
    pub name: String,
    /// Namespace, if the resource is namespaced.
    pub namespace: Option<String>,
}

impl Request {
    /// Create a request for a cluster-scoped resource.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    /// Create a request for a namespaced resource.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// Parse the `name` or `namespace/name` cache-key form.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyKey`] for an empty key and
    /// [`RequestError::MalformedKey`] for empty segments or more than one
    /// separator.
    pub fn from_key(key: &str) -> Result<Self, RequestError> {
        if key.is_empty() {
            return Err(RequestError::EmptyKey);
        }
        let mut parts = key.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), None, None) if !name.is_empty() => Ok(Self::new(name)),
            (Some(namespace), Some(name), None) if !namespace.is_empty() && !name.is_empty() => {
                Ok(Self::namespaced(namespace, name))
            }
            _ => Err(RequestError::MalformedKey {
                key: key.to_string(),
            }),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}/{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for Request {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_from_key_namespaced() {
        let req = Request::from_key("fleet/widget-a").unwrap();
        assert_eq!(req, Request::namespaced("fleet", "widget-a"));
        assert_eq!(req.to_string(), "fleet/widget-a");
    }

    #[test]
    fn test_from_key_cluster_scoped() {
        let req = Request::from_key("widget-a").unwrap();
        assert_eq!(req, Request::new("widget-a"));
        assert_eq!(req.to_string(), "widget-a");
    }

    #[test]
    fn test_from_key_rejects_malformed() {
        assert_eq!(Request::from_key(""), Err(RequestError::EmptyKey));
        assert!(matches!(
            Request::from_key("a/b/c"),
            Err(RequestError::MalformedKey { .. })
        ));
        assert!(matches!(
            Request::from_key("/widget-a"),
            Err(RequestError::MalformedKey { .. })
        ));
        assert!(matches!(
            Request::from_key("fleet/"),
            Err(RequestError::MalformedKey { .. })
        ));
    }

    #[test]
    fn test_from_str_round_trip() {
        let req: Request = "fleet/widget-a".parse().unwrap();
        let back: Request = req.to_string().parse().unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_request_serialization() {
        let req = Request::namespaced("fleet", "widget-a");
        let json = serde_json::to_string(&req).unwrap();
        let back: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}
