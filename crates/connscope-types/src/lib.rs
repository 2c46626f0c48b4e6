//! Shared types for connscope
//!
//! This crate contains data structures used across multiple connscope crates.

use serde::Deserialize;
use std::fmt;

// ============================================================================
// Kubernetes Context Types
// ============================================================================

/// Kubernetes context information
#[derive(Clone, Debug)]
pub struct ContextInfo {
    pub name: String,
    pub cluster: String,
    pub user: String,
    pub namespace: Option<String>,
    pub is_current: bool,
}

impl ContextInfo {
    pub fn new(
        name: String,
        cluster: String,
        user: String,
        namespace: Option<String>,
        is_current: bool,
    ) -> Self {
        Self {
            name,
            cluster,
            user,
            namespace,
            is_current,
        }
    }
}

// ============================================================================
// Provider Connection Types
// ============================================================================

/// A stored credential usable to provision clusters against a provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConnection {
    /// Unique identifier; row identity in the table
    pub uid: String,
    pub name: String,
    pub namespace: String,
    /// Labels flattened to `key=value` strings
    pub labels: Vec<String>,
}

impl ProviderConnection {
    pub fn new(uid: String, name: String, namespace: String) -> Self {
        Self {
            uid,
            name,
            namespace,
            labels: Vec::new(),
        }
    }

    /// Attach labels in `key=value` form
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// The (name, namespace) pair a delete request targets
    pub fn target(&self) -> ConnectionRef {
        ConnectionRef {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

/// Name and namespace of a connection, as sent to the delete operation
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionRef {
    pub name: String,
    pub namespace: String,
}

impl ConnectionRef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for ConnectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Registry entry mapping a provider identifier to its display name
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProviderDescriptor {
    pub key: String,
    pub name: String,
}

impl ProviderDescriptor {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// Failure Types
// ============================================================================

/// Broad classification of a remote failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Forbidden,
    /// Any other API status code
    Api(u16),
    /// Network, TLS or client-side failure
    Transport,
}

impl FailureKind {
    /// Classify an HTTP status code returned by the API server
    pub fn from_status(code: u16) -> Self {
        match code {
            404 => Self::NotFound,
            401 | 403 => Self::Forbidden,
            other => Self::Api(other),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::NotFound => "Not found".to_string(),
            Self::Forbidden => "Forbidden".to_string(),
            Self::Api(code) => format!("API error {}", code),
            Self::Transport => "Connection error".to_string(),
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Listing provider connections failed
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Deleting a single provider connection failed
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("failed to delete {target}: {kind}: {message}")]
pub struct DeleteFailure {
    pub target: ConnectionRef,
    pub kind: FailureKind,
    pub message: String,
}

impl DeleteFailure {
    pub fn new(target: ConnectionRef, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            target,
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_from_status() {
        assert_eq!(FailureKind::from_status(404), FailureKind::NotFound);
        assert_eq!(FailureKind::from_status(403), FailureKind::Forbidden);
        assert_eq!(FailureKind::from_status(401), FailureKind::Forbidden);
        assert_eq!(FailureKind::from_status(500), FailureKind::Api(500));
    }

    #[test]
    fn test_delete_failure_display_names_target() {
        let failure = DeleteFailure::new(
            ConnectionRef::new("aws-east", "ns1"),
            FailureKind::NotFound,
            "secrets \"aws-east\" not found",
        );
        let text = failure.to_string();
        assert!(text.contains("ns1/aws-east"));
        assert!(text.contains("Not found"));
    }

    #[test]
    fn test_target_uses_name_and_namespace() {
        let conn = ProviderConnection::new("uid-1".into(), "aws-east".into(), "ns1".into());
        assert_eq!(conn.target(), ConnectionRef::new("aws-east", "ns1"));
    }
}
