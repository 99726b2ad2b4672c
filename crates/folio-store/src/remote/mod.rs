//! Remote persistence adapter.
//!
//! [`RemoteProjects`] is the port the repository talks to. [`RestRemote`]
//! implements it against a hosted PostgREST endpoint; tests supply their own
//! implementations.

mod http;
mod rest;

pub use rest::RestRemote;

use std::fmt;

use async_trait::async_trait;
use folio_core::entities::{ContactMessage, Project, ValidatedDraft};
use folio_core::ids::ProjectId;
use serde::Serialize;
use thiserror::Error;

/// Why a remote operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFailure {
    /// The request never got a response (DNS, refused connection, timeout).
    Connectivity,
    /// The table or schema the request targets does not exist.
    MissingSchema,
    /// Row-level security or credentials refused the request.
    PermissionDenied,
    Unknown,
}

impl RemoteFailure {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::MissingSchema => "missing_schema",
            Self::PermissionDenied => "permission_denied",
            Self::Unknown => "unknown",
        }
    }

    /// One-line operator hint for the failure.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Connectivity => "check the network and the configured remote URL",
            Self::MissingSchema => "create the projects table in the remote database",
            Self::PermissionDenied => "check the API key and the table's row-level security policies",
            Self::Unknown => "see the error message for details",
        }
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified remote failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("remote {cause}: {message}")]
pub struct RemoteError {
    pub cause: RemoteFailure,
    pub message: String,
}

impl RemoteError {
    pub fn new(cause: RemoteFailure, message: impl Into<String>) -> Self {
        Self {
            cause,
            message: message.into(),
        }
    }
}

/// Result of a connection probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoteStatus {
    /// Row count reported by the server, when it sends one.
    pub rows: Option<u64>,
}

/// Operations the project repository needs from a remote store.
#[async_trait]
pub trait RemoteProjects: Send + Sync {
    /// All projects, newest first.
    async fn list(&self) -> Result<Vec<Project>, RemoteError>;

    /// Insert a draft and return the stored record with its assigned id and
    /// creation time.
    async fn insert(&self, draft: &ValidatedDraft) -> Result<Project, RemoteError>;

    /// Delete the project with `id`. Deleting an unknown id succeeds.
    async fn remove(&self, id: &ProjectId) -> Result<(), RemoteError>;

    /// Check that the projects table is reachable.
    async fn probe(&self) -> Result<RemoteStatus, RemoteError>;

    /// Store a contact-form message.
    async fn insert_contact(&self, message: &ContactMessage) -> Result<(), RemoteError>;
}
