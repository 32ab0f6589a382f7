use std::sync::Arc;

use crate::content::RemoteNode;
use crate::reference::RepoRef;

/// Coarse failure classes reported in download outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    NotFound,
    RateLimited,
    TransientNetwork,
    Io,
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotFound => "not found",
            Self::RateLimited => "rate limited",
            Self::TransientNetwork => "network error",
            Self::Io => "I/O error",
        };
        f.write_str(label)
    }
}

/// Errors from a single remote request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{path}: not found")]
    NotFound { path: String },

    #[error("{path}: rate limited")]
    RateLimited { path: String },

    #[error("{path}: too large for the contents API")]
    TooLarge { path: String },

    #[error("{path}: is a directory")]
    IsDirectory { path: String },

    #[error("{path}: malformed response: {detail}")]
    Malformed { path: String, detail: String },

    #[error("{path}: HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("{path}: network error: {detail}")]
    Network { path: String, detail: String },
}

impl FetchError {
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path }
            | Self::RateLimited { path }
            | Self::TooLarge { path }
            | Self::IsDirectory { path }
            | Self::Malformed { path, .. }
            | Self::Status { path, .. }
            | Self::Network { path, .. } => path,
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            Self::NotFound { .. } | Self::IsDirectory { .. } => FailureCategory::NotFound,
            Self::RateLimited { .. } => FailureCategory::RateLimited,
            Self::TooLarge { .. }
            | Self::Malformed { .. }
            | Self::Status { .. }
            | Self::Network { .. } => FailureCategory::TransientNetwork,
        }
    }
}

/// What the contents endpoint returned for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// A single file, content already decoded to raw bytes.
    File { path: String, bytes: Vec<u8> },
    /// A directory listing, in the order the remote returned it.
    Listing(Vec<RemoteNode>),
}

/// Transport to a repository host.
///
/// Implementations perform exactly one request per call; fallback and
/// traversal policy live in [`crate::ContentFetcher`] and [`crate::TreeWalker`].
#[async_trait::async_trait]
pub trait Remote: Send + Sync {
    /// Query the contents endpoint at `target.path`, pinned to `target.commit`.
    async fn contents(&self, target: &RepoRef) -> Result<Contents, FetchError>;

    /// Fetch the file bytes from the raw-content endpoint.
    async fn raw(&self, target: &RepoRef) -> Result<Vec<u8>, FetchError>;
}

#[async_trait::async_trait]
impl<T: Remote + ?Sized> Remote for Arc<T> {
    async fn contents(&self, target: &RepoRef) -> Result<Contents, FetchError> {
        (**self).contents(target).await
    }

    async fn raw(&self, target: &RepoRef) -> Result<Vec<u8>, FetchError> {
        (**self).raw(target).await
    }
}
