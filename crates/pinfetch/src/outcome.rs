use std::path::PathBuf;

use crate::remote::{FailureCategory, FetchError};
use crate::write::WriteError;

/// The result of attempting one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub path: String,
    pub success: bool,
    pub category: Option<FailureCategory>,
    pub error_detail: Option<String>,
}

impl DownloadOutcome {
    pub fn succeeded(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            success: true,
            category: None,
            error_detail: None,
        }
    }

    pub fn failed(path: impl Into<String>, category: FailureCategory, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            success: false,
            category: Some(category),
            error_detail: Some(detail.into()),
        }
    }

    pub(crate) fn from_fetch(path: impl Into<String>, err: &FetchError) -> Self {
        Self::failed(path, err.category(), err.to_string())
    }

    pub(crate) fn from_write(path: impl Into<String>, err: &WriteError) -> Self {
        Self::failed(path, FailureCategory::Io, err.to_string())
    }
}

/// Every outcome of a run, in the order items were attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub destination: PathBuf,
    pub outcomes: Vec<DownloadOutcome>,
}

impl Summary {
    pub fn total_attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn total_succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    /// Failed outcomes, in attempt order.
    pub fn failures(&self) -> Vec<&DownloadOutcome> {
        self.outcomes.iter().filter(|o| !o.success).collect()
    }

    pub fn is_complete_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }
}
