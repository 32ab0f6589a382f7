pub mod client;
pub mod content;

pub use client::{GitHubClient, GitHubClientConfig};
pub use content::{ContentEntry, ContentResponse, ContentsPayload, EntryType};
