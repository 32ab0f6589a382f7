pub mod content;
pub mod credentials;
pub mod event;
pub mod fetch;
pub mod orchestrator;
pub mod outcome;
pub mod reference;
pub mod remote;
pub mod walk;
pub mod write;

pub use content::{Encoding, FetchedContent, NodeKind, RemoteNode, classify};
pub use credentials::Credentials;
pub use event::{Event, EventSink, NullSink};
pub use fetch::{ContentFetcher, Fetched};
pub use orchestrator::{Orchestrator, RunOptions};
pub use outcome::{DownloadOutcome, Summary};
pub use reference::{KindHint, PinnedUrl, RepoRef, UrlError, parse as parse_url};
pub use remote::{Contents, FailureCategory, FetchError, Remote};
pub use walk::{TreeWalk, TreeWalker, WalkError};
pub use write::{DownloadWriter, WriteError};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
