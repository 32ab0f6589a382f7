use crate::content::{FetchedContent, RemoteNode};
use crate::event::{Event, EventSink};
use crate::reference::RepoRef;
use crate::remote::{Contents, FetchError, Remote};

/// What a fetch found at the requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    File(FetchedContent),
    Directory(Vec<RemoteNode>),
}

/// Downloads a single file: contents endpoint first, raw endpoint second.
pub struct ContentFetcher<'a, R: ?Sized> {
    remote: &'a R,
    sink: &'a dyn EventSink,
}

impl<'a, R: Remote + ?Sized> ContentFetcher<'a, R> {
    pub fn new(remote: &'a R, sink: &'a dyn EventSink) -> Self {
        Self { remote, sink }
    }

    /// Fetch whatever lives at `target.path`.
    ///
    /// Any failure of the contents endpoint (rate limiting, size ceiling,
    /// non-2xx, bad payload) falls through to the raw endpoint, once. If
    /// that fails too, the raw endpoint's error is returned.
    ///
    /// A directory listing is not a failure. It is returned as-is without
    /// touching the raw endpoint, so the caller can walk it without listing
    /// it again.
    ///
    /// Content is always keyed on the requested path, whichever endpoint
    /// served it.
    pub async fn fetch(&self, target: &RepoRef) -> Result<Fetched, FetchError> {
        let primary = match self.remote.contents(target).await {
            Ok(Contents::File { bytes, .. }) => {
                return Ok(Fetched::File(FetchedContent::new(target.path.clone(), bytes)));
            }
            Ok(Contents::Listing(entries)) => return Ok(Fetched::Directory(entries)),
            Err(e) => e,
        };

        tracing::debug!(path = %target.path, error = %primary, "contents endpoint failed, using raw endpoint");
        self.sink.emit(Event::Fallback {
            path: target.path.clone(),
            reason: primary.to_string(),
        });

        let bytes = self.remote.raw(target).await?;
        Ok(Fetched::File(FetchedContent::new(target.path.clone(), bytes)))
    }

    /// Like [`ContentFetcher::fetch`], but a directory is an error:
    /// [`FetchError::IsDirectory`].
    pub async fn fetch_file(&self, target: &RepoRef) -> Result<FetchedContent, FetchError> {
        match self.fetch(target).await? {
            Fetched::File(content) => Ok(content),
            Fetched::Directory(_) => Err(FetchError::IsDirectory {
                path: target.path.clone(),
            }),
        }
    }
}
