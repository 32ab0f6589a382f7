use std::path::PathBuf;

use crate::content::FetchedContent;
use crate::event::{Event, EventSink};
use crate::fetch::{ContentFetcher, Fetched};
use crate::outcome::{DownloadOutcome, Summary};
use crate::reference::{self, KindHint, PinnedUrl, RepoRef, UrlError};
use crate::remote::{Contents, Remote};
use crate::walk::{TreeWalk, TreeWalker};
use crate::write::DownloadWriter;

/// Settings for a download run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Base folder; each run writes into `<output_dir>/<repo>_<commit>/`.
    pub output_dir: PathBuf,
    /// Download dotfiles and dot-directories too.
    pub include_hidden: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("github_download"),
            include_hidden: false,
        }
    }
}

/// Resolves a URL and downloads everything it points at, one item at a time.
pub struct Orchestrator<R, S> {
    remote: R,
    sink: S,
    options: RunOptions,
}

impl<R: Remote, S: EventSink> Orchestrator<R, S> {
    pub fn new(remote: R, sink: S, options: RunOptions) -> Self {
        Self {
            remote,
            sink,
            options,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Where a download of `target` is written.
    pub fn destination_for(&self, target: &RepoRef) -> PathBuf {
        self.options.output_dir.join(target.destination_name())
    }

    /// Parse `url` and download it.
    ///
    /// Only a malformed URL fails the run, and it does so before any request
    /// is made. Per-item failures are recorded in the returned summary.
    pub async fn run(&self, url: &str) -> Result<Summary, UrlError> {
        let pinned = reference::parse(url)?;
        Ok(self.run_pinned(&pinned).await)
    }

    /// Download an already-parsed URL.
    pub async fn run_pinned(&self, pinned: &PinnedUrl) -> Summary {
        let target = &pinned.target;
        let destination = self.destination_for(target);
        self.sink.emit(Event::Started {
            target: target.clone(),
            destination: destination.display().to_string(),
        });

        let writer = DownloadWriter::new(destination.clone());
        let mut outcomes = Vec::new();

        // The first response decides file vs directory; the hint only picks
        // whether a failure there may fall back to the raw endpoint.
        let found = match pinned.hint {
            KindHint::Blob => self.fetcher().fetch(target).await,
            KindHint::Tree => self.remote.contents(target).await.map(|contents| match contents {
                Contents::File { bytes, .. } => {
                    Fetched::File(FetchedContent::new(target.path.clone(), bytes))
                }
                Contents::Listing(entries) => Fetched::Directory(entries),
            }),
        };

        match found {
            Ok(Fetched::File(item)) => self.record(store(&writer, &item), &mut outcomes),
            Ok(Fetched::Directory(entries)) => {
                if pinned.hint == KindHint::Blob {
                    tracing::debug!(path = %target.path, "blob URL points at a directory; walking it");
                }
                let walk = self.walker().walk_listing(&self.remote, target, entries);
                self.download_tree(walk, &writer, &mut outcomes).await;
            }
            Err(e) => self.record(DownloadOutcome::from_fetch(&target.path, &e), &mut outcomes),
        }

        let summary = Summary {
            destination,
            outcomes,
        };
        self.sink.emit(Event::finished(&summary));
        summary
    }

    fn fetcher(&self) -> ContentFetcher<'_, R> {
        ContentFetcher::new(&self.remote, &self.sink)
    }

    fn walker(&self) -> TreeWalker {
        TreeWalker::new(self.options.include_hidden)
    }

    async fn download_tree(
        &self,
        mut walk: TreeWalk<'_, R>,
        writer: &DownloadWriter,
        outcomes: &mut Vec<DownloadOutcome>,
    ) {
        while let Some(item) = walk.next().await {
            let outcome = match item {
                Ok(node) => {
                    let target = walk.root().at(node.path);
                    match self.fetcher().fetch_file(&target).await {
                        Ok(fetched) => store(writer, &fetched),
                        Err(e) => DownloadOutcome::from_fetch(&target.path, &e),
                    }
                }
                Err(e) => DownloadOutcome::from_fetch(&e.path, &e.source),
            };
            self.record(outcome, outcomes);
        }
    }

    fn record(&self, outcome: DownloadOutcome, outcomes: &mut Vec<DownloadOutcome>) {
        self.sink.emit(Event::Item(outcome.clone()));
        outcomes.push(outcome);
    }
}

fn store(writer: &DownloadWriter, item: &FetchedContent) -> DownloadOutcome {
    match writer.write(item) {
        Ok(_) => DownloadOutcome::succeeded(&item.path),
        Err(e) => DownloadOutcome::from_write(&item.path, &e),
    }
}
