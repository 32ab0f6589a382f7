use std::collections::VecDeque;

use crate::content::{NodeKind, RemoteNode};
use crate::reference::RepoRef;
use crate::remote::{Contents, FetchError, Remote};

/// A directory listing that could not be fetched. The walk carries on
/// with the directory's siblings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not list {path}: {source}")]
pub struct WalkError {
    pub path: String,
    #[source]
    pub source: FetchError,
}

/// Enumerates the files below a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeWalker {
    include_hidden: bool,
}

impl TreeWalker {
    pub fn new(include_hidden: bool) -> Self {
        Self { include_hidden }
    }

    /// Start a fresh depth-first walk rooted at `root`. Nothing is cached
    /// between walks; each call lists the tree again.
    pub fn walk<'a, R: Remote + ?Sized>(&self, remote: &'a R, root: &RepoRef) -> TreeWalk<'a, R> {
        TreeWalk {
            remote,
            root: root.clone(),
            include_hidden: self.include_hidden,
            pending_root: true,
            stack: Vec::new(),
        }
    }

    /// Walk a directory whose listing is already in hand. `root` itself is
    /// not listed again.
    pub fn walk_listing<'a, R: Remote + ?Sized>(
        &self,
        remote: &'a R,
        root: &RepoRef,
        entries: Vec<RemoteNode>,
    ) -> TreeWalk<'a, R> {
        TreeWalk {
            remote,
            root: root.clone(),
            include_hidden: self.include_hidden,
            pending_root: false,
            stack: vec![entries.into()],
        }
    }
}

/// A lazy, depth-first walk. Each [`TreeWalk::next`] call lists at most as
/// many directories as it takes to reach the next file.
pub struct TreeWalk<'a, R: ?Sized> {
    remote: &'a R,
    root: RepoRef,
    include_hidden: bool,
    pending_root: bool,
    stack: Vec<VecDeque<RemoteNode>>,
}

impl<R: Remote + ?Sized> TreeWalk<'_, R> {
    /// The directory this walk started from.
    pub fn root(&self) -> &RepoRef {
        &self.root
    }

    /// The next file node, a listing failure, or `None` when the walk is done.
    ///
    /// Entries keep the order the remote listed them in. Directories are
    /// expanded as soon as they are reached.
    pub async fn next(&mut self) -> Option<Result<RemoteNode, WalkError>> {
        if self.pending_root {
            self.pending_root = false;
            let root_path = self.root.path.clone();
            if let Some(item) = self.expand(root_path).await {
                return Some(item);
            }
        }

        loop {
            let frame = self.stack.last_mut()?;
            let Some(node) = frame.pop_front() else {
                self.stack.pop();
                continue;
            };

            if !self.include_hidden && node.is_hidden() {
                tracing::debug!(path = %node.path, "skipping hidden entry");
                continue;
            }

            match node.kind {
                NodeKind::File => return Some(Ok(node)),
                NodeKind::Directory => {
                    if let Some(item) = self.expand(node.path).await {
                        return Some(item);
                    }
                }
            }
        }
    }

    /// Drain the walk into a vector.
    pub async fn collect(mut self) -> Vec<Result<RemoteNode, WalkError>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item);
        }
        items
    }

    /// List `path`. A listing is pushed onto the stack and yields nothing;
    /// a file where a directory was expected, or a failure, is yielded.
    async fn expand(&mut self, path: String) -> Option<Result<RemoteNode, WalkError>> {
        match self.remote.contents(&self.root.at(path.clone())).await {
            Ok(Contents::Listing(entries)) => {
                tracing::debug!(path = %path, entries = entries.len(), "listed directory");
                self.stack.push(entries.into());
                None
            }
            Ok(Contents::File { path, .. }) => Some(Ok(RemoteNode::file(path))),
            Err(source) => Some(Err(WalkError { path, source })),
        }
    }
}
