use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Contents, Event, EventSink, FetchError, RemoteNode, Remote, RepoRef};

/// In-memory repository for testing. Serves files and listings by path,
/// with optional per-path failures on the contents endpoint.
///
/// The raw endpoint serves every added file and reports `NotFound` otherwise,
/// so a contents failure on a known file exercises the fallback path.
#[derive(Default)]
pub struct InMemoryRemote {
    files: HashMap<String, Vec<u8>>,
    dirs: HashMap<String, Vec<RemoteNode>>,
    contents_failures: HashMap<String, FetchError>,
    raw_failures: HashMap<String, FetchError>,
    reported_paths: HashMap<String, String>,
    contents_calls: AtomicUsize,
    raw_calls: AtomicUsize,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: &str, bytes: &[u8]) {
        self.files.insert(path.to_owned(), bytes.to_vec());
    }

    pub fn add_dir(&mut self, path: &str, entries: Vec<RemoteNode>) {
        self.dirs.insert(path.to_owned(), entries);
    }

    pub fn fail_contents(&mut self, path: &str, error: FetchError) {
        self.contents_failures.insert(path.to_owned(), error);
    }

    pub fn fail_raw(&mut self, path: &str, error: FetchError) {
        self.raw_failures.insert(path.to_owned(), error);
    }

    /// Make the contents endpoint report `reported` as the path of the file
    /// at `path`.
    pub fn report_file_as(&mut self, path: &str, reported: &str) {
        self.reported_paths.insert(path.to_owned(), reported.to_owned());
    }

    pub fn contents_calls(&self) -> usize {
        self.contents_calls.load(Ordering::SeqCst)
    }

    pub fn raw_calls(&self) -> usize {
        self.raw_calls.load(Ordering::SeqCst)
    }

    /// Total requests of either kind.
    pub fn requests(&self) -> usize {
        self.contents_calls() + self.raw_calls()
    }
}

#[async_trait::async_trait]
impl Remote for InMemoryRemote {
    async fn contents(&self, target: &RepoRef) -> Result<Contents, FetchError> {
        self.contents_calls.fetch_add(1, Ordering::SeqCst);
        let path = &target.path;

        if let Some(err) = self.contents_failures.get(path) {
            return Err(err.clone());
        }
        if let Some(entries) = self.dirs.get(path) {
            return Ok(Contents::Listing(entries.clone()));
        }
        self.files
            .get(path)
            .map(|bytes| Contents::File {
                path: self.reported_paths.get(path).unwrap_or(path).clone(),
                bytes: bytes.clone(),
            })
            .ok_or_else(|| FetchError::NotFound { path: path.clone() })
    }

    async fn raw(&self, target: &RepoRef) -> Result<Vec<u8>, FetchError> {
        self.raw_calls.fetch_add(1, Ordering::SeqCst);
        let path = &target.path;

        if let Some(err) = self.raw_failures.get(path) {
            return Err(err.clone());
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound { path: path.clone() })
    }
}

/// Sink that keeps every event for later inspection.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
