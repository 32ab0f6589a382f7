/// Whether a directory entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// One entry of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNode {
    /// Path relative to the repository root.
    pub path: String,
    pub kind: NodeKind,
    pub sha: Option<String>,
}

impl RemoteNode {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::File,
            sha: None,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::Directory,
            sha: None,
        }
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// True for dotfiles and dot-directories.
    pub fn is_hidden(&self) -> bool {
        self.name().starts_with('.')
    }
}

/// How a fetched file is written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Text,
    Binary,
}

/// Classify raw bytes as text or binary.
///
/// Binary if the bytes contain a NUL or are not valid UTF-8; text otherwise.
/// UTF-16 text and other legacy encodings come out as binary, which only
/// means they are written byte-for-byte.
pub fn classify(bytes: &[u8]) -> Encoding {
    if bytes.contains(&0) || std::str::from_utf8(bytes).is_err() {
        Encoding::Binary
    } else {
        Encoding::Text
    }
}

/// A downloaded file, ready to be written once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedContent {
    pub path: String,
    pub bytes: Vec<u8>,
    pub encoding: Encoding,
}

impl FetchedContent {
    /// Wrap raw bytes, classifying them on the way in.
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        let encoding = classify(&bytes);
        Self {
            path: path.into(),
            bytes,
            encoding,
        }
    }

    /// Decoded text, or `None` for binary content.
    pub fn text(&self) -> Option<&str> {
        match self.encoding {
            Encoding::Text => std::str::from_utf8(&self.bytes).ok(),
            Encoding::Binary => None,
        }
    }
}
