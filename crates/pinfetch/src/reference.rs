use std::fmt;

/// A location inside a repository, pinned to one commit.
///
/// `path` is relative to the repository root and may be empty (the root itself).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    pub commit: String,
    pub path: String,
}

impl RepoRef {
    /// A reference to another path at the same owner/repo/commit.
    pub fn at(&self, path: impl Into<String>) -> Self {
        Self {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            commit: self.commit.clone(),
            path: path.into(),
        }
    }

    /// Commit abbreviated to seven characters, as git prints it.
    pub fn short_commit(&self) -> &str {
        match self.commit.char_indices().nth(7) {
            Some((idx, _)) => &self.commit[..idx],
            None => &self.commit,
        }
    }

    /// Name of the local folder a download of this reference lands in.
    ///
    /// Uses the commit exactly as written in the URL, so two abbreviations
    /// of different lengths for the same commit land in different folders.
    /// Abbreviating further here would let distinct commits that share a
    /// prefix overwrite each other.
    pub fn destination_name(&self) -> String {
        format!("{}_{}", self.repo, self.commit)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.short_commit())?;
        if !self.path.is_empty() {
            write!(f, ":{}", self.path)?;
        }
        Ok(())
    }
}

/// The `tree` / `blob` marker from the URL. Only a hint: the remote decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindHint {
    Tree,
    Blob,
}

impl KindHint {
    fn parse(segment: &str) -> Option<Self> {
        match segment {
            "tree" => Some(Self::Tree),
            "blob" => Some(Self::Blob),
            _ => None,
        }
    }
}

/// A parsed GitHub URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedUrl {
    pub target: RepoRef,
    pub hint: KindHint,
}

/// The URL does not have the shape `.../<owner>/<repo>/(tree|blob)/<commit>/<path...>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("not a valid URL: {0}")]
    Unparseable(String),

    #[error("unsupported URL scheme `{0}`; expected http or https")]
    Scheme(String),

    #[error("expected <owner>/<repo>/(tree|blob)/<commit>[/<path>], got `{0}`")]
    Shape(String),

    #[error("`{0}` is not a commit hash; branch and tag URLs are not supported")]
    NotACommit(String),

    #[error("blob URL has no file path")]
    EmptyBlobPath,
}

/// Parse a commit-pinned GitHub URL. Pure: no network access.
pub fn parse(input: &str) -> Result<PinnedUrl, UrlError> {
    let url = url::Url::parse(input.trim()).map_err(|e| UrlError::Unparseable(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::Scheme(other.to_owned())),
    }
    if url.host_str().is_none() {
        return Err(UrlError::Unparseable(input.to_owned()));
    }

    let segments: Vec<String> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).map(decode_segment).collect())
        .transpose()?
        .unwrap_or_default();

    let (owner, repo, hint, commit, rest) = match segments.as_slice() {
        [owner, repo, kind, commit, rest @ ..] => {
            let hint = KindHint::parse(kind).ok_or_else(|| UrlError::Shape(url.path().to_owned()))?;
            (owner.as_str(), repo.as_str(), hint, commit.as_str(), rest)
        }
        _ => return Err(UrlError::Shape(url.path().to_owned())),
    };

    if !is_commit_hash(commit) {
        return Err(UrlError::NotACommit(commit.to_owned()));
    }

    let path = rest.join("/");
    if hint == KindHint::Blob && path.is_empty() {
        return Err(UrlError::EmptyBlobPath);
    }

    Ok(PinnedUrl {
        target: RepoRef {
            owner: owner.to_owned(),
            repo: repo.to_owned(),
            commit: commit.to_owned(),
            path,
        },
        hint,
    })
}

/// GitHub percent-encodes spaces and non-ASCII names in its links; paths
/// are kept decoded so they match what the API reports.
fn decode_segment(segment: &str) -> Result<String, UrlError> {
    percent_encoding::percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UrlError::Unparseable(format!("`{segment}` is not valid UTF-8 once decoded")))
}

/// Abbreviated (7+) or full SHA-1/SHA-256 object names.
fn is_commit_hash(segment: &str) -> bool {
    (7..=64).contains(&segment.len()) && segment.chars().all(|c| c.is_ascii_hexdigit())
}
