use base64::Engine;
use pinfetch::{FetchError, RemoteNode};
use serde::Deserialize;

/// Response from GitHub's Contents API.
/// `GET /repos/{owner}/{repo}/contents/{path}?ref={commit}`
///
/// The endpoint answers with an array for directories and an object for
/// anything else; the shape alone decides the variant.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentsPayload {
    Listing(Vec<ContentEntry>),
    File(ContentResponse),
}

/// Entry `type` as reported by the Contents API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One element of a directory listing.
#[derive(Debug, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub sha: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl ContentEntry {
    /// Directories and downloadable files; submodules and unknown types are dropped.
    pub fn into_node(self) -> Option<RemoteNode> {
        let node = match self.entry_type {
            EntryType::Dir => RemoteNode::directory(self.path),
            EntryType::File | EntryType::Symlink => RemoteNode::file(self.path),
            EntryType::Submodule | EntryType::Other => return None,
        };
        Some(RemoteNode {
            sha: self.sha,
            ..node
        })
    }
}

/// Metadata for a single file, with inline content under the size ceiling.
#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub path: String,
    pub sha: Option<String>,
    #[serde(default)]
    pub size: u64,
    pub content: Option<String>,
    pub encoding: Option<String>,
}

impl ContentResponse {
    /// Decode the inline content to raw bytes.
    ///
    /// Files past the inline ceiling come back with `encoding: "none"` and an
    /// empty `content`; those report [`FetchError::TooLarge`].
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        if self.entry_type != EntryType::File {
            return Err(self.malformed(format!("expected a file, got {:?}", self.entry_type)));
        }

        let content = self.content.as_deref().unwrap_or_default();
        let too_large = self.size > 0 && content.is_empty();

        match self.encoding.as_deref() {
            Some("none") => Err(self.too_large()),
            _ if too_large => Err(self.too_large()),
            Some("base64") | None => {
                // GitHub returns base64 with newlines embedded
                let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();
                base64::engine::general_purpose::STANDARD
                    .decode(&cleaned)
                    .map_err(|e| self.malformed(format!("base64 decode failed: {e}")))
            }
            Some(other) => Err(self.malformed(format!("unsupported encoding `{other}`"))),
        }
    }

    fn too_large(&self) -> FetchError {
        FetchError::TooLarge {
            path: self.path.clone(),
        }
    }

    fn malformed(&self, detail: String) -> FetchError {
        FetchError::Malformed {
            path: self.path.clone(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use pinfetch::NodeKind;

    use super::*;

    fn parse(json: &str) -> ContentsPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn array_is_a_listing() {
        let payload = parse(
            r#"[{"name":"a.txt","path":"src/a.txt","sha":"abc","type":"file"},
                {"name":"lib","path":"src/lib","sha":"def","type":"dir"}]"#,
        );
        let ContentsPayload::Listing(entries) = payload else {
            panic!("expected listing");
        };
        let nodes: Vec<RemoteNode> = entries.into_iter().filter_map(ContentEntry::into_node).collect();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, NodeKind::File);
        assert_eq!(nodes[0].sha.as_deref(), Some("abc"));
        assert_eq!(nodes[1].kind, NodeKind::Directory);
    }

    #[test]
    fn object_is_a_file() {
        let payload = parse(
            r#"{"type":"file","path":"a.txt","sha":"abc","size":5,"content":"aGVs\nbG8=\n","encoding":"base64"}"#,
        );
        let ContentsPayload::File(file) = payload else {
            panic!("expected file");
        };
        assert_eq!(file.decode().unwrap(), b"hello");
    }

    #[test]
    fn submodules_and_unknown_types_are_dropped() {
        let payload = parse(
            r#"[{"name":"sub","path":"sub","sha":"1","type":"submodule"},
                {"name":"odd","path":"odd","sha":"2","type":"something-new"},
                {"name":"link","path":"link","sha":"3","type":"symlink"}]"#,
        );
        let ContentsPayload::Listing(entries) = payload else {
            panic!("expected listing");
        };
        let nodes: Vec<RemoteNode> = entries.into_iter().filter_map(ContentEntry::into_node).collect();
        assert_eq!(nodes, vec![RemoteNode { sha: Some("3".into()), ..RemoteNode::file("link") }]);
    }

    #[test]
    fn encoding_none_is_too_large() {
        let file = ContentResponse {
            entry_type: EntryType::File,
            path: "big.bin".into(),
            sha: None,
            size: 2_000_000,
            content: Some(String::new()),
            encoding: Some("none".into()),
        };
        assert_eq!(file.decode(), Err(FetchError::TooLarge { path: "big.bin".into() }));
    }

    #[test]
    fn empty_file_decodes_to_nothing() {
        let file = ContentResponse {
            entry_type: EntryType::File,
            path: "empty.txt".into(),
            sha: None,
            size: 0,
            content: Some(String::new()),
            encoding: Some("base64".into()),
        };
        assert_eq!(file.decode().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn invalid_base64_is_malformed() {
        let file = ContentResponse {
            entry_type: EntryType::File,
            path: "a.txt".into(),
            sha: None,
            size: 3,
            content: Some("!!!".into()),
            encoding: Some("base64".into()),
        };
        assert!(matches!(file.decode(), Err(FetchError::Malformed { .. })));
    }

    #[test]
    fn symlink_object_is_malformed() {
        let payload = parse(r#"{"type":"symlink","path":"link","target":"a.txt","size":5}"#);
        let ContentsPayload::File(file) = payload else {
            panic!("expected single object");
        };
        assert!(matches!(file.decode(), Err(FetchError::Malformed { .. })));
    }
}
