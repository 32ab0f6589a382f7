use pinfetch::{Contents, Credentials, FetchError, Remote, RepoRef};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::Deserialize;
use url::Url;

use crate::content::{ContentEntry, ContentsPayload};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Configuration for a [`GitHubClient`].
#[derive(Debug, Clone, Default)]
pub struct GitHubClientConfig {
    pub credentials: Credentials,
    pub api_base_url: Option<String>,
    pub raw_base_url: Option<String>,
}

/// Talks to the GitHub Contents API and the raw-content host.
///
/// Each method issues exactly one request. Retrying, falling back and
/// walking directories are left to the caller.
pub struct GitHubClient {
    config: GitHubClientConfig,
    client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(config: GitHubClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn api_base(&self) -> &str {
        self.config
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    fn raw_base(&self) -> &str {
        self.config
            .raw_base_url
            .as_deref()
            .unwrap_or(DEFAULT_RAW_BASE)
            .trim_end_matches('/')
    }

    fn contents_url(&self, target: &RepoRef) -> Result<Url, FetchError> {
        let prefix = ["repos", target.owner.as_str(), target.repo.as_str(), "contents"];
        let mut url = endpoint(self.api_base(), prefix.into_iter().chain(path_segments(target)))
            .map_err(|detail| invalid_url(target, detail))?;
        url.query_pairs_mut().append_pair("ref", &target.commit);
        Ok(url)
    }

    fn raw_url(&self, target: &RepoRef) -> Result<Url, FetchError> {
        let prefix = [target.owner.as_str(), target.repo.as_str(), target.commit.as_str()];
        endpoint(self.raw_base(), prefix.into_iter().chain(path_segments(target)))
            .map_err(|detail| invalid_url(target, detail))
    }

    /// Basic auth when a username is configured, bearer token otherwise.
    fn build_request(&self, url: Url) -> reqwest::RequestBuilder {
        let req = self.client.get(url).header("User-Agent", "pinfetch");

        let creds = &self.config.credentials;
        match (&creds.username, &creds.token) {
            (Some(username), Some(token)) => req.basic_auth(username, Some(token)),
            (None, Some(token)) => req.header("Authorization", format!("Bearer {token}")),
            (_, None) => req,
        }
    }

    async fn send(&self, url: Url, path: &str) -> Result<reqwest::Response, FetchError> {
        let response = self
            .build_request(url)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                path: path.to_owned(),
                detail: e.to_string(),
            })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(classify_failure(path, response).await)
        }
    }

    /// Check the configured credentials against `GET /user`.
    /// Returns the authenticated login.
    pub async fn verify_credentials(&self) -> Result<String, FetchError> {
        let url = endpoint(self.api_base(), ["user"]).map_err(|detail| FetchError::Network {
            path: "user".into(),
            detail,
        })?;
        let user: AuthenticatedUser = self
            .send(url, "user")
            .await?
            .json()
            .await
            .map_err(|e| FetchError::Malformed {
                path: "user".into(),
                detail: e.to_string(),
            })?;
        Ok(user.login)
    }
}

#[async_trait::async_trait]
impl Remote for GitHubClient {
    async fn contents(&self, target: &RepoRef) -> Result<Contents, FetchError> {
        let url = self.contents_url(target)?;
        let payload: ContentsPayload = self
            .send(url, &target.path)
            .await?
            .json()
            .await
            .map_err(|e| FetchError::Malformed {
                path: target.path.clone(),
                detail: e.to_string(),
            })?;

        match payload {
            ContentsPayload::Listing(entries) => Ok(Contents::Listing(
                entries.into_iter().filter_map(ContentEntry::into_node).collect(),
            )),
            ContentsPayload::File(file) => {
                let bytes = file.decode()?;
                Ok(Contents::File {
                    path: file.path,
                    bytes,
                })
            }
        }
    }

    async fn raw(&self, target: &RepoRef) -> Result<Vec<u8>, FetchError> {
        let url = self.raw_url(target)?;
        tracing::debug!(%url, "fetching raw content");

        let bytes = self
            .send(url, &target.path)
            .await?
            .bytes()
            .await
            .map_err(|e| FetchError::Network {
                path: target.path.clone(),
                detail: e.to_string(),
            })?;
        Ok(bytes.to_vec())
    }
}

/// `base` with `segments` appended. Each segment is percent-encoded on its
/// own, so `#`, `?` and spaces in file names stay part of the path.
fn endpoint<'a>(base: &str, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|e| format!("invalid base URL `{base}`: {e}"))?;
    url.path_segments_mut()
        .map_err(|()| format!("base URL `{base}` cannot take a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn path_segments(target: &RepoRef) -> impl Iterator<Item = &str> {
    target.path.split('/').filter(|seg| !seg.is_empty())
}

fn invalid_url(target: &RepoRef, detail: String) -> FetchError {
    FetchError::Network {
        path: target.path.clone(),
        detail,
    }
}

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    login: String,
}

/// Map a non-2xx response onto a [`FetchError`].
async fn classify_failure(path: &str, response: reqwest::Response) -> FetchError {
    let status = response.status();
    let rate_limit_headers = has_rate_limit_headers(response.headers());
    let body = response.text().await.unwrap_or_default();
    let path = path.to_owned();

    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound { path },
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited { path },
        StatusCode::FORBIDDEN
            if rate_limit_headers || body.to_lowercase().contains("rate limit") =>
        {
            FetchError::RateLimited { path }
        }
        StatusCode::FORBIDDEN if body.contains("too_large") => FetchError::TooLarge { path },
        _ => FetchError::Status {
            path,
            status: status.as_u16(),
        },
    }
}

fn has_rate_limit_headers(headers: &HeaderMap) -> bool {
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .is_some_and(|v| v.as_bytes() == b"0");
    exhausted || headers.contains_key(RETRY_AFTER)
}
