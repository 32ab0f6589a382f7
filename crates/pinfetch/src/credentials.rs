use std::fmt;

/// GitHub credentials for one run. Either field may be absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub token: Option<String>,
}

impl Credentials {
    pub fn new(username: Option<String>, token: Option<String>) -> Self {
        Self {
            username: username.filter(|s| !s.trim().is_empty()),
            token: token.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// True when no token is available. Requests still go out, at lower rate limits.
    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
