use std::path::{Path, PathBuf};

use pinfetch::Credentials;
use serde::{Deserialize, Serialize};

/// Credentials file read from the working directory.
pub const ENV_FILE: &str = ".env";

const USERNAME_VAR: &str = "GITHUB_USERNAME";
const TOKEN_VAR: &str = "GITHUB_TOKEN";

const USERNAME_PLACEHOLDER: &str = "your_username";
const TOKEN_PLACEHOLDER: &str = "your_personal_access_token";

/// Application settings from `~/.config/pinfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Folder for `download_log.txt`. Defaults to the working directory.
    pub log_dir: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub raw_base_url: Option<String>,
    #[serde(default)]
    pub include_hidden: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            log_dir: None,
            api_base_url: None,
            raw_base_url: None,
            include_hidden: false,
        }
    }
}

impl Settings {
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("github_download")
}

/// Config file path: `~/.config/pinfetch/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pinfetch").join("config.toml"))
}

/// Load settings from file, falling back to defaults if missing.
pub fn load_settings() -> Settings {
    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        if let Ok(settings) = toml::from_str::<Settings>(&contents) {
            return settings;
        }
        eprintln!(
            "warning: failed to parse config at {}, using defaults",
            path.display()
        );
    }

    Settings::default()
}

/// What happened to the credentials file on startup.
#[derive(Debug, PartialEq, Eq)]
pub enum EnvFile {
    Loaded,
    TemplateWritten,
}

/// Load `path` into the process environment, or write a template there if
/// it does not exist yet. Variables already set in the environment win.
pub fn prepare_env_file(path: &Path) -> Result<EnvFile, std::io::Error> {
    if path.exists() {
        dotenvy::from_path(path).map_err(|e| std::io::Error::other(e.to_string()))?;
        return Ok(EnvFile::Loaded);
    }

    std::fs::write(path, env_template())?;
    Ok(EnvFile::TemplateWritten)
}

fn env_template() -> String {
    format!(
        "# GitHub credentials\n{USERNAME_VAR}={USERNAME_PLACEHOLDER}\n{TOKEN_VAR}={TOKEN_PLACEHOLDER}\n"
    )
}

/// Build credentials from a variable lookup. Template placeholders count as unset.
pub fn credentials_from(lookup: impl Fn(&str) -> Option<String>) -> Credentials {
    let read = |var: &str, placeholder: &str| lookup(var).filter(|v| v.trim() != placeholder);
    Credentials::new(
        read(USERNAME_VAR, USERNAME_PLACEHOLDER),
        read(TOKEN_VAR, TOKEN_PLACEHOLDER),
    )
}

/// Credentials from the process environment.
pub fn load_credentials() -> Credentials {
    credentials_from(|var| std::env::var(var).ok())
}
