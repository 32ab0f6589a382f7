mod config;
mod logging;
mod prompt;
mod sink;
mod summary;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pinfetch::{FetchError, Orchestrator, RunOptions};
use pinfetch_github::{GitHubClient, GitHubClientConfig};

use crate::config::EnvFile;
use crate::sink::TracingSink;

const URL_PROMPT: &str =
    "Enter GitHub URL (e.g., https://github.com/owner/repo/tree/commit/path): ";

#[derive(Parser)]
#[command(name = "pinfetch")]
#[command(about = "Download a file or folder from a GitHub URL pinned to a commit")]
struct Cli {
    /// GitHub URL: https://github.com/<owner>/<repo>/(tree|blob)/<commit>/<path>.
    /// Prompted for when omitted.
    url: Option<String>,
    /// Base folder for downloads
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Also download dotfiles and dot-directories
    #[arg(long)]
    include_hidden: bool,
    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load_settings();
    let _log_guard = logging::init(cli.verbose, &settings.log_dir());

    match config::prepare_env_file(Path::new(config::ENV_FILE)) {
        Ok(EnvFile::Loaded) => {}
        Ok(EnvFile::TemplateWritten) => tracing::warn!(
            "created a template {} file; fill in GITHUB_USERNAME and GITHUB_TOKEN for authenticated requests",
            config::ENV_FILE
        ),
        Err(e) => tracing::warn!("could not read {}: {e}", config::ENV_FILE),
    }

    let credentials = config::load_credentials();
    let client = GitHubClient::new(GitHubClientConfig {
        credentials: credentials.clone(),
        api_base_url: settings.api_base_url.clone(),
        raw_base_url: settings.raw_base_url.clone(),
    });

    if credentials.is_anonymous() {
        tracing::warn!("no GITHUB_TOKEN configured; using unauthenticated requests with lower rate limits");
    } else {
        match client.verify_credentials().await {
            Ok(login) => tracing::info!(%login, "authenticated"),
            Err(FetchError::Status { status: 401, .. }) => {
                bail!("GitHub rejected the configured credentials; check GITHUB_USERNAME and GITHUB_TOKEN")
            }
            Err(e) => tracing::warn!("could not verify credentials: {e}"),
        }
    }

    let url = match cli.url {
        Some(url) => url,
        None => prompt::ask(URL_PROMPT).context("failed to read URL")?,
    };
    let pinned = pinfetch::parse_url(&url).context("invalid GitHub URL")?;
    let target = &pinned.target;
    tracing::info!(
        owner = %target.owner,
        repo = %target.repo,
        commit = %target.commit,
        path = %target.path,
        "resolved URL"
    );

    if !cli.yes && !prompt::confirm("Continue with download?").context("failed to read answer")? {
        println!("Download cancelled.");
        return Ok(());
    }

    let options = RunOptions {
        output_dir: cli.output.unwrap_or(settings.output_dir),
        include_hidden: cli.include_hidden || settings.include_hidden,
    };
    let orchestrator = Orchestrator::new(client, TracingSink, options);

    let started = Instant::now();
    let summary = orchestrator.run_pinned(&pinned).await;
    print!("{}", summary::render(&summary, started.elapsed()));

    if !summary.is_complete_success() {
        bail!(
            "{} of {} items failed to download",
            summary.failures().len(),
            summary.total_attempted()
        );
    }

    Ok(())
}
