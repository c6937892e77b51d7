//! CLI for the gh-app-token command.
//!
//! Every flag falls back to an environment variable so the tool drops into
//! CI jobs without argument plumbing. The key can be passed inline
//! (`--private-key` / `PRIVATE_KEY`) or as a file path
//! (`--private-key-file` / `PRIVATE_KEY_FILE`).

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{Config, DEFAULT_API_URL};
use crate::github::{exchange_installation_token, AppJwtSigner, GithubApiClient};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "gh-app-token")]
#[command(author, version, about = "Exchange a GitHub App private key for an installation access token", long_about = None)]
pub struct Cli {
    /// PEM-encoded RSA private key of the GitHub App
    #[arg(short = 'p', long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Path to a PEM file holding the private key
    #[arg(long, env = "PRIVATE_KEY_FILE", conflicts_with = "private_key")]
    pub private_key_file: Option<PathBuf>,

    /// GitHub App ID, used as the JWT issuer
    #[arg(short = 'a', long, env = "APP_ID")]
    pub app_id: Option<String>,

    /// Organization login whose installation token is requested
    #[arg(short = 'o', long, env = "ORG")]
    pub org: Option<String>,

    /// GitHub API base URL (override for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api_url: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Run the exchange and return the installation token.
pub async fn run(cli: Cli) -> Result<String> {
    let private_key = match (cli.private_key, cli.private_key_file) {
        (key @ Some(_), _) => key,
        (None, Some(path)) => Some(
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read private key file {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let config = Config::new(private_key, cli.app_id, cli.org, cli.github_api_url)?;

    let signer = AppJwtSigner::new(&config.private_key, &config.app_id)?;
    let jwt = signer.sign()?;
    debug!("Signed app JWT for app {}", config.app_id);

    let api = GithubApiClient::new(&config.github_api_url, jwt);
    let token = exchange_installation_token(&api, &config.org).await?;

    Ok(token)
}
