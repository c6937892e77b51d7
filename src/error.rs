//! Crate-wide error type for the token exchange.
//!
//! Every failure is terminal for a run: the tool either prints a valid
//! installation token or exits non-zero. Nothing here is retried.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while exchanging App credentials for an installation token
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("{0} is not set")]
    ConfigMissing(&'static str),

    #[error("Failed to parse private key PEM: {0}")]
    InvalidKeyFormat(String),

    #[error("Failed to sign app JWT: {0}")]
    SigningFailed(String),

    #[error("GitHub rejected the app JWT: {0}")]
    AuthenticationFailed(String),

    #[error("Organization {0} has no installation of this app")]
    InstallationNotFound(String),

    #[error("Failed to create installation token: {0}")]
    TokenCreationFailed(String),

    #[error("Unexpected GitHub API response {status}: {body}")]
    UnexpectedResponse { status: StatusCode, body: String },

    #[error("GitHub API request failed: {0}")]
    Request(#[from] reqwest::Error),
}
