//! HTTP client for the two GitHub Apps endpoints the token exchange needs.
//!
//! The API surface is a two-method trait so the exchange logic can be tested
//! against a fake without network access. The real implementation
//! authenticates every request with the app JWT.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::error::TokenError;

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("gh-app-token/", env!("CARGO_PKG_VERSION"));

/// The GitHub Apps API operations used by the exchange.
#[async_trait]
pub trait GithubApi {
    /// Resolve the installation id of this app for an organization.
    async fn get_org_installation(&self, org: &str) -> Result<i64, TokenError>;

    /// Create an installation access token for `installation_id`.
    async fn create_installation_token(&self, installation_id: i64) -> Result<String, TokenError>;
}

#[derive(Debug, Deserialize)]
struct Installation {
    id: i64,
}

/// Response from GitHub's installation access token endpoint.
#[derive(Debug, Deserialize)]
pub struct InstallationTokenResponse {
    pub token: String,
    pub expires_at: String,
    pub permissions: serde_json::Value,
    pub repository_selection: Option<String>,
}

/// reqwest-backed `GithubApi` authenticated with an app JWT.
pub struct GithubApiClient {
    client: reqwest::Client,
    base_url: String,
    jwt: String,
}

impl GithubApiClient {
    /// Create a client against `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>, jwt: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            jwt: jwt.into(),
        }
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.jwt))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }
}

/// Map a failed installation lookup response to an error.
fn lookup_error(org: &str, status: StatusCode, body: String) -> TokenError {
    match status {
        StatusCode::NOT_FOUND => TokenError::InstallationNotFound(org.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TokenError::AuthenticationFailed(format!("{} - {}", status, body))
        }
        _ => TokenError::UnexpectedResponse { status, body },
    }
}

/// Map a failed token creation response to an error.
fn creation_error(status: StatusCode, body: String) -> TokenError {
    match status {
        StatusCode::UNAUTHORIZED => {
            TokenError::AuthenticationFailed(format!("{} - {}", status, body))
        }
        _ => TokenError::TokenCreationFailed(format!("{} - {}", status, body)),
    }
}

#[async_trait]
impl GithubApi for GithubApiClient {
    async fn get_org_installation(&self, org: &str) -> Result<i64, TokenError> {
        let url = format!("{}/orgs/{}/installation", self.base_url, org);
        debug!("Resolving installation for {} at {}", org, url);

        let response = self.request(reqwest::Method::GET, url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(lookup_error(org, status, body));
        }

        let installation: Installation = response.json().await?;
        Ok(installation.id)
    }

    async fn create_installation_token(&self, installation_id: i64) -> Result<String, TokenError> {
        let url = format!(
            "{}/app/installations/{}/access_tokens",
            self.base_url, installation_id
        );
        debug!("Requesting installation access token at {}", url);

        let response = self.request(reqwest::Method::POST, url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(creation_error(status, body));
        }

        let token_response: InstallationTokenResponse = response.json().await?;
        Ok(token_response.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_404_means_no_installation() {
        let err = lookup_error("acme", StatusCode::NOT_FOUND, String::new());
        assert!(matches!(err, TokenError::InstallationNotFound(org) if org == "acme"));
    }

    #[test]
    fn lookup_401_means_rejected_jwt() {
        let err = lookup_error("acme", StatusCode::UNAUTHORIZED, "bad credentials".into());
        assert!(matches!(err, TokenError::AuthenticationFailed(_)));
    }

    #[test]
    fn lookup_other_statuses_are_unexpected() {
        let err = lookup_error("acme", StatusCode::INTERNAL_SERVER_ERROR, String::new());
        assert!(matches!(err, TokenError::UnexpectedResponse { .. }));
    }

    #[test]
    fn creation_401_means_rejected_jwt() {
        let err = creation_error(StatusCode::UNAUTHORIZED, String::new());
        assert!(matches!(err, TokenError::AuthenticationFailed(_)));
    }

    #[test]
    fn creation_failures_map_to_token_creation_failed() {
        for status in [
            StatusCode::FORBIDDEN,
            StatusCode::UNPROCESSABLE_ENTITY,
            StatusCode::TOO_MANY_REQUESTS,
        ] {
            let err = creation_error(status, String::new());
            assert!(matches!(err, TokenError::TokenCreationFailed(_)));
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = GithubApiClient::new("https://api.github.com/", "jwt");
        assert_eq!(client.base_url, "https://api.github.com");
    }
}
