//! Exchange an app JWT for an installation access token.

use tracing::info;

use crate::error::TokenError;
use crate::github::client::GithubApi;

/// Resolve the organization's installation and mint an access token for it.
///
/// The two API calls are strictly ordered: the token request depends on the
/// installation id, and the first failure aborts the exchange. Retrying is
/// left to the caller.
pub async fn exchange_installation_token(
    api: &dyn GithubApi,
    org: &str,
) -> Result<String, TokenError> {
    let installation_id = api.get_org_installation(org).await?;
    info!("Resolved installation {} for {}", installation_id, org);

    let token = api.create_installation_token(installation_id).await?;
    info!("Created installation access token");

    Ok(token)
}
