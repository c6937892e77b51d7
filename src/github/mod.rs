//! GitHub App authentication.
//!
//! GitHub Apps use two types of credentials:
//! 1. App JWT - Short-lived JWT signed with the app's private key (proves app identity)
//! 2. Installation Access Token - Token scoped to a single installation (for org/repo operations)
//!
//! This module signs the former and exchanges it for the latter.

pub mod client;
pub mod jwt;
pub mod token;

pub use client::{GithubApi, GithubApiClient};
pub use jwt::AppJwtSigner;
pub use token::exchange_installation_token;
