//! Credential resolution and bearer-token management.
//!
//! Token *acquisition* is delegated to an external OAuth provider: the server
//! either consumes a pre-issued access token or exchanges a long-lived
//! refresh token. There is no interactive flow and no service-account JWT
//! signing here.

use crate::error::DriveError;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Refresh slightly before expiry so in-flight requests never race the clock.
const EXPIRY_LEEWAY: Duration = Duration::from_secs(60);

/// Where the bearer token comes from.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// A pre-issued access token, managed entirely outside this process.
    AccessToken(String),
    /// OAuth refresh-token exchange.
    RefreshToken {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
}

impl Credentials {
    /// Resolves credentials from the environment.
    ///
    /// Prefers `GOOGLE_ACCESS_TOKEN`; falls back to the
    /// `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` / `GOOGLE_REFRESH_TOKEN`
    /// triple. Missing credentials fail startup rather than first use.
    pub fn from_env() -> crate::error::Result<Self> {
        if let Ok(token) = std::env::var("GOOGLE_ACCESS_TOKEN") {
            return Ok(Self::AccessToken(token));
        }

        match (
            std::env::var("GOOGLE_CLIENT_ID"),
            std::env::var("GOOGLE_CLIENT_SECRET"),
            std::env::var("GOOGLE_REFRESH_TOKEN"),
        ) {
            (Ok(client_id), Ok(client_secret), Ok(refresh_token)) => Ok(Self::RefreshToken {
                client_id,
                client_secret,
                refresh_token,
            }),
            _ => anyhow::bail!(
                "no credentials configured: set GOOGLE_ACCESS_TOKEN, or \
                 GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REFRESH_TOKEN"
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    bearer: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Instant::now() + EXPIRY_LEEWAY < expires_at,
            None => true,
        }
    }
}

/// Hands out a valid bearer token, refreshing on demand.
///
/// Callers await [`TokenProvider::bearer`]; the first caller after expiry
/// pays for the refresh, everyone else reads the cached token. This replaces
/// the original design's poll-until-initialized module global.
pub struct TokenProvider {
    credentials: Credentials,
    http: reqwest::Client,
    cached: RwLock<Option<CachedToken>>,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider").finish_non_exhaustive()
    }
}

impl TokenProvider {
    pub fn new(credentials: Credentials, http: reqwest::Client) -> Self {
        Self {
            credentials,
            http,
            cached: RwLock::new(None),
        }
    }

    /// Returns a bearer token valid for at least [`EXPIRY_LEEWAY`].
    pub async fn bearer(&self) -> Result<String, DriveError> {
        if let Some(token) = self.cached.read().await.as_ref()
            && token.is_fresh()
        {
            return Ok(token.bearer.clone());
        }

        let mut cached = self.cached.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = cached.as_ref()
            && token.is_fresh()
        {
            return Ok(token.bearer.clone());
        }

        let token = self.fetch_token().await?;
        let bearer = token.bearer.clone();
        *cached = Some(token);
        Ok(bearer)
    }

    async fn fetch_token(&self) -> Result<CachedToken, DriveError> {
        match &self.credentials {
            Credentials::AccessToken(token) => Ok(CachedToken {
                bearer: token.clone(),
                expires_at: None,
            }),
            Credentials::RefreshToken {
                client_id,
                client_secret,
                refresh_token,
            } => {
                tracing::debug!("refreshing Drive access token");
                let response = self
                    .http
                    .post(TOKEN_ENDPOINT)
                    .form(&[
                        ("grant_type", "refresh_token"),
                        ("client_id", client_id.as_str()),
                        ("client_secret", client_secret.as_str()),
                        ("refresh_token", refresh_token.as_str()),
                    ])
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(DriveError::Auth(format!(
                        "token refresh failed with status {status}: {body}"
                    )));
                }

                let token: TokenResponse = response
                    .json()
                    .await
                    .map_err(|e| DriveError::Auth(format!("malformed token response: {e}")))?;

                Ok(CachedToken {
                    bearer: token.access_token,
                    expires_at: token
                        .expires_in
                        .map(|secs| Instant::now() + Duration::from_secs(secs)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[tokio::test]
    async fn static_token_is_served_without_network() {
        let provider = TokenProvider::new(
            Credentials::AccessToken("ya29.test".to_string()),
            reqwest::Client::new(),
        );
        let bearer = provider.bearer().await.unwrap();
        check!(bearer == "ya29.test");

        // Second call hits the cache.
        let again = provider.bearer().await.unwrap();
        check!(again == "ya29.test");
    }

    #[test]
    fn cached_token_freshness() {
        let fresh = CachedToken {
            bearer: "t".to_string(),
            expires_at: Some(Instant::now() + Duration::from_secs(3600)),
        };
        check!(fresh.is_fresh());

        let stale = CachedToken {
            bearer: "t".to_string(),
            expires_at: Some(Instant::now() + Duration::from_secs(10)),
        };
        check!(!stale.is_fresh());

        let unbounded = CachedToken {
            bearer: "t".to_string(),
            expires_at: None,
        };
        check!(unbounded.is_fresh());
    }
}
