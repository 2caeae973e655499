//! SupabaseTokenVerifier -- resolves bearer tokens through Supabase Auth.
//!
//! Calls `GET {SUPABASE_URL}/auth/v1/user` with the service key as `apikey`
//! and the client's token as the bearer credential. The user object's `id`
//! becomes the connection identity.
//!
//! The service key is wrapped in [`secrecy::SecretString`] and is only
//! exposed when building request headers.

use std::time::Duration;

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use relay_core::auth::verifier::TokenVerifier;
use relay_types::error::AuthError;
use relay_types::identity::Identity;

/// Connection details for a Supabase project.
pub struct SupabaseCredentials {
    pub url: String,
    pub service_key: SecretString,
}

impl SupabaseCredentials {
    pub const URL_VAR: &'static str = "SUPABASE_URL";
    pub const SERVICE_KEY_VAR: &'static str = "SUPABASE_SERVICE_KEY";

    pub fn new(url: impl Into<String>, service_key: SecretString) -> Self {
        Self {
            url: url.into(),
            service_key,
        }
    }

    /// Read `SUPABASE_URL` and `SUPABASE_SERVICE_KEY` from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var(Self::URL_VAR)
            .with_context(|| format!("missing {} env var", Self::URL_VAR))?;
        let service_key = std::env::var(Self::SERVICE_KEY_VAR)
            .with_context(|| format!("missing {} env var", Self::SERVICE_KEY_VAR))?;
        Ok(Self::new(url, SecretString::from(service_key)))
    }
}

/// Subset of the Supabase user object the relay needs.
#[derive(Debug, Deserialize)]
struct SupabaseUser {
    #[serde(default)]
    id: Option<String>,
}

pub struct SupabaseTokenVerifier {
    client: reqwest::Client,
    base_url: String,
    service_key: SecretString,
}

impl SupabaseTokenVerifier {
    pub fn new(credentials: SupabaseCredentials, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to create reqwest client")?;

        Ok(Self {
            client,
            base_url: credentials.url.trim_end_matches('/').to_string(),
            service_key: credentials.service_key,
        })
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }
}

// No Debug: keeps the service key out of any formatted output.

impl TokenVerifier for SupabaseTokenVerifier {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let response = self
            .client
            .get(self.user_url())
            .header("apikey", self.service_key.expose_secret())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                400 | 401 | 403 => AuthError::InvalidToken,
                _ => AuthError::Provider(format!("HTTP {status}")),
            });
        }

        let user: SupabaseUser = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("failed to parse user: {e}")))?;

        match user.id {
            Some(id) if !id.is_empty() => Ok(Identity::new(id)),
            _ => Err(AuthError::NoIdentity),
        }
    }
}
