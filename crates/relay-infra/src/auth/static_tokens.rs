//! Fixed token table verifier for local development and tests.

use std::collections::HashMap;

use relay_core::auth::verifier::TokenVerifier;
use relay_types::error::AuthError;
use relay_types::identity::Identity;

#[derive(Debug, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a token -> user id table (the `auth.static_tokens` config section).
    pub fn from_table(table: &HashMap<String, String>) -> Self {
        Self {
            tokens: table
                .iter()
                .map(|(token, user)| (token.clone(), Identity::new(user.as_str())))
                .collect(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>, identity: Identity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn name(&self) -> &str {
        "static"
    }

    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
