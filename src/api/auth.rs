//! Token provider seam for backend authentication.
//!
//! The client never talks to the auth provider itself; it is handed a
//! `TokenProvider` at construction and asks it for a bearer token per
//! request. When the provider yields nothing the request goes out without
//! an `Authorization` header at all.

use async_trait::async_trait;

/// Asynchronous supplier of the current bearer token.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` to send the request anonymously.
    async fn token(&self) -> Option<String>;
}

/// Provider for anonymous use and tests.
pub struct NoAuth;

#[async_trait]
impl TokenProvider for NoAuth {
    async fn token(&self) -> Option<String> {
        None
    }
}

/// Fixed token, typically sourced from configuration.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_auth_yields_nothing() {
        assert_eq!(NoAuth.token().await, None);
    }

    #[tokio::test]
    async fn static_token_yields_its_value() {
        let provider = StaticToken::new("tok-123");
        assert_eq!(provider.token().await.as_deref(), Some("tok-123"));
    }
}
