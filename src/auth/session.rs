//! The signed-in user's session.

use std::fmt::Debug;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};

/// The bearer token issued by the identity provider for the signed-in user.
///
/// The auth middleware places this in the request extensions, and every call
/// to the backend is made with it.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    token: String,
}

impl AuthSession {
    /// Wrap a token issued by the identity provider.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"********")
            .finish()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthSession {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthSession>().cloned().ok_or_else(|| {
            tracing::error!(
                "no session in request extensions for {}, is the auth middleware missing?",
                parts.uri.path()
            );
            StatusCode::UNAUTHORIZED
        })
    }
}
