//! The authentication relay used by every protected endpoint.

use std::sync::Arc;

use async_trait::async_trait;

use shopflow_core::{Caller, ShopError, TokenPair};

use crate::header::parse_bearer_pair;
use crate::tokens::{TokenAuthority, TokenError, Verified};

/// Why a token pair could not be verified.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The authority rejected the tokens.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The authority could not be reached.
    #[error("token authority unavailable: {0}")]
    Unavailable(String),

    /// The authority answered with a non-success status.
    #[error("token authority rejected the request with status {0}")]
    Rejected(u16),
}

/// Something that can run `verify_or_rotate` on a token pair.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify the pair, rotating it if only the refresh token is valid.
    ///
    /// # Errors
    ///
    /// Returns a `VerifyError` on any failure, including transport failures.
    async fn verify(&self, pair: &TokenPair) -> Result<Verified, VerifyError>;
}

#[async_trait]
impl TokenVerifier for TokenAuthority {
    async fn verify(&self, pair: &TokenPair) -> Result<Verified, VerifyError> {
        Ok(self.verify_or_rotate(pair)?)
    }
}

/// Turns an `Authorization` header into an authenticated `Caller`.
#[derive(Clone)]
pub struct AuthRelay {
    verifier: Arc<dyn TokenVerifier>,
}

impl std::fmt::Debug for AuthRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRelay").finish_non_exhaustive()
    }
}

impl AuthRelay {
    /// Create a relay over the given verifier.
    #[must_use]
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Authenticate the caller from a raw header value.
    ///
    /// When the pair was rotated, `Caller::tokens` holds the new pair so it
    /// can be forwarded to downstream services.
    ///
    /// # Errors
    ///
    /// - `ShopError::BadRequest` if the header is absent or malformed.
    /// - `ShopError::Forbidden` on any verification failure, including an
    ///   unreachable authority.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<Caller, ShopError> {
        let pair = parse_bearer_pair(header)?;

        let verified = self.verifier.verify(&pair).await.map_err(|err| {
            tracing::warn!(error = %err, "Authentication failed");
            ShopError::Forbidden("authentication failed".into())
        })?;

        if verified.rotated {
            tracing::debug!(login = %verified.identity.login, "Caller tokens rotated");
        }

        Ok(Caller {
            identity: verified.identity,
            tokens: verified.tokens,
        })
    }
}
