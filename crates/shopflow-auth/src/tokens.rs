//! Signed access/refresh tokens.
//!
//! Tokens are HS256 JWTs carrying the identity claim and a `kind`. Nothing is
//! stored server-side: a token is valid iff its signature verifies against the
//! signing secret and its `exp` has not passed. Refresh tokens are not
//! single-use and there is no revocation list; a leaked refresh token stays
//! usable until it expires.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use shopflow_core::{Identity, TokenPair};

// ============================================================================
// Constants
// ============================================================================

/// Lifetime of an access token, in seconds.
pub const ACCESS_TOKEN_TTL: i64 = 60;

/// Lifetime of a refresh token, in seconds.
pub const REFRESH_TOKEN_TTL: i64 = 60 * 60;

// ============================================================================
// Types
// ============================================================================

/// Errors from issuing or verifying tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signing failed.
    #[error("failed to issue token: {0}")]
    IssueFailed(String),

    /// Neither the access nor the refresh token is valid.
    #[error("token expired or invalid")]
    Expired,
}

/// Which slot a token was minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token presented on every request.
    Access,
    /// Long-lived token exchanged for a new pair.
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    kind: TokenKind,
    iat: i64,
    exp: i64,
    jti: String,
}

impl Claims {
    fn identity(self) -> Identity {
        Identity::new(self.sub, self.email)
    }
}

/// Outcome of a successful `verify_or_rotate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    /// The identity carried by the token that verified.
    pub identity: Identity,
    /// The pair to use from now on: the input pair, or a fresh one.
    pub tokens: TokenPair,
    /// Whether `tokens` was minted by this call.
    pub rotated: bool,
}

/// Wire body of a successful `POST /verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Login of the verified user.
    pub login: String,
    /// Email of the verified user.
    pub email: String,
    /// Access token to use from now on.
    pub access: String,
    /// Refresh token to use from now on.
    pub refresh: String,
}

impl From<Verified> for VerifyResponse {
    fn from(verified: Verified) -> Self {
        Self {
            login: verified.identity.login,
            email: verified.identity.email,
            access: verified.tokens.access,
            refresh: verified.tokens.refresh,
        }
    }
}

impl VerifyResponse {
    /// Rebuild a `Verified` from the wire body, given the pair that was sent.
    #[must_use]
    pub fn into_verified(self, sent: &TokenPair) -> Verified {
        let rotated = self.access != sent.access || self.refresh != sent.refresh;
        Verified {
            identity: Identity::new(self.login, self.email),
            tokens: TokenPair::new(self.access, self.refresh),
            rotated,
        }
    }
}

// ============================================================================
// Authority
// ============================================================================

/// Issues and verifies token pairs with a fixed signing secret.
///
/// Holds no mutable state; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority").finish_non_exhaustive()
    }
}

impl TokenAuthority {
    /// Create an authority for the given HMAC secret.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint an access/refresh pair issued now.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::IssueFailed` if signing fails.
    pub fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, TokenError> {
        self.issue_pair_at(identity, Utc::now())
    }

    /// Mint an access/refresh pair as if issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::IssueFailed` if signing fails.
    pub fn issue_pair_at(
        &self,
        identity: &Identity,
        issued_at: DateTime<Utc>,
    ) -> Result<TokenPair, TokenError> {
        let access = self.sign(identity, TokenKind::Access, issued_at, ACCESS_TOKEN_TTL)?;
        let refresh = self.sign(identity, TokenKind::Refresh, issued_at, REFRESH_TOKEN_TTL)?;
        Ok(TokenPair::new(access, refresh))
    }

    /// Verify the access token, or rotate the pair using the refresh token.
    ///
    /// A valid access token is returned unchanged together with the original
    /// refresh token. Otherwise a valid refresh token yields a brand new pair
    /// for the same identity.
    ///
    /// # Errors
    ///
    /// - `TokenError::Expired` if neither token verifies.
    /// - `TokenError::IssueFailed` if minting the rotated pair fails.
    pub fn verify_or_rotate(&self, pair: &TokenPair) -> Result<Verified, TokenError> {
        match self.check(&pair.access, TokenKind::Access) {
            Ok(claims) => {
                return Ok(Verified {
                    identity: claims.identity(),
                    tokens: pair.clone(),
                    rotated: false,
                });
            }
            Err(err) => tracing::debug!(error = %err, "Access token rejected"),
        }

        let claims = self
            .check(&pair.refresh, TokenKind::Refresh)
            .map_err(|err| {
                tracing::debug!(error = %err, "Refresh token rejected");
                TokenError::Expired
            })?;

        let identity = claims.identity();
        let tokens = self.issue_pair(&identity)?;

        tracing::info!(login = %identity.login, "Token pair rotated");

        Ok(Verified {
            identity,
            tokens,
            rotated: true,
        })
    }

    fn sign(
        &self,
        identity: &Identity,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl_secs: i64,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: identity.login.clone(),
            email: identity.email.clone(),
            kind,
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(ttl_secs)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))
    }

    fn check(&self, token: &str, expected: TokenKind) -> jsonwebtoken::errors::Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)?.claims;
        if claims.kind != expected {
            return Err(ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authority() -> TokenAuthority {
        TokenAuthority::new(b"test-signing-secret")
    }

    fn maria() -> Identity {
        Identity::new("maria", "maria@example.com")
    }

    #[test]
    fn fresh_pair_verifies_unchanged() {
        let authority = authority();
        let pair = authority.issue_pair(&maria()).unwrap();

        let verified = authority.verify_or_rotate(&pair).unwrap();
        assert_eq!(verified.identity, maria());
        assert_eq!(verified.tokens, pair);
        assert!(!verified.rotated);
    }

    #[test]
    fn expired_access_rotates_with_valid_refresh() {
        let authority = authority();
        let issued = Utc::now() - Duration::minutes(5);
        let pair = authority.issue_pair_at(&maria(), issued).unwrap();

        let verified = authority.verify_or_rotate(&pair).unwrap();
        assert!(verified.rotated);
        assert_eq!(verified.identity, maria());
        assert_ne!(verified.tokens.access, pair.access);
        assert_ne!(verified.tokens.refresh, pair.refresh);

        // The rotated pair is itself valid.
        let again = authority.verify_or_rotate(&verified.tokens).unwrap();
        assert!(!again.rotated);
        assert_eq!(again.identity, maria());
    }

    #[test]
    fn refresh_is_reusable_until_expiry() {
        let authority = authority();
        let pair = authority
            .issue_pair_at(&maria(), Utc::now() - Duration::minutes(5))
            .unwrap();

        assert!(authority.verify_or_rotate(&pair).unwrap().rotated);
        assert!(authority.verify_or_rotate(&pair).unwrap().rotated);
    }

    #[test]
    fn both_expired_is_rejected() {
        let authority = authority();
        let pair = authority
            .issue_pair_at(&maria(), Utc::now() - Duration::hours(2))
            .unwrap();

        assert_eq!(
            authority.verify_or_rotate(&pair),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let pair = TokenAuthority::new(b"other-secret")
            .issue_pair(&maria())
            .unwrap();

        assert_eq!(
            authority().verify_or_rotate(&pair),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let pair = TokenPair::new("not-a-jwt", "also-not-a-jwt");
        assert_eq!(
            authority().verify_or_rotate(&pair),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn token_kinds_are_not_interchangeable() {
        let authority = authority();
        let fresh = authority.issue_pair(&maria()).unwrap();
        let stale = authority
            .issue_pair_at(&maria(), Utc::now() - Duration::hours(2))
            .unwrap();

        // A refresh token in the access slot does not count as access.
        let swapped = TokenPair::new(fresh.refresh.clone(), fresh.refresh.clone());
        assert!(authority.verify_or_rotate(&swapped).unwrap().rotated);

        // An access token in the refresh slot cannot rotate.
        let wrong_refresh = TokenPair::new(stale.access, fresh.access);
        assert_eq!(
            authority.verify_or_rotate(&wrong_refresh),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn verify_response_detects_rotation() {
        let sent = TokenPair::new("a", "r");
        let same = VerifyResponse {
            login: "maria".into(),
            email: "maria@example.com".into(),
            access: "a".into(),
            refresh: "r".into(),
        };
        assert!(!same.clone().into_verified(&sent).rotated);

        let rotated = VerifyResponse {
            access: "a2".into(),
            ..same
        };
        assert!(rotated.into_verified(&sent).rotated);
    }
}
