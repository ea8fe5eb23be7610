//! Identity claims and the token pair that proves them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scheme prefix of the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Separator between the access and refresh tokens in the header.
pub const TOKEN_SEPARATOR: char = ';';

/// The subject of a token.
///
/// Never persisted; rebuilt from a verified token on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Login (username) of the user.
    pub login: String,
    /// Email address of the user.
    pub email: String,
}

impl Identity {
    /// Create a new identity claim.
    #[must_use]
    pub fn new(login: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            email: email.into(),
        }
    }
}

/// An access/refresh token pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access: String,
    /// Longer-lived refresh token.
    pub refresh: String,
}

impl TokenPair {
    /// Create a new token pair.
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// Render the pair as an `Authorization` header value:
    /// `Bearer <access>;<refresh>`.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!(
            "{BEARER_PREFIX}{}{TOKEN_SEPARATOR}{}",
            self.access, self.refresh
        )
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// An authenticated caller.
///
/// `tokens` is the pair that should be forwarded to downstream services. When
/// the token authority rotated the pair, these are the new tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// The verified identity.
    pub identity: Identity,
    /// Tokens to propagate onward.
    pub tokens: TokenPair,
}

impl Caller {
    /// The login of the caller, used as the ledger and order key.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.identity.login
    }
}
