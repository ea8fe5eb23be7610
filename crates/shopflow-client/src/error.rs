//! Client error types.

use shopflow_core::ShopError;

/// Errors that can occur when calling another shopflow service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never got a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response without a more specific mapping.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The debit was refused.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// The remote service does not know the resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote service refused the caller's tokens.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The remote service rejected the request as malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// HTTP status the remote service answered with, if it answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::InsufficientFunds { .. } | Self::BadRequest(_) => Some(400),
            Self::NotFound(_) => Some(404),
            Self::Forbidden(_) => Some(403),
            Self::Http(_) | Self::Configuration(_) => None,
        }
    }
}

impl From<ClientError> for ShopError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InsufficientFunds { balance, required } => {
                Self::InsufficientFunds { balance, required }
            }
            ClientError::NotFound(msg) => Self::NotFound(msg),
            ClientError::Forbidden(msg) => Self::Forbidden(msg),
            ClientError::BadRequest(msg) => Self::BadRequest(msg),
            ClientError::Http(_) | ClientError::Api { .. } | ClientError::Configuration(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}
