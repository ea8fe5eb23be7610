//! API handlers.

pub mod balance;
pub mod health;
pub mod orders;
pub mod users;

use serde::Serialize;

/// Confirmation body used by mutating endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Human-readable confirmation.
    pub success: String,
}

impl SuccessResponse {
    /// Create a confirmation.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: message.into(),
        }
    }
}
