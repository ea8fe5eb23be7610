//! Parsing of the `Authorization` header.

use shopflow_core::{ShopError, TokenPair, BEARER_PREFIX, TOKEN_SEPARATOR};

/// Parse `Bearer <access>;<refresh>` into a token pair.
///
/// # Errors
///
/// Returns `ShopError::BadRequest` if the header is absent, lacks the
/// `Bearer ` scheme or the `;` separator, or either token is empty.
pub fn parse_bearer_pair(header: Option<&str>) -> Result<TokenPair, ShopError> {
    let value = header
        .ok_or_else(|| ShopError::BadRequest("missing authorization header".into()))?;

    let tokens = value.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        ShopError::BadRequest("authorization header must use the Bearer scheme".into())
    })?;

    match tokens.split_once(TOKEN_SEPARATOR) {
        Some((access, refresh)) if !access.trim().is_empty() && !refresh.trim().is_empty() => {
            Ok(TokenPair::new(access.trim(), refresh.trim()))
        }
        _ => Err(ShopError::BadRequest(
            "authorization header must be `Bearer <access>;<refresh>`".into(),
        )),
    }
}
