//! Order types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};
use crate::ids::OrderId;

/// Page size used when listing every order.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Terminal status of an order.
///
/// An order is written exactly once, after the debit attempt resolved. There
/// is no pending state and no later transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// The debit for the order succeeded.
    Success,
    /// The debit failed; the order is kept as an audit record.
    Failed,
}

impl OrderStatus {
    /// Status string as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            other => Err(ShopError::Internal(format!("unknown order status: {other}"))),
        }
    }
}

/// What the client asks to buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Product being ordered.
    pub product_id: i64,
    /// Number of units.
    pub quantity: i64,
    /// Price of one unit in the smallest currency unit.
    pub price: i64,
}

impl OrderRequest {
    /// Compute `price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::BadRequest` if the quantity is negative, the
    /// price is negative, or the product overflows.
    pub fn total_cost(&self) -> Result<i64> {
        if self.quantity < 0 {
            return Err(ShopError::BadRequest("quantity must not be negative".into()));
        }
        if self.price < 0 {
            return Err(ShopError::BadRequest("price must not be negative".into()));
        }
        self.price
            .checked_mul(self.quantity)
            .ok_or_else(|| ShopError::BadRequest("total cost overflows".into()))
    }
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub order_id: OrderId,
    /// Login of the buyer.
    pub username: String,
    /// Product being ordered.
    pub product_id: i64,
    /// Number of units.
    pub quantity: i64,
    /// Unit price.
    pub price: i64,
    /// `price × quantity`.
    pub total_cost: i64,
    /// Outcome of the debit.
    pub status: OrderStatus,
}

impl Order {
    /// Build an order record with a fresh identifier.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        request: &OrderRequest,
        total_cost: i64,
        status: OrderStatus,
    ) -> Self {
        Self {
            order_id: OrderId::generate(),
            username: username.into(),
            product_id: request.product_id,
            quantity: request.quantity,
            price: request.price,
            total_cost,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quantity: i64, price: i64) -> OrderRequest {
        OrderRequest {
            product_id: 312,
            quantity,
            price,
        }
    }

    #[test]
    fn total_cost_is_price_times_quantity() {
        assert_eq!(request(2, 470).total_cost(), Ok(940));
        assert_eq!(request(3, 0).total_cost(), Ok(0));
        assert_eq!(request(0, 10).total_cost(), Ok(0));
    }

    #[test]
    fn total_cost_rejects_bad_input() {
        assert!(matches!(
            request(-1, 10).total_cost(),
            Err(ShopError::BadRequest(_))
        ));
        assert!(matches!(
            request(1, -5).total_cost(),
            Err(ShopError::BadRequest(_))
        ));
        assert!(matches!(
            request(i64::MAX, 2).total_cost(),
            Err(ShopError::BadRequest(_))
        ));
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Failed).unwrap(),
            "\"failed\""
        );
        assert_eq!("success".parse::<OrderStatus>(), Ok(OrderStatus::Success));
        assert!("pending".parse::<OrderStatus>().is_err());
    }
}
