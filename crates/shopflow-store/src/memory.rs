//! In-memory storage, used by tests and when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shopflow_core::{Order, OrderId, UserRecord};

use crate::error::{Result, StoreError};
use crate::ledger::next_balance;
use crate::{BalanceStore, OrderStore, UserStore};

/// In-memory storage backend.
///
/// `apply_delta` holds the balance write lock across its read-compute-write,
/// which serializes every delta, not only those on the same username.
#[derive(Debug, Default)]
pub struct MemoryStore {
    balances: RwLock<HashMap<String, i64>>,
    orders: RwLock<Vec<Order>>,
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BalanceStore for MemoryStore {
    async fn get_balance(&self, username: &str) -> Result<i64> {
        self.balances
            .read()
            .await
            .get(username)
            .copied()
            .ok_or_else(|| StoreError::balance_not_found(username))
    }

    async fn apply_delta(&self, username: &str, delta: i64) -> Result<i64> {
        let mut balances = self.balances.write().await;

        let current = match balances.get(username) {
            Some(amount) => *amount,
            None if delta >= 0 => 0,
            None => return Err(StoreError::balance_not_found(username)),
        };

        let next = next_balance(current, delta)?;
        balances.insert(username.to_string(), next);

        tracing::debug!(username = %username, delta, balance = next, "Balance updated");

        Ok(next)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn save_order(&self, order: &Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.order_id == order.order_id) {
            return Err(StoreError::AlreadyExists {
                entity: "order",
                id: order.order_id.to_string(),
            });
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .find(|o| o.order_id == *order_id)
            .cloned())
    }

    async fn list_orders_by_user(&self, username: &str) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| o.username == username)
            .cloned()
            .collect())
    }

    async fn list_orders(&self, limit: usize, offset: usize) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete_order(&self, order_id: &OrderId) -> Result<()> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|o| o.order_id != *order_id);
        if orders.len() == before {
            return Err(StoreError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: &UserRecord) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(StoreError::AlreadyExists {
                entity: "user",
                id: user.username.clone(),
            });
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn update_user(&self, username: &str, user: &UserRecord) -> Result<()> {
        let mut users = self.users.write().await;
        if !users.contains_key(username) {
            return Err(StoreError::NotFound {
                entity: "user",
                id: username.to_string(),
            });
        }
        if user.username != username && users.contains_key(&user.username) {
            return Err(StoreError::AlreadyExists {
                entity: "user",
                id: user.username.clone(),
            });
        }
        users.remove(username);
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> Result<()> {
        self.users
            .write()
            .await
            .remove(username)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                entity: "user",
                id: username.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use shopflow_core::{OrderRequest, OrderStatus};

    fn order(username: &str, status: OrderStatus) -> Order {
        let request = OrderRequest {
            product_id: 7,
            quantity: 2,
            price: 150,
        };
        Order::new(username, &request, 300, status)
    }

    fn user(username: &str) -> UserRecord {
        UserRecord {
            username: username.into(),
            password_hash: "$argon2id$stub".into(),
            first_name: "Maria".into(),
            last_name: "Ivanova".into(),
            email: format!("{username}@example.com"),
            phone: "+70000000000".into(),
        }
    }

    #[tokio::test]
    async fn first_credit_opens_account() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get_balance("maria").await,
            Err(StoreError::NotFound { .. })
        ));

        assert_eq!(store.apply_delta("maria", 1000).await.unwrap(), 1000);
        assert_eq!(store.apply_delta("maria", -400).await.unwrap(), 600);
        assert_eq!(store.get_balance("maria").await.unwrap(), 600);
    }

    #[tokio::test]
    async fn debit_without_account_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.apply_delta("ghost", -1).await,
            Err(StoreError::NotFound { entity: "balance", .. })
        ));
        assert!(store.get_balance("ghost").await.is_err());
    }

    #[tokio::test]
    async fn overdraft_leaves_balance_unchanged() {
        let store = MemoryStore::new();
        store.apply_delta("maria", 500).await.unwrap();

        let err = store.apply_delta("maria", -501).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientFunds {
                balance: 500,
                required: 501
            }
        ));
        assert_eq!(store.get_balance("maria").await.unwrap(), 500);
    }

    #[tokio::test]
    async fn concurrent_debits_never_overdraw() {
        let store = Arc::new(MemoryStore::new());
        store.apply_delta("maria", 1000).await.unwrap();

        let tasks = (0..20).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.apply_delta("maria", -100).await })
        });
        let results = futures::future::join_all(tasks).await;

        let succeeded = results
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(_))))
            .count();
        assert_eq!(succeeded, 10);
        assert_eq!(store.get_balance("maria").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn orders_roundtrip_and_page() {
        let store = MemoryStore::new();
        let first = order("maria", OrderStatus::Success);
        let second = order("ivan", OrderStatus::Failed);
        let third = order("maria", OrderStatus::Failed);
        for o in [&first, &second, &third] {
            store.save_order(o).await.unwrap();
        }

        assert_eq!(
            store.get_order(&second.order_id).await.unwrap(),
            Some(second.clone())
        );
        assert_eq!(
            store.list_orders_by_user("maria").await.unwrap(),
            vec![first.clone(), third.clone()]
        );
        assert_eq!(store.list_orders(2, 1).await.unwrap(), vec![second, third]);
        assert!(store.list_orders(10, 5).await.unwrap().is_empty());

        assert!(matches!(
            store.save_order(&first).await,
            Err(StoreError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn delete_missing_order_is_not_found() {
        let store = MemoryStore::new();
        let o = order("maria", OrderStatus::Success);
        store.save_order(&o).await.unwrap();

        store.delete_order(&o.order_id).await.unwrap();
        assert!(store.get_order(&o.order_id).await.unwrap().is_none());
        assert!(matches!(
            store.delete_order(&o.order_id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn users_create_update_delete() {
        let store = MemoryStore::new();
        store.create_user(&user("maria")).await.unwrap();
        store.create_user(&user("ivan")).await.unwrap();
        assert!(matches!(
            store.create_user(&user("maria")).await,
            Err(StoreError::AlreadyExists { .. })
        ));

        // Renaming onto an existing username is refused.
        assert!(matches!(
            store.update_user("maria", &user("ivan")).await,
            Err(StoreError::AlreadyExists { .. })
        ));

        store.update_user("maria", &user("masha")).await.unwrap();
        assert!(store.get_user("maria").await.unwrap().is_none());
        assert_eq!(
            store.get_user("masha").await.unwrap().map(|u| u.email),
            Some("masha@example.com".to_string())
        );

        store.delete_user("masha").await.unwrap();
        assert!(matches!(
            store.delete_user("masha").await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
