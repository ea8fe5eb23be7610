//! PostgreSQL storage implementation.
//!
//! `apply_delta` runs inside a transaction and locks the balance row with
//! `SELECT ... FOR UPDATE`, so concurrent deltas on one username serialize in
//! the database rather than in the process.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use shopflow_core::{Order, OrderId, UserRecord};

use crate::error::{Result, StoreError};
use crate::ledger::next_balance;
use crate::schema::{balances, orders, users};
use crate::{BalanceStore, OrderStore, UserStore};

/// PostgreSQL-backed storage implementation.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to PostgreSQL with a pool of at most `max_connections`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        tracing::info!(max_connections, "PostgreSQL pool established");

        Ok(Self { pool })
    }

    /// Run the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

fn row_to_order(row: &PgRow) -> Result<Order> {
    let status: String = row.try_get("status")?;
    Ok(Order {
        order_id: OrderId::from_uuid(row.try_get("id")?),
        username: row.try_get("username")?,
        product_id: row.try_get("product_id")?,
        quantity: row.try_get("quantity")?,
        price: row.try_get("price")?,
        total_cost: row.try_get("total_cost")?,
        status: status
            .parse()
            .map_err(|e: shopflow_core::ShopError| StoreError::Database(e.to_string()))?,
    })
}

fn row_to_user(row: &PgRow) -> Result<UserRecord> {
    Ok(UserRecord {
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
    })
}

/// Turn a unique violation into `AlreadyExists`, anything else into `Database`.
fn map_conflict(err: sqlx::Error, entity: &'static str, id: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::AlreadyExists {
            entity,
            id: id.to_string(),
        },
        _ => err.into(),
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl BalanceStore for PgStore {
    async fn get_balance(&self, username: &str) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(balances::SELECT)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::balance_not_found(username))
    }

    async fn apply_delta(&self, username: &str, delta: i64) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        // Credits may open an account; debits never do.
        if delta >= 0 {
            sqlx::query(balances::ENSURE_ROW)
                .bind(username)
                .execute(&mut *tx)
                .await?;
        }

        let current = sqlx::query_scalar::<_, i64>(balances::SELECT_FOR_UPDATE)
            .bind(username)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::balance_not_found(username))?;

        // Dropping `tx` on error rolls back, including the row created above.
        let new_amount = next_balance(current, delta)?;

        sqlx::query(balances::UPDATE)
            .bind(username)
            .bind(new_amount)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            username = %username,
            delta,
            balance = new_amount,
            "Balance updated"
        );

        Ok(new_amount)
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn save_order(&self, order: &Order) -> Result<()> {
        sqlx::query(orders::INSERT)
            .bind(order.order_id.as_uuid())
            .bind(&order.username)
            .bind(order.product_id)
            .bind(order.quantity)
            .bind(order.price)
            .bind(order.total_cost)
            .bind(order.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_conflict(e, "order", &order.order_id.to_string()))?;

        Ok(())
    }

    async fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>> {
        sqlx::query(orders::SELECT_BY_ID)
            .bind(order_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(row_to_order)
            .transpose()
    }

    async fn list_orders_by_user(&self, username: &str) -> Result<Vec<Order>> {
        sqlx::query(orders::SELECT_BY_USER)
            .bind(username)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_order)
            .collect()
    }

    async fn list_orders(&self, limit: usize, offset: usize) -> Result<Vec<Order>> {
        sqlx::query(orders::SELECT_PAGE)
            .bind(to_i64(limit))
            .bind(to_i64(offset))
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_order)
            .collect()
    }

    async fn delete_order(&self, order_id: &OrderId) -> Result<()> {
        let result = sqlx::query(orders::DELETE)
            .bind(order_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: &UserRecord) -> Result<()> {
        sqlx::query(users::INSERT)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone)
            .execute(&self.pool)
            .await
            .map_err(|e| map_conflict(e, "user", &user.username))?;

        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<Option<UserRecord>> {
        sqlx::query(users::SELECT)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(row_to_user)
            .transpose()
    }

    async fn update_user(&self, username: &str, user: &UserRecord) -> Result<()> {
        let result = sqlx::query(users::UPDATE)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| map_conflict(e, "user", &user.username))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "user",
                id: username.to_string(),
            });
        }

        Ok(())
    }

    async fn delete_user(&self, username: &str) -> Result<()> {
        let result = sqlx::query(users::DELETE)
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "user",
                id: username.to_string(),
            });
        }

        Ok(())
    }
}
