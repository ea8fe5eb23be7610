//! Table layout and SQL statements used by `PgStore`.
//!
//! The DDL lives in `migrations/` and is embedded by `PgStore::migrate`.
//!
//! Tables:
//!
//! - `balances`: `(username PK, amount >= 0)`
//! - `orders`: `(id PK, username, product_id, quantity, price, total_cost, status, created_at)`
//! - `users`: `(username PK, password_hash, first_name, last_name, email, phone)`

/// Balance statements.
pub mod balances {
    /// Plain read, no lock.
    pub const SELECT: &str = "SELECT amount FROM balances WHERE username = $1";

    /// Read and lock the row until the transaction ends.
    pub const SELECT_FOR_UPDATE: &str =
        "SELECT amount FROM balances WHERE username = $1 FOR UPDATE";

    /// Make sure a row exists before locking it, so concurrent first credits
    /// serialize on the same row.
    pub const ENSURE_ROW: &str =
        "INSERT INTO balances (username, amount) VALUES ($1, 0) ON CONFLICT (username) DO NOTHING";

    /// Write the new amount.
    pub const UPDATE: &str = "UPDATE balances SET amount = $2 WHERE username = $1";
}

/// Order statements.
pub mod orders {
    /// Insert a new order.
    pub const INSERT: &str = "INSERT INTO orders (id, username, product_id, quantity, price, total_cost, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)";

    /// Read one order.
    pub const SELECT_BY_ID: &str = "SELECT id, username, product_id, quantity, price, total_cost, status \
         FROM orders WHERE id = $1";

    /// Read all orders of one user.
    pub const SELECT_BY_USER: &str = "SELECT id, username, product_id, quantity, price, total_cost, status \
         FROM orders WHERE username = $1 ORDER BY created_at, id";

    /// Read a page of orders.
    pub const SELECT_PAGE: &str = "SELECT id, username, product_id, quantity, price, total_cost, status \
         FROM orders ORDER BY created_at, id LIMIT $1 OFFSET $2";

    /// Delete one order.
    pub const DELETE: &str = "DELETE FROM orders WHERE id = $1";
}

/// User statements.
pub mod users {
    /// Insert a new user.
    pub const INSERT: &str = "INSERT INTO users (username, password_hash, first_name, last_name, email, phone) \
         VALUES ($1, $2, $3, $4, $5, $6)";

    /// Read one user.
    pub const SELECT: &str = "SELECT username, password_hash, first_name, last_name, email, phone \
         FROM users WHERE username = $1";

    /// Replace a user, possibly renaming it.
    pub const UPDATE: &str = "UPDATE users SET username = $1, password_hash = $2, first_name = $3, \
         last_name = $4, email = $5, phone = $6 WHERE username = $7";

    /// Delete one user.
    pub const DELETE: &str = "DELETE FROM users WHERE username = $1";
}
