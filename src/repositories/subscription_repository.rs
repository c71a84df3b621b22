// src/repositories/subscription_repository.rs
//
// Subscription relation persistence. Presence of a (user, channel) row
// means subscribed; the composite primary key keeps the relation a set.

use std::collections::BTreeSet;
use std::sync::Arc;

use rusqlite::params;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::error::AppResult;

pub trait SubscriptionRepository: Send + Sync {
    /// Idempotent: inserting an existing pair is a no-op
    fn add(&self, user_id: Uuid, channel_name: &str) -> AppResult<()>;
    /// Idempotent: removing an absent pair is a no-op
    fn remove(&self, user_id: Uuid, channel_name: &str) -> AppResult<()>;
    fn contains(&self, user_id: Uuid, channel_name: &str) -> AppResult<bool>;
    fn list_for_user(&self, user_id: Uuid) -> AppResult<BTreeSet<String>>;
}

pub struct SqliteSubscriptionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSubscriptionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl SubscriptionRepository for SqliteSubscriptionRepository {
    fn add(&self, user_id: Uuid, channel_name: &str) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR IGNORE INTO subscriptions (user_id, channel_name) VALUES (?1, ?2)",
            params![user_id.to_string(), channel_name],
        )?;

        Ok(())
    }

    fn remove(&self, user_id: Uuid, channel_name: &str) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "DELETE FROM subscriptions WHERE user_id = ?1 AND channel_name = ?2",
            params![user_id.to_string(), channel_name],
        )?;

        Ok(())
    }

    fn contains(&self, user_id: Uuid, channel_name: &str) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM subscriptions WHERE user_id = ?1 AND channel_name = ?2",
            params![user_id.to_string(), channel_name],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn list_for_user(&self, user_id: Uuid) -> AppResult<BTreeSet<String>> {
        let conn = self.pool.get()?;

        let mut stmt = conn
            .prepare("SELECT channel_name FROM subscriptions WHERE user_id = ?1")?;

        let names: BTreeSet<String> = stmt
            .query_map(params![user_id.to_string()], |row| row.get(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(names)
    }
}
