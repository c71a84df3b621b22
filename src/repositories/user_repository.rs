// src/repositories/user_repository.rs
//
// Account persistence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::User;
use crate::error::{AppError, AppResult};

pub trait UserRepository: Send + Sync {
    /// Insert a fresh account; a duplicate username maps to Conflict
    fn insert(&self, user: &User) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    fn get_by_username(&self, username: &str) -> AppResult<Option<User>>;
    /// Full overwrite of avatar and bio
    fn update_profile(&self, id: Uuid, avatar: Option<&str>, bio: &str) -> AppResult<()>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to User - returns rusqlite::Error for query_map compatibility
    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(User {
            id,
            username: row.get("username")?,
            credential: row.get("credential")?,
            avatar: row.get("avatar")?,
            bio: row.get("bio")?,
            created_at,
        })
    }

    fn is_unique_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

impl UserRepository for SqliteUserRepository {
    fn insert(&self, user: &User) -> AppResult<()> {
        let conn = self.pool.get()?;

        let result = conn.execute(
            "INSERT INTO users (id, username, credential, avatar, bio, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id.to_string(),
                user.username,
                user.credential,
                user.avatar,
                user.bio,
                user.created_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if Self::is_unique_violation(&e) => Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                user.username
            ))),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, username, credential, avatar, bio, created_at
             FROM users WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, username, credential, avatar, bio, created_at
             FROM users WHERE username = ?1",
        )?;

        match stmt.query_row(params![username], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn update_profile(&self, id: Uuid, avatar: Option<&str>, bio: &str) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE users SET avatar = ?1, bio = ?2 WHERE id = ?3",
            params![avatar, bio, id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
