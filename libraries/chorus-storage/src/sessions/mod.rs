//! Auth session tokens
//!
//! Opaque uuid tokens mapping back to users. The UI keeps the token; every
//! launch validates it instead of re-asking for credentials.

use crate::error::Result;
use crate::now_millis;
use crate::users;
use chorus_core::types::{User, UserId};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create a session for a user, returning the token
pub async fn create(pool: &SqlitePool, user_id: UserId) -> Result<String> {
    let token = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO auth_sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(now_millis())
        .execute(pool)
        .await?;
    Ok(token)
}

/// Resolve a token back to its user; `None` for unknown/cleared tokens
pub async fn validate(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM auth_sessions WHERE token = ?")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    match row {
        Some((user_id,)) => users::get_by_id(pool, user_id).await,
        None => Ok(None),
    }
}

/// Remove a single session (logout on this device)
pub async fn clear(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM auth_sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove every session a user holds (logout everywhere)
pub async fn clear_for_user(pool: &SqlitePool, user_id: UserId) -> Result<()> {
    sqlx::query("DELETE FROM auth_sessions WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
