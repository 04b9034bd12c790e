//! User follow graph

use crate::error::Result;
use crate::now_millis;
use chorus_core::types::UserId;
use sqlx::{Row, SqlitePool};

/// Follow a user; already-following is a no-op
pub async fn follow(pool: &SqlitePool, follower_id: UserId, followee_id: UserId) -> Result<()> {
    sqlx::query(
        "INSERT OR IGNORE INTO user_follows (follower_id, followee_id, created_at) \
         VALUES (?, ?, ?)",
    )
    .bind(follower_id)
    .bind(followee_id)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

/// Stop following a user
pub async fn unfollow(pool: &SqlitePool, follower_id: UserId, followee_id: UserId) -> Result<()> {
    sqlx::query("DELETE FROM user_follows WHERE follower_id = ? AND followee_id = ?")
        .bind(follower_id)
        .bind(followee_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Whether one user follows another
pub async fn is_following(
    pool: &SqlitePool,
    follower_id: UserId,
    followee_id: UserId,
) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM user_follows WHERE follower_id = ? AND followee_id = ?")
        .bind(follower_id)
        .bind(followee_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Number of users following `user_id`
pub async fn follower_count(pool: &SqlitePool, user_id: UserId) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM user_follows WHERE followee_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}

/// Number of users `user_id` follows
pub async fn following_count(pool: &SqlitePool, user_id: UserId) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM user_follows WHERE follower_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}
