//! User accounts and credential checks

use crate::error::Result;
use crate::{datetime_from_millis, now_millis};
use chorus_core::types::{User, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

fn from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        display_name: row.get("display_name"),
        email: row.get("email"),
        avatar_url: row.get("avatar_url"),
        bio: row.get("bio"),
        created_at: datetime_from_millis(row.get("created_at")),
    }
}

/// Register a user, hashing the password with bcrypt
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    display_name: &str,
    email: Option<&str>,
    password: &str,
) -> Result<User> {
    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    let created_at = now_millis();

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, display_name, email, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(username)
    .bind(display_name)
    .bind(email)
    .bind(&password_hash)
    .bind(created_at)
    .execute(pool)
    .await?;

    debug!(username, "registered user");
    Ok(User {
        id: result.last_insert_rowid(),
        username: username.to_string(),
        display_name: display_name.to_string(),
        email: email.map(str::to_string),
        avatar_url: None,
        bio: None,
        created_at: datetime_from_millis(created_at),
    })
}

/// Check credentials; `None` when the username is unknown or the password
/// does not verify
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, display_name, email, password_hash, avatar_url, bio, created_at \
         FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let hash: String = row.get("password_hash");
    if bcrypt::verify(password, &hash)? {
        Ok(Some(from_row(&row)))
    } else {
        Ok(None)
    }
}

/// Get a user by id
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, display_name, email, avatar_url, bio, created_at \
         FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(from_row))
}

/// Get a user by username
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, display_name, email, avatar_url, bio, created_at \
         FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(from_row))
}

/// Update the mutable profile fields
pub async fn update_profile(
    pool: &SqlitePool,
    id: UserId,
    display_name: &str,
    avatar_url: Option<&str>,
    bio: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE users SET display_name = ?, avatar_url = ?, bio = ? WHERE id = ?")
        .bind(display_name)
        .bind(avatar_url)
        .bind(bio)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
