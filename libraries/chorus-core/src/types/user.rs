/// User domain type
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user (listener and/or uploader)
///
/// The password hash never leaves the storage layer; this type only carries
/// profile data safe to hand to UI code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (assigned by storage)
    pub id: UserId,

    /// Login name, unique per installation
    pub username: String,

    /// Name shown in the UI
    pub display_name: String,

    /// Contact email
    pub email: Option<String>,

    /// Avatar image locator
    pub avatar_url: Option<String>,

    /// Profile biography
    pub bio: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user profile
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            display_name: display_name.into(),
            email: None,
            avatar_url: None,
            bio: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_creation() {
        let user = User::new("alice", "Alice");
        assert_eq!(user.username, "alice");
        assert_eq!(user.display_name, "Alice");
        assert!(user.email.is_none());
    }
}
