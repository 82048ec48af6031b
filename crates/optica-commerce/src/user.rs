//! User identity as reported by the auth endpoints.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// An authenticated user.
///
/// The server owns the record; the client persists it locally alongside the
/// bearer credential so a session survives restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
}

impl User {
    /// Create a new user record.
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_mongo_style_id() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","username":"asha","email":"asha@example.com"}"#,
        )
        .unwrap();
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.username, "asha");
    }

    #[test]
    fn test_user_accepts_plain_id_field() {
        let user: User =
            serde_json::from_str(r#"{"id":"u2","username":"dev","email":"dev@example.com"}"#)
                .unwrap();
        assert_eq!(user.id.as_str(), "u2");
    }
}
