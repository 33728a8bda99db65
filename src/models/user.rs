use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table. Deliberately not `Serialize`: the stored
/// password hash must never leave the process. Responses use [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub name: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User projection returned by signup, login, and profile responses.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_projection_drops_password() {
        let user = User {
            id: 7,
            email: "user@example.com".to_string(),
            password: "$2b$10$hash".to_string(),
            name: "Test User".to_string(),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let public = PublicUser::from(&user);
        let value = serde_json::to_value(&public).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["id"], 7);
        assert_eq!(value["email"], "user@example.com");
    }
}
