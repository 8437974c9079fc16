use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row as stored in the database. Never serialized directly;
/// responses go through [`PublicUser`] so the password hash stays private.
#[derive(Debug, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// The client-facing projection of a user.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

/// Abbreviated user row shown on the admin dashboard (includes the role,
/// unlike [`PublicUser`]).
#[derive(Debug, Serialize, FromRow)]
pub struct RecentUser {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_hides_password_hash() {
        let user = User {
            id: 7,
            username: "demo".to_string(),
            email: "demo@pricehunter.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            avatar_url: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=demo".to_string()),
            role: "user".to_string(),
            created_at: Utc::now(),
        };

        let public = PublicUser::from(user);
        let json = serde_json::to_value(&public).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "demo@pricehunter.com");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("role").is_none());
    }
}
