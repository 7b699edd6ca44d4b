use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
    User,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
            UserRole::User => "user",
        }
    }

    /// Staff and admins form the resolution side of the desk.
    pub fn is_agent(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Staff)
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,

    // None for OAuth-provisioned identities
    #[serde(skip_serializing)]
    pub password: Option<String>,

    pub role: UserRole,
    pub department: Option<String>,

    // OAuth fields
    pub google_id: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_strings_match_database_labels() {
        assert_eq!(UserRole::Admin.to_str(), "admin");
        assert_eq!(UserRole::Staff.to_str(), "staff");
        assert_eq!(UserRole::User.to_str(), "user");
    }

    #[test]
    fn only_staff_and_admin_are_agents() {
        assert!(UserRole::Admin.is_agent());
        assert!(UserRole::Staff.is_agent());
        assert!(!UserRole::User.is_agent());
    }
}
