// src/models/auditmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable history entry describing one observable change to a ticket.
/// Rows are only ever appended; they are removed solely as a cascade when
/// the ticket itself is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditLog {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub previous_value: Option<String>,
    pub new_value: String,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditLogWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: AuditLog,
    pub user_name: String,
}
