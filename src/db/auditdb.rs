// db/auditdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::auditmodel::{AuditLog, AuditLogWithUser};

#[async_trait]
pub trait AuditExt {
    /// Append one immutable history entry. There is deliberately no
    /// update or delete counterpart.
    async fn record_audit(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
        action: &str,
        previous_value: Option<String>,
        new_value: String,
        ip_address: Option<String>,
    ) -> Result<AuditLog, sqlx::Error>;

    async fn get_ticket_audit_trail(
        &self,
        ticket_id: Uuid,
    ) -> Result<Vec<AuditLogWithUser>, sqlx::Error>;
}

#[async_trait]
impl AuditExt for DBClient {
    async fn record_audit(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
        action: &str,
        previous_value: Option<String>,
        new_value: String,
        ip_address: Option<String>,
    ) -> Result<AuditLog, sqlx::Error> {
        sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (ticket_id, user_id, action, previous_value, new_value, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(ticket_id)
        .bind(user_id)
        .bind(action)
        .bind(previous_value)
        .bind(new_value)
        .bind(ip_address)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_ticket_audit_trail(
        &self,
        ticket_id: Uuid,
    ) -> Result<Vec<AuditLogWithUser>, sqlx::Error> {
        sqlx::query_as::<_, AuditLogWithUser>(
            r#"
            SELECT
                l.*,
                COALESCE(u.name, 'System') AS user_name
            FROM audit_logs l
            LEFT JOIN users u ON l.user_id = u.id
            WHERE l.ticket_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
    }
}
