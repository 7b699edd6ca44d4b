// service/audit_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{auditdb::AuditExt, db::DBClient},
    models::auditmodel::{AuditLog, AuditLogWithUser},
    service::error::ServiceError,
};

pub const ACTION_CREATED: &str = "CREATED";
pub const ACTION_STATUS_CHANGE: &str = "STATUS_CHANGE";

#[derive(Debug, Clone)]
pub struct AuditService {
    db_client: Arc<DBClient>,
}

impl AuditService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn log_ticket_created(
        &self,
        ticket_id: Uuid,
        actor_id: Uuid,
        summary: String,
        ip_address: Option<String>,
    ) -> Result<AuditLog, ServiceError> {
        self.record(ticket_id, actor_id, ACTION_CREATED, None, summary, ip_address)
            .await
    }

    pub async fn log_status_change(
        &self,
        ticket_id: Uuid,
        actor_id: Uuid,
        previous_status: String,
        new_status: String,
        ip_address: Option<String>,
    ) -> Result<AuditLog, ServiceError> {
        self.record(
            ticket_id,
            actor_id,
            ACTION_STATUS_CHANGE,
            Some(previous_status),
            new_status,
            ip_address,
        )
        .await
    }

    /// Append one entry, timestamped at write time. A storage failure here
    /// propagates to the caller: a ticket mutation must not report success
    /// when its history entry was lost.
    async fn record(
        &self,
        ticket_id: Uuid,
        actor_id: Uuid,
        action: &str,
        previous_value: Option<String>,
        new_value: String,
        ip_address: Option<String>,
    ) -> Result<AuditLog, ServiceError> {
        let entry = self
            .db_client
            .record_audit(
                ticket_id,
                actor_id,
                action,
                previous_value,
                new_value,
                ip_address,
            )
            .await?;

        Ok(entry)
    }

    /// Full trail for a ticket, newest first, with actor display names
    /// resolved ("System" when the account is gone).
    pub async fn history(&self, ticket_id: Uuid) -> Result<Vec<AuditLogWithUser>, ServiceError> {
        let entries = self.db_client.get_ticket_audit_trail(ticket_id).await?;

        Ok(entries)
    }
}
