// service/ticket_service.rs
//
// The lifecycle manager: creation, role-scoped reads, mutation and
// deletion of tickets, orchestrating triage, SLA, assignment and the
// audit trail.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, ticketdb::TicketExt},
    models::{
        auditmodel::AuditLogWithUser,
        ticketmodel::{
            Ticket, TicketPriority, TicketRemarkWithUser, TicketStatus, TicketWithNames,
        },
        usermodel::{User, UserRole},
    },
    service::{
        assignment_service::AssignmentService, audit_service::AuditService,
        classifier::auto_classify, error::ServiceError, sla::due_date_for,
    },
};

/// Caller-supplied mutation set for `update`. Category is immutable after
/// creation and is deliberately absent here.
#[derive(Debug, Default, Clone)]
pub struct TicketChanges {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub remark: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TicketDetail {
    pub ticket: TicketWithNames,
    pub audits: Vec<AuditLogWithUser>,
    pub remarks: Vec<TicketRemarkWithUser>,
}

#[derive(Debug, Clone)]
pub struct TicketService {
    db_client: Arc<DBClient>,
    assignment_service: Arc<AssignmentService>,
    audit_service: Arc<AuditService>,
}

impl TicketService {
    pub fn new(
        db_client: Arc<DBClient>,
        assignment_service: Arc<AssignmentService>,
        audit_service: Arc<AuditService>,
    ) -> Self {
        Self {
            db_client,
            assignment_service,
            audit_service,
        }
    }

    /// Create a ticket from free text: classify, compute the SLA window,
    /// pick the least-loaded staff member, persist as Open and record the
    /// CREATED history entry.
    pub async fn create(
        &self,
        actor: &User,
        title: &str,
        description: &str,
        ip_address: Option<String>,
    ) -> Result<Ticket, ServiceError> {
        let title = title.trim();
        let description = description.trim();

        if title.is_empty() {
            return Err(ServiceError::Validation("Title is required".to_string()));
        }
        if description.is_empty() {
            return Err(ServiceError::Validation(
                "Description is required".to_string(),
            ));
        }

        let (category, priority) = auto_classify(&format!("{} {}", title, description));
        let due_date = due_date_for(priority, Utc::now());
        let assigned_to = self.assignment_service.pick_assignee(category).await?;

        let ticket = self
            .db_client
            .create_ticket(
                actor.id,
                title.to_string(),
                description.to_string(),
                category,
                priority,
                assigned_to,
                due_date,
            )
            .await?;

        self.audit_service
            .log_ticket_created(
                ticket.id,
                actor.id,
                format!(
                    "Category: {}, Priority: {}",
                    category.to_str(),
                    priority.to_str()
                ),
                ip_address,
            )
            .await?;

        tracing::info!(
            ticket_id = %ticket.id,
            category = category.to_str(),
            priority = priority.to_str(),
            assigned = assigned_to.is_some(),
            "ticket created"
        );

        Ok(ticket)
    }

    /// Role-scoped listing, newest first: admins see everything, staff see
    /// their assignments plus the Open pool, users see their own tickets.
    pub async fn list(&self, actor: &User) -> Result<Vec<TicketWithNames>, ServiceError> {
        let tickets = match actor.role {
            UserRole::Admin => self.db_client.get_all_tickets().await?,
            UserRole::Staff => self.db_client.get_staff_tickets(actor.id).await?,
            UserRole::User => self.db_client.get_user_tickets(actor.id).await?,
        };

        Ok(tickets)
    }

    /// One ticket with its full audit trail (newest first) and remark
    /// thread.
    pub async fn get(&self, ticket_id: Uuid) -> Result<TicketDetail, ServiceError> {
        let ticket = self
            .db_client
            .get_ticket_with_names(ticket_id)
            .await?
            .ok_or(ServiceError::TicketNotFound(ticket_id))?;

        let audits = self.audit_service.history(ticket_id).await?;
        let remarks = self.db_client.get_ticket_remarks(ticket_id).await?;

        Ok(TicketDetail {
            ticket,
            audits,
            remarks,
        })
    }

    /// Apply a mutation set. A priority change re-anchors the due date at
    /// the change time; a remark joins the inline thread without touching
    /// the audit trail; an actual status change records exactly one
    /// STATUS_CHANGE entry.
    pub async fn update(
        &self,
        actor: &User,
        ticket_id: Uuid,
        changes: TicketChanges,
        ip_address: Option<String>,
    ) -> Result<Ticket, ServiceError> {
        let existing = self
            .db_client
            .get_ticket(ticket_id)
            .await?
            .ok_or(ServiceError::TicketNotFound(ticket_id))?;

        let now = Utc::now();
        let due_date = changes.priority.map(|priority| due_date_for(priority, now));

        let resolution_time = match changes.status {
            Some(TicketStatus::Resolved) if existing.status != TicketStatus::Resolved => {
                Some(resolution_hours(existing.created_at, now))
            }
            _ => None,
        };

        let updated = self
            .db_client
            .update_ticket(
                ticket_id,
                changes.status,
                changes.priority,
                due_date,
                resolution_time,
            )
            .await?;

        if let Some(message) = changes.remark {
            let message = message.trim().to_string();
            if !message.is_empty() {
                self.db_client
                    .add_ticket_remark(ticket_id, actor.id, message)
                    .await?;
            }
        }

        if let Some((previous, new)) = audit_transition(existing.status, changes.status) {
            self.audit_service
                .log_status_change(ticket_id, actor.id, previous, new, ip_address)
                .await?;
        }

        Ok(updated)
    }

    /// Idempotent removal; audit entries cascade with the ticket. Returns
    /// whether a ticket was actually deleted.
    pub async fn delete(&self, ticket_id: Uuid) -> Result<bool, ServiceError> {
        let deleted = self.db_client.delete_ticket(ticket_id).await?;

        if deleted > 0 {
            tracing::info!(ticket_id = %ticket_id, "ticket deleted");
        }

        Ok(deleted > 0)
    }
}

/// Decide whether a requested status constitutes a recordable transition.
/// Requesting the current status is a no-op and produces no entry.
fn audit_transition(
    previous: TicketStatus,
    requested: Option<TicketStatus>,
) -> Option<(String, String)> {
    match requested {
        Some(new) if new != previous => {
            Some((previous.to_str().to_string(), new.to_str().to_string()))
        }
        _ => None,
    }
}

fn resolution_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - created_at).num_seconds() as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn status_change_yields_exactly_one_transition() {
        let transition = audit_transition(TicketStatus::Open, Some(TicketStatus::Resolved));
        assert_eq!(
            transition,
            Some(("Open".to_string(), "Resolved".to_string()))
        );
    }

    #[test]
    fn setting_the_same_status_is_not_a_transition() {
        assert_eq!(audit_transition(TicketStatus::Open, Some(TicketStatus::Open)), None);
    }

    #[test]
    fn absent_status_is_not_a_transition() {
        assert_eq!(audit_transition(TicketStatus::InProgress, None), None);
    }

    #[test]
    fn resolution_time_is_measured_in_hours() {
        let created = Utc::now();
        let resolved = created + Duration::hours(6);
        assert!((resolution_hours(created, resolved) - 6.0).abs() < 1e-9);
    }
}
