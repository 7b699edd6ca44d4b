// src/models/ticketmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "ticket_category", rename_all = "snake_case")]
pub enum TicketCategory {
    #[serde(rename = "IT")]
    It,
    Maintenance,
    Housekeeping,
}

impl TicketCategory {
    pub fn to_str(&self) -> &str {
        match self {
            TicketCategory::It => "IT",
            TicketCategory::Maintenance => "Maintenance",
            TicketCategory::Housekeeping => "Housekeeping",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "ticket_priority", rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub fn to_str(&self) -> &str {
        match self {
            TicketPriority::Low => "Low",
            TicketPriority::Medium => "Medium",
            TicketPriority::High => "High",
            TicketPriority::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn to_str(&self) -> &str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "sla_status", rename_all = "snake_case")]
pub enum SlaStatus {
    #[serde(rename = "Within SLA")]
    WithinSla,
    #[serde(rename = "At Risk")]
    AtRisk,
    Breached,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub assigned_to: Option<Uuid>,
    pub due_date: DateTime<Utc>,
    pub is_escalated: bool,
    pub escalation_level: i32,
    pub sla_status: SlaStatus,
    pub resolution_time: Option<f64>,
    pub feedback_rating: Option<i32>,
    pub feedback_comment: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Ticket row enriched with the owner's and assignee's display names,
/// the shape list endpoints return.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketWithNames {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub ticket: Ticket,
    pub user_name: String,
    pub user_email: String,
    pub assignee_name: Option<String>,
}

/// An inline progress remark on a ticket. Remarks are conversation, not
/// audit history; appending one never touches the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketRemark {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketRemarkWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub remark: TicketRemark,
    pub user_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_labels_match_source_values() {
        assert_eq!(TicketCategory::It.to_str(), "IT");
        assert_eq!(TicketStatus::InProgress.to_str(), "In Progress");
        assert_eq!(TicketPriority::Critical.to_str(), "Critical");
    }

    #[test]
    fn category_serializes_like_the_api_contract() {
        let json = serde_json::to_string(&TicketCategory::It).unwrap();
        assert_eq!(json, "\"IT\"");
        let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }
}
