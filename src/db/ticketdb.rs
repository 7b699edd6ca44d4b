// db/ticketdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::ticketmodel::*;

const TICKET_JOIN_COLUMNS: &str = r#"
    t.*,
    u.name AS user_name,
    u.email AS user_email,
    a.name AS assignee_name
"#;

/// Store-wide counters the analytics dashboard is built from.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TicketCounts {
    pub total: i64,
    pub open: i64,
    pub resolved: i64,
    pub breached: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryCount {
    pub category: TicketCategory,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StaffPerformanceRow {
    pub name: String,
    #[serde(rename = "avgHours")]
    pub avg_hours: f64,
    pub count: i64,
}

#[async_trait]
pub trait TicketExt {
    #[allow(clippy::too_many_arguments)]
    async fn create_ticket(
        &self,
        user_id: Uuid,
        title: String,
        description: String,
        category: TicketCategory,
        priority: TicketPriority,
        assigned_to: Option<Uuid>,
        due_date: DateTime<Utc>,
    ) -> Result<Ticket, sqlx::Error>;

    async fn get_all_tickets(&self) -> Result<Vec<TicketWithNames>, sqlx::Error>;

    /// Staff view: tickets assigned to this member plus the unassigned
    /// Open pool.
    async fn get_staff_tickets(&self, staff_id: Uuid) -> Result<Vec<TicketWithNames>, sqlx::Error>;

    async fn get_user_tickets(&self, user_id: Uuid) -> Result<Vec<TicketWithNames>, sqlx::Error>;

    async fn get_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, sqlx::Error>;

    async fn get_ticket_with_names(
        &self,
        ticket_id: Uuid,
    ) -> Result<Option<TicketWithNames>, sqlx::Error>;

    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        status: Option<TicketStatus>,
        priority: Option<TicketPriority>,
        due_date: Option<DateTime<Utc>>,
        resolution_time: Option<f64>,
    ) -> Result<Ticket, sqlx::Error>;

    async fn delete_ticket(&self, ticket_id: Uuid) -> Result<u64, sqlx::Error>;

    async fn add_ticket_remark(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
        message: String,
    ) -> Result<TicketRemark, sqlx::Error>;

    async fn get_ticket_remarks(
        &self,
        ticket_id: Uuid,
    ) -> Result<Vec<TicketRemarkWithUser>, sqlx::Error>;

    /// Open workload for one staff member: everything assigned that is
    /// not yet Resolved.
    async fn count_active_assigned(&self, staff_id: Uuid) -> Result<i64, sqlx::Error>;

    async fn get_ticket_counts(&self, now: DateTime<Utc>) -> Result<TicketCounts, sqlx::Error>;

    async fn get_category_distribution(&self) -> Result<Vec<CategoryCount>, sqlx::Error>;

    async fn get_staff_performance(&self) -> Result<Vec<StaffPerformanceRow>, sqlx::Error>;
}

#[async_trait]
impl TicketExt for DBClient {
    async fn create_ticket(
        &self,
        user_id: Uuid,
        title: String,
        description: String,
        category: TicketCategory,
        priority: TicketPriority,
        assigned_to: Option<Uuid>,
        due_date: DateTime<Utc>,
    ) -> Result<Ticket, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (user_id, title, description, category, priority, status, assigned_to, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(priority)
        .bind(TicketStatus::Open)
        .bind(assigned_to)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_all_tickets(&self) -> Result<Vec<TicketWithNames>, sqlx::Error> {
        sqlx::query_as::<_, TicketWithNames>(&format!(
            r#"
            SELECT {TICKET_JOIN_COLUMNS}
            FROM tickets t
            JOIN users u ON t.user_id = u.id
            LEFT JOIN users a ON t.assigned_to = a.id
            ORDER BY t.created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_staff_tickets(&self, staff_id: Uuid) -> Result<Vec<TicketWithNames>, sqlx::Error> {
        sqlx::query_as::<_, TicketWithNames>(&format!(
            r#"
            SELECT {TICKET_JOIN_COLUMNS}
            FROM tickets t
            JOIN users u ON t.user_id = u.id
            LEFT JOIN users a ON t.assigned_to = a.id
            WHERE t.assigned_to = $1 OR t.status = 'open'::ticket_status
            ORDER BY t.created_at DESC
            "#
        ))
        .bind(staff_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user_tickets(&self, user_id: Uuid) -> Result<Vec<TicketWithNames>, sqlx::Error> {
        sqlx::query_as::<_, TicketWithNames>(&format!(
            r#"
            SELECT {TICKET_JOIN_COLUMNS}
            FROM tickets t
            JOIN users u ON t.user_id = u.id
            LEFT JOIN users a ON t.assigned_to = a.id
            WHERE t.user_id = $1
            ORDER BY t.created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            SELECT * FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_ticket_with_names(
        &self,
        ticket_id: Uuid,
    ) -> Result<Option<TicketWithNames>, sqlx::Error> {
        sqlx::query_as::<_, TicketWithNames>(&format!(
            r#"
            SELECT {TICKET_JOIN_COLUMNS}
            FROM tickets t
            JOIN users u ON t.user_id = u.id
            LEFT JOIN users a ON t.assigned_to = a.id
            WHERE t.id = $1
            "#
        ))
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        status: Option<TicketStatus>,
        priority: Option<TicketPriority>,
        due_date: Option<DateTime<Utc>>,
        resolution_time: Option<f64>,
    ) -> Result<Ticket, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET status = COALESCE($2, status),
                priority = COALESCE($3, priority),
                due_date = COALESCE($4, due_date),
                resolution_time = COALESCE($5, resolution_time),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(ticket_id)
        .bind(status)
        .bind(priority)
        .bind(due_date)
        .bind(resolution_time)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_ticket(&self, ticket_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(ticket_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn add_ticket_remark(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
        message: String,
    ) -> Result<TicketRemark, sqlx::Error> {
        sqlx::query_as::<_, TicketRemark>(
            r#"
            INSERT INTO ticket_remarks (ticket_id, user_id, message)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(ticket_id)
        .bind(user_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_ticket_remarks(
        &self,
        ticket_id: Uuid,
    ) -> Result<Vec<TicketRemarkWithUser>, sqlx::Error> {
        sqlx::query_as::<_, TicketRemarkWithUser>(
            r#"
            SELECT
                r.*,
                u.name AS user_name
            FROM ticket_remarks r
            JOIN users u ON r.user_id = u.id
            WHERE r.ticket_id = $1
            ORDER BY r.created_at ASC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_active_assigned(&self, staff_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM tickets
            WHERE assigned_to = $1 AND status <> 'resolved'::ticket_status
            "#,
        )
        .bind(staff_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn get_ticket_counts(&self, now: DateTime<Utc>) -> Result<TicketCounts, sqlx::Error> {
        sqlx::query_as::<_, TicketCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'open'::ticket_status) AS open,
                COUNT(*) FILTER (WHERE status = 'resolved'::ticket_status) AS resolved,
                COUNT(*) FILTER (
                    WHERE due_date < $1
                    AND status NOT IN ('resolved'::ticket_status, 'closed'::ticket_status)
                ) AS breached
            FROM tickets
            "#,
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_category_distribution(&self) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM tickets
            GROUP BY category
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_staff_performance(&self) -> Result<Vec<StaffPerformanceRow>, sqlx::Error> {
        sqlx::query_as::<_, StaffPerformanceRow>(
            r#"
            SELECT
                COALESCE(u.name, 'Unassigned') AS name,
                ROUND(AVG(EXTRACT(EPOCH FROM (t.updated_at - t.created_at)) / 3600.0)::numeric, 1)::float8 AS avg_hours,
                COUNT(*) AS count
            FROM tickets t
            LEFT JOIN users u ON t.assigned_to = u.id
            WHERE t.status = 'resolved'::ticket_status
            GROUP BY u.name
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
