// service/analytics_service.rs
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::{
    db::{
        db::DBClient,
        ticketdb::{CategoryCount, StaffPerformanceRow, TicketCounts, TicketExt},
    },
    service::error::ServiceError,
};

#[derive(Debug, Serialize)]
pub struct AnalyticsData {
    #[serde(rename = "totalTickets")]
    pub total_tickets: i64,
    #[serde(rename = "openTickets")]
    pub open_tickets: i64,
    #[serde(rename = "resolvedTickets")]
    pub resolved_tickets: i64,
    #[serde(rename = "breachedTickets")]
    pub breached_tickets: i64,
    #[serde(rename = "categoryData")]
    pub category_data: Vec<CategoryCount>,
    #[serde(rename = "staffPerformance")]
    pub staff_performance: Vec<StaffPerformanceRow>,
}

/// Read-only aggregation over the whole ticket store. Tolerates an empty
/// store: zero counters, empty category groupings and a "No Data"
/// performance placeholder instead of an error.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    db_client: Arc<DBClient>,
}

impl AnalyticsService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn dashboard(&self) -> Result<AnalyticsData, ServiceError> {
        let now = Utc::now();

        let counts = self.db_client.get_ticket_counts(now).await?;
        let category_data = self.db_client.get_category_distribution().await?;
        let staff_performance = self.db_client.get_staff_performance().await?;

        Ok(build_dashboard(counts, category_data, staff_performance))
    }
}

fn build_dashboard(
    counts: TicketCounts,
    category_data: Vec<CategoryCount>,
    staff_performance: Vec<StaffPerformanceRow>,
) -> AnalyticsData {
    let staff_performance = if staff_performance.is_empty() {
        vec![StaffPerformanceRow {
            name: "No Data".to_string(),
            avg_hours: 0.0,
            count: 0,
        }]
    } else {
        staff_performance
    };

    AnalyticsData {
        total_tickets: counts.total,
        open_tickets: counts.open,
        resolved_tickets: counts.resolved,
        breached_tickets: counts.breached,
        category_data,
        staff_performance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ticketmodel::TicketCategory;

    fn empty_counts() -> TicketCounts {
        TicketCounts {
            total: 0,
            open: 0,
            resolved: 0,
            breached: 0,
        }
    }

    #[test]
    fn empty_store_yields_zeros_and_placeholder_row() {
        let data = build_dashboard(empty_counts(), vec![], vec![]);

        assert_eq!(data.total_tickets, 0);
        assert_eq!(data.resolved_tickets, 0);
        assert_eq!(data.breached_tickets, 0);
        assert!(data.category_data.is_empty());

        assert_eq!(data.staff_performance.len(), 1);
        assert_eq!(data.staff_performance[0].name, "No Data");
        assert_eq!(data.staff_performance[0].avg_hours, 0.0);
        assert_eq!(data.staff_performance[0].count, 0);
    }

    #[test]
    fn real_rows_are_passed_through_untouched() {
        let counts = TicketCounts {
            total: 5,
            open: 2,
            resolved: 3,
            breached: 1,
        };
        let categories = vec![CategoryCount {
            category: TicketCategory::It,
            count: 5,
        }];
        let staff = vec![StaffPerformanceRow {
            name: "Staff Support".to_string(),
            avg_hours: 4.5,
            count: 3,
        }];

        let data = build_dashboard(counts, categories, staff);

        assert_eq!(data.total_tickets, 5);
        assert_eq!(data.staff_performance[0].name, "Staff Support");
        assert_eq!(data.category_data[0].count, 5);
    }

    #[test]
    fn empty_store_serializes_to_the_documented_shape() {
        let data = build_dashboard(empty_counts(), vec![], vec![]);
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["totalTickets"], 0);
        assert_eq!(json["categoryData"], serde_json::json!([]));
        assert_eq!(json["staffPerformance"][0]["name"], "No Data");
    }
}
