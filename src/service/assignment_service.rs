// service/assignment_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, ticketdb::TicketExt, userdb::UserExt},
    models::ticketmodel::TicketCategory,
    service::error::ServiceError,
};

/// Workload-based staff selection: new tickets go to the member with the
/// fewest unresolved assignments.
#[derive(Debug, Clone)]
pub struct AssignmentService {
    db_client: Arc<DBClient>,
}

impl AssignmentService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Pick an assignee for a fresh ticket, or `None` when no staff exist
    /// (the ticket then stays in the unassigned pool).
    ///
    /// The workload read and the decision are not atomic against
    /// concurrent creations; two simultaneous tickets may land on the same
    /// member. Load leveling here is best-effort, not a hard constraint.
    pub async fn pick_assignee(
        &self,
        _category: TicketCategory,
    ) -> Result<Option<Uuid>, ServiceError> {
        // Category is accepted for future specialization; current policy
        // is category-agnostic.
        let staff = self.db_client.get_staff_users().await?;

        if staff.is_empty() {
            return Ok(None);
        }

        let mut workloads = Vec::with_capacity(staff.len());
        for member in &staff {
            let count = self.db_client.count_active_assigned(member.id).await?;
            workloads.push((member.id, count));
        }

        Ok(select_least_loaded(&workloads))
    }
}

/// Minimum-count selection with stable tie-breaking: the first entry with
/// the lowest count wins.
pub fn select_least_loaded(workloads: &[(Uuid, i64)]) -> Option<Uuid> {
    let mut best: Option<(Uuid, i64)> = None;

    for &(staff_id, count) in workloads {
        match best {
            Some((_, best_count)) if count >= best_count => {}
            _ => best = Some((staff_id, count)),
        }
    }

    best.map(|(staff_id, _)| staff_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_least_loaded_member() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        let workloads = vec![(a, 2), (b, 0), (c, 1)];
        assert_eq!(select_least_loaded(&workloads), Some(b));
    }

    #[test]
    fn ties_go_to_the_first_encountered() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let workloads = vec![(a, 1), (b, 1)];
        assert_eq!(select_least_loaded(&workloads), Some(a));
    }

    #[test]
    fn no_staff_means_unassigned() {
        assert_eq!(select_least_loaded(&[]), None);
    }
}
