// service/sla.rs
use chrono::{DateTime, Duration, Utc};

use crate::models::ticketmodel::{SlaStatus, TicketPriority};

/// Response-time window granted to each priority tier.
fn offset_for(priority: TicketPriority) -> Duration {
    match priority {
        TicketPriority::Critical => Duration::hours(2),
        TicketPriority::High => Duration::hours(4),
        TicketPriority::Medium => Duration::hours(24),
        TicketPriority::Low => Duration::hours(48),
    }
}

/// Absolute due instant for a ticket at `priority`, measured from `now`.
///
/// Callers re-run this on every priority change; the stored due date is
/// always overwritten, never left stale.
pub fn due_date_for(priority: TicketPriority, now: DateTime<Utc>) -> DateTime<Utc> {
    now + offset_for(priority)
}

/// Lazy breach evaluation against a due date. Breach state is derived at
/// read time rather than maintained transactionally.
pub fn sla_status_at(due_date: DateTime<Utc>, now: DateTime<Utc>) -> SlaStatus {
    if now > due_date {
        SlaStatus::Breached
    } else if due_date - now <= Duration::hours(1) {
        SlaStatus::AtRisk
    } else {
        SlaStatus::WithinSla
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_match_priority_tiers() {
        let now = Utc::now();
        assert_eq!(
            due_date_for(TicketPriority::Critical, now) - now,
            Duration::hours(2)
        );
        assert_eq!(
            due_date_for(TicketPriority::High, now) - now,
            Duration::hours(4)
        );
        assert_eq!(
            due_date_for(TicketPriority::Medium, now) - now,
            Duration::hours(24)
        );
        assert_eq!(
            due_date_for(TicketPriority::Low, now) - now,
            Duration::hours(48)
        );
    }

    #[test]
    fn recompute_is_anchored_at_change_time() {
        let created = Utc::now();
        let changed = created + Duration::hours(10);

        // Escalating a Low ticket to Critical re-anchors the window at the
        // moment of the change, not at creation.
        let due = due_date_for(TicketPriority::Critical, changed);
        assert_eq!(due - changed, Duration::hours(2));
        assert_eq!(due - created, Duration::hours(12));
    }

    #[test]
    fn breach_states_follow_the_clock() {
        let now = Utc::now();

        assert_eq!(
            sla_status_at(now + Duration::hours(5), now),
            SlaStatus::WithinSla
        );
        assert_eq!(
            sla_status_at(now + Duration::minutes(30), now),
            SlaStatus::AtRisk
        );
        assert_eq!(
            sla_status_at(now - Duration::minutes(1), now),
            SlaStatus::Breached
        );
    }
}
