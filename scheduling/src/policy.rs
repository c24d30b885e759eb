//! Scheduling policy knobs.
//!
//! The schedule views evolved a few behavioral variations (whether "today"
//! still counts as selectable, whether weekends ever are, how long a
//! published slot lasts). Those are resolved once here instead of being
//! re-decided at each call site.

/// Policy configuration for the scheduling engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePolicy {
    /// The standard daily start times offered when defining new
    /// availability, ascending.
    pub standard_slots: Vec<String>,
    /// Length of one published slot in minutes.
    pub slot_minutes: i64,
    /// Whether weekend days may be selected for new availability.
    pub weekends_selectable: bool,
    /// Whether "today" is treated as already past. When false (the
    /// default), today remains selectable and editable.
    pub today_is_past: bool,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            standard_slots: [
                "08:00", "09:00", "10:00", "11:00", "13:30", "14:30", "15:30", "16:30",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            slot_minutes: 60,
            weekends_selectable: false,
            today_is_past: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let policy = SchedulePolicy::default();
        assert_eq!(policy.standard_slots.len(), 8);
        assert_eq!(policy.standard_slots.first().unwrap(), "08:00");
        assert_eq!(policy.standard_slots.last().unwrap(), "16:30");

        // Catalog must be ascending so seeded sets stay chronological
        let mut sorted = policy.standard_slots.clone();
        sorted.sort();
        assert_eq!(sorted, policy.standard_slots);
    }
}
