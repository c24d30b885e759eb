//! Per-day render state derivation.
//!
//! One pass over a calendar day merges the three temporal data sets
//! (appointments, published availability, pending selection) into the flags
//! the rendering layer needs, plus what a click on the day should do for
//! the active role.

use crate::availability::AvailabilityMap;
use crate::calendar::{date_key, CalendarDay, EventsByDate};
use crate::policy::SchedulePolicy;
use crate::selection::DaySelection;
use chrono::{Datelike, NaiveDate, Weekday};
use shared::Role;

/// What a click on a day should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionTarget {
    /// Day is inert.
    None,
    /// Open the day detail panel.
    OpenDayDetail,
    /// Toggle the day in the pending selection.
    ToggleSelection,
}

/// Render classification of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRenderState {
    pub is_past: bool,
    pub is_weekend: bool,
    pub is_today: bool,
    pub has_events: bool,
    pub is_available: bool,
    pub is_pending: bool,
    pub is_highlighted: bool,
    /// Past-or-weekend with no events: permanently inert, rendered muted.
    pub is_muted: bool,
    pub is_clickable: bool,
    pub interaction: InteractionTarget,
}

/// Everything the resolver needs besides the day itself. Built once per
/// render pass and reused for every cell.
pub struct DayStateContext<'a> {
    pub today: NaiveDate,
    pub role: Role,
    /// Whether the psychologist's day-selection workflow is active.
    pub selection_active: bool,
    pub events: &'a EventsByDate,
    pub availability: &'a AvailabilityMap,
    pub pending: Option<&'a DaySelection>,
    /// Day currently open in the detail panel, if any.
    pub viewing_day: Option<NaiveDate>,
    pub policy: &'a SchedulePolicy,
}

impl DayStateContext<'_> {
    /// Classify a single day.
    pub fn resolve(&self, day: CalendarDay) -> DayRenderState {
        let date = day.date;
        let key = date_key(date);

        let is_past =
            date < self.today || (self.policy.today_is_past && date == self.today);
        let is_weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let is_today = date == self.today;
        let has_events = self
            .events
            .get(&key)
            .map(|events| !events.is_empty())
            .unwrap_or(false);
        let is_available = self.availability.is_published(&key);
        let is_pending = self.role == Role::Psychologist
            && self
                .pending
                .map(|selection| selection.contains(date))
                .unwrap_or(false);
        let is_highlighted = is_pending || self.viewing_day == Some(date);
        let is_muted = (is_past || is_weekend) && !has_events;

        let selectable_weekend = !is_weekend || self.policy.weekends_selectable;
        let (mut is_clickable, interaction) = match (self.role, self.selection_active) {
            (Role::Psychologist, true) => {
                let clickable = !is_past && selectable_weekend && !is_available;
                (clickable, InteractionTarget::ToggleSelection)
            }
            (Role::Psychologist, false) => {
                (is_available || has_events, InteractionTarget::OpenDayDetail)
            }
            // Students never see selection mode
            (Role::Student, _) => (
                (is_available && !is_past) || has_events,
                InteractionTarget::OpenDayDetail,
            ),
        };

        if is_muted {
            is_clickable = false;
        }

        DayRenderState {
            is_past,
            is_weekend,
            is_today,
            has_events,
            is_available,
            is_pending,
            is_highlighted,
            is_muted,
            is_clickable,
            interaction: if is_clickable {
                interaction
            } else {
                InteractionTarget::None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionGuard;
    use shared::{Appointment, AppointmentStatus};
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(d: NaiveDate) -> CalendarDay {
        CalendarDay {
            date: d,
            in_year: true,
        }
    }

    fn appointment_on(key: &str) -> (String, Vec<Appointment>) {
        let appt = Appointment {
            id: "appt_1".to_string(),
            student_id: "student_1".to_string(),
            psychologist_id: "psych_1".to_string(),
            slot_id: "slot_1".to_string(),
            start: format!("{}T14:00:00-03:00", key),
            end: format!("{}T15:00:00-03:00", key),
            status: AppointmentStatus::Confirmed,
            requested_at: format!("{}T09:00:00-03:00", key),
        };
        (key.to_string(), vec![appt])
    }

    struct Fixture {
        today: NaiveDate,
        events: EventsByDate,
        availability: AvailabilityMap,
        policy: SchedulePolicy,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                today: date(2025, 8, 8),
                events: HashMap::new(),
                availability: AvailabilityMap::new(),
                policy: SchedulePolicy::default(),
            }
        }

        fn context(&self, role: Role, selection_active: bool) -> DayStateContext<'_> {
            DayStateContext {
                today: self.today,
                role,
                selection_active,
                events: &self.events,
                availability: &self.availability,
                pending: None,
                viewing_day: None,
                policy: &self.policy,
            }
        }
    }

    #[test]
    fn test_selection_mode_allows_free_future_weekdays() {
        let fixture = Fixture::new();
        let ctx = fixture.context(Role::Psychologist, true);

        // A weekday 10 days out with no availability
        let state = ctx.resolve(day(date(2025, 8, 18)));
        assert!(state.is_clickable);
        assert_eq!(state.interaction, InteractionTarget::ToggleSelection);
    }

    #[test]
    fn test_selection_mode_excludes_available_days() {
        let mut fixture = Fixture::new();
        fixture
            .availability
            .insert("2025-08-18".to_string(), ["09:00".to_string()]);
        let ctx = fixture.context(Role::Psychologist, true);

        let state = ctx.resolve(day(date(2025, 8, 18)));
        assert!(state.is_available);
        assert!(!state.is_clickable);
        assert_eq!(state.interaction, InteractionTarget::None);
    }

    #[test]
    fn test_selection_mode_excludes_past_and_weekend() {
        let fixture = Fixture::new();
        let ctx = fixture.context(Role::Psychologist, true);

        let past = ctx.resolve(day(date(2025, 8, 1)));
        assert!(past.is_past);
        assert!(!past.is_clickable);

        let saturday = ctx.resolve(day(date(2025, 8, 16)));
        assert!(saturday.is_weekend);
        assert!(!saturday.is_clickable);
    }

    #[test]
    fn test_today_is_not_past() {
        let fixture = Fixture::new();
        let ctx = fixture.context(Role::Psychologist, true);

        let state = ctx.resolve(day(fixture.today));
        assert!(!state.is_past);
        assert!(state.is_today);
        assert!(state.is_clickable);
    }

    #[test]
    fn test_psychologist_outside_selection_opens_detail() {
        let mut fixture = Fixture::new();
        fixture
            .availability
            .insert("2025-08-18".to_string(), ["09:00".to_string()]);
        let (key, events) = appointment_on("2025-08-19");
        fixture.events.insert(key, events);

        let ctx = fixture.context(Role::Psychologist, false);

        let available = ctx.resolve(day(date(2025, 8, 18)));
        assert!(available.is_clickable);
        assert_eq!(available.interaction, InteractionTarget::OpenDayDetail);

        let with_events = ctx.resolve(day(date(2025, 8, 19)));
        assert!(with_events.is_clickable);
        assert_eq!(with_events.interaction, InteractionTarget::OpenDayDetail);

        let bare = ctx.resolve(day(date(2025, 8, 20)));
        assert!(!bare.is_clickable);
    }

    #[test]
    fn test_student_cannot_open_past_availability() {
        let mut fixture = Fixture::new();
        fixture
            .availability
            .insert("2025-08-04".to_string(), ["09:00".to_string()]);
        fixture
            .availability
            .insert("2025-08-18".to_string(), ["09:00".to_string()]);

        let ctx = fixture.context(Role::Student, false);

        let past_available = ctx.resolve(day(date(2025, 8, 4)));
        assert!(!past_available.is_clickable);

        let future_available = ctx.resolve(day(date(2025, 8, 18)));
        assert!(future_available.is_clickable);
        assert_eq!(future_available.interaction, InteractionTarget::OpenDayDetail);
    }

    #[test]
    fn test_student_can_open_past_day_with_events() {
        let mut fixture = Fixture::new();
        let (key, events) = appointment_on("2025-08-04");
        fixture.events.insert(key, events);

        let ctx = fixture.context(Role::Student, false);
        let state = ctx.resolve(day(date(2025, 8, 4)));
        assert!(state.has_events);
        assert!(state.is_clickable);
    }

    #[test]
    fn test_past_weekend_without_events_is_muted() {
        let fixture = Fixture::new();
        let ctx = fixture.context(Role::Psychologist, false);

        let state = ctx.resolve(day(date(2025, 8, 2)));
        assert!(state.is_past);
        assert!(state.is_weekend);
        assert!(state.is_muted);
        assert!(!state.is_clickable);
    }

    #[test]
    fn test_pending_and_viewing_drive_highlight() {
        let mut fixture = Fixture::new();
        let policy = fixture.policy.clone();
        let mut selection = DaySelection::new();
        let availability = AvailabilityMap::new();
        selection.select(
            date(2025, 8, 18),
            &SelectionGuard {
                today: fixture.today,
                availability: &availability,
                policy: &policy,
            },
        );

        fixture.events.clear();
        let ctx = DayStateContext {
            today: fixture.today,
            role: Role::Psychologist,
            selection_active: true,
            events: &fixture.events,
            availability: &fixture.availability,
            pending: Some(&selection),
            viewing_day: Some(date(2025, 8, 20)),
            policy: &fixture.policy,
        };

        let pending = ctx.resolve(day(date(2025, 8, 18)));
        assert!(pending.is_pending);
        assert!(pending.is_highlighted);

        let viewing = ctx.resolve(day(date(2025, 8, 20)));
        assert!(!viewing.is_pending);
        assert!(viewing.is_highlighted);

        let plain = ctx.resolve(day(date(2025, 8, 21)));
        assert!(!plain.is_highlighted);
    }

    #[test]
    fn test_students_never_see_pending() {
        let fixture = Fixture::new();
        let policy = fixture.policy.clone();
        let availability = AvailabilityMap::new();
        let mut selection = DaySelection::new();
        selection.select(
            date(2025, 8, 18),
            &SelectionGuard {
                today: fixture.today,
                availability: &availability,
                policy: &policy,
            },
        );

        let ctx = DayStateContext {
            today: fixture.today,
            role: Role::Student,
            selection_active: false,
            events: &fixture.events,
            availability: &fixture.availability,
            pending: Some(&selection),
            viewing_day: None,
            policy: &fixture.policy,
        };

        let state = ctx.resolve(day(date(2025, 8, 18)));
        assert!(!state.is_pending);
        assert!(!state.is_highlighted);
    }
}
