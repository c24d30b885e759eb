//! Day detail assembly.
//!
//! Merges a single day's appointments and published times into the view
//! model behind the detail panel, and decides which actions are legal for
//! the day's temporal state.

use crate::availability::AvailabilityMap;
use crate::calendar::{date_key, event_time, format_long_date, EventsByDate};
use crate::policy::SchedulePolicy;
use crate::ports::ParticipantDirectory;
use chrono::NaiveDate;
use shared::{AppointmentStatus, Role};

/// One appointment row in the detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DayDetailEvent {
    pub id: String,
    /// `HH:MM` start time; "--:--" when the instant could not be parsed.
    pub time: String,
    pub title: String,
    pub status: AppointmentStatus,
    pub status_label: &'static str,
}

/// View model for the day detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DayDetailView {
    pub date: NaiveDate,
    pub heading: String,
    pub events: Vec<DayDetailEvent>,
    /// Published times for the day, ascending; empty for blocked or
    /// unpublished days.
    pub times: Vec<String>,
    pub is_past: bool,
    /// "Edit availability" offered (psychologist, day not past).
    pub can_edit: bool,
    /// "Block day" offered (psychologist, day not past).
    pub can_block: bool,
}

/// Assemble the detail view for one day.
pub fn assemble_day_detail(
    day: NaiveDate,
    today: NaiveDate,
    role: Role,
    events_by_date: &EventsByDate,
    availability: &AvailabilityMap,
    directory: &ParticipantDirectory,
    policy: &SchedulePolicy,
) -> DayDetailView {
    let key = date_key(day);
    let is_past = day < today || (policy.today_is_past && day == today);

    let mut events: Vec<DayDetailEvent> = events_by_date
        .get(&key)
        .map(|appointments| {
            appointments
                .iter()
                .map(|appointment| DayDetailEvent {
                    id: appointment.id.clone(),
                    time: event_time(&appointment.start)
                        .unwrap_or_else(|| "--:--".to_string()),
                    title: format!(
                        "Appointment with {}",
                        directory.display_name(appointment.counterpart_id(role))
                    ),
                    status: appointment.status,
                    status_label: appointment.status.label(),
                })
                .collect()
        })
        .unwrap_or_default();
    events.sort_by(|a, b| a.time.cmp(&b.time));

    let offers_actions = role == Role::Psychologist && !is_past;

    DayDetailView {
        date: day,
        heading: format_long_date(day),
        events,
        times: availability.times(&key),
        is_past,
        can_edit: offers_actions,
        can_block: offers_actions,
    }
}
