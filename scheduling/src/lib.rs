//! Availability/scheduling calendar engine.
//!
//! This crate holds the calendar logic behind the appointment platform's
//! schedule views: generating the year grid, deriving per-day render state
//! from appointments/availability/pending-selection, and driving the
//! multi-step workflow that turns day clicks into persisted availability.
//! Rendering and persistence live elsewhere; this crate computes state and
//! proposes diffs.

pub mod availability;
pub mod calendar;
pub mod day_detail;
pub mod day_state;
pub mod policy;
pub mod ports;
pub mod selection;
pub mod service;
pub mod time_editor;

pub use availability::{AvailabilityMap, SlotIndex, SlotRef};
pub use calendar::{
    date_key, event_time, format_long_date, group_appointments_by_date, local_date_of, month_name,
    parse_date_key, year_grid, CalendarDay, CalendarWeek, EventsByDate,
};
pub use day_detail::{assemble_day_detail, DayDetailEvent, DayDetailView};
pub use day_state::{DayRenderState, DayStateContext, InteractionTarget};
pub use policy::SchedulePolicy;
pub use ports::{ApiError, AppointmentGateway, AvailabilityGateway, ParticipantDirectory};
pub use selection::{DaySelection, IntervalPhase, SelectionGuard, SelectionMode};
pub use service::{PublishOutcome, ScheduleService};
pub use time_editor::{ActiveDay, AvailabilityEditor};
