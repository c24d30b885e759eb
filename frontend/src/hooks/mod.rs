pub mod use_schedule;

pub use use_schedule::{use_schedule, ScheduleState, UseScheduleResult};
