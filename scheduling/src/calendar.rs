//! Calendar grid generation and date-keyed grouping.
//!
//! The schedule views render a whole year as a continuous, gapless run of
//! 7-day weeks. Everything here is pure: the grid for a given year is always
//! the same, and grouping never mutates its inputs.

use chrono::{DateTime, Datelike, Duration, NaiveDate};
use log::warn;
use shared::Appointment;
use std::collections::HashMap;

/// Appointments grouped by the canonical `YYYY-MM-DD` key of their start
/// instant.
pub type EventsByDate = HashMap<String, Vec<Appointment>>;

/// A single cell of the year grid.
///
/// `in_year` is false for the leading days borrowed from December of the
/// previous year and the trailing days borrowed from January of the next
/// year, which only exist to keep every week at exactly 7 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_year: bool,
}

/// One rendered week, Sunday through Saturday.
pub type CalendarWeek = [CalendarDay; 7];

/// Canonical `YYYY-MM-DD` key for a calendar date.
pub fn date_key(date: NaiveDate) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Parse a `YYYY-MM-DD` key back into a date. Returns `None` for anything
/// that is not a real calendar date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = key.split('-').collect();
    if parts.len() != 3 {
        return None;
    }

    let year = parts[0].parse::<i32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let day = parts[2].parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Local wall-clock date of an RFC 3339 instant, using the offset the
/// instant itself carries. Falls back to the leading date portion for
/// strings that are not full timestamps.
pub fn local_date_of(instant: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(instant) {
        return Some(dt.date_naive());
    }
    instant.split('T').next().and_then(parse_date_key)
}

/// `HH:MM` wall-clock time of an RFC 3339 instant, for event chips and the
/// day detail panel.
pub fn event_time(instant: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(instant)
        .ok()
        .map(|dt| dt.format("%H:%M").to_string())
}

/// Generate the continuous grid for `year`: every date from January 1 to
/// December 31, padded at the start with the final days of the previous year
/// so January 1 falls on its weekday (0 = Sunday), and padded at the end so
/// the final week has 7 days.
pub fn year_grid(year: i32) -> Vec<CalendarWeek> {
    let (jan1, dec31) = match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            warn!("year {} is outside the supported calendar range", year);
            return Vec::new();
        }
    };

    let lead = jan1.weekday().num_days_from_sunday() as i64;
    let total = lead + (dec31 - jan1).num_days() + 1;
    let trail = (7 - total % 7) % 7;

    let start = jan1 - Duration::days(lead);
    let end = dec31 + Duration::days(trail);

    let mut days = Vec::with_capacity((total + trail) as usize);
    let mut date = start;
    while date <= end {
        days.push(CalendarDay {
            date,
            in_year: date.year() == year,
        });
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    days.chunks_exact(7)
        // chunks_exact(7) can only yield 7-element slices
        .map(|week| <CalendarWeek>::try_from(week).unwrap())
        .collect()
}

/// Group appointments by the `YYYY-MM-DD` key of their start instant.
///
/// Appointments whose start instant cannot be parsed are excluded from the
/// grouping rather than failing the whole calendar derivation.
pub fn group_appointments_by_date(appointments: &[Appointment]) -> EventsByDate {
    let mut grouped: EventsByDate = HashMap::new();

    for appointment in appointments {
        match local_date_of(&appointment.start) {
            Some(date) => {
                grouped
                    .entry(date_key(date))
                    .or_default()
                    .push(appointment.clone());
            }
            None => {
                warn!(
                    "skipping appointment {} with unparseable start instant {:?}",
                    appointment.id, appointment.start
                );
            }
        }
    }

    grouped
}

/// Human-readable name for a month number (1-12).
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Invalid Month",
    }
}

/// Long display form of a date, e.g. "Monday, August 4, 2025".
pub fn format_long_date(date: NaiveDate) -> String {
    let weekday = match date.weekday().num_days_from_sunday() {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        _ => "Saturday",
    };
    format!(
        "{}, {} {}, {}",
        weekday,
        month_name(date.month()),
        date.day(),
        date.year()
    )
}
