//! Pending day selection for the "publish availability" workflow.
//!
//! A psychologist either toggles days one by one or picks a start/end pair
//! and lets the range fill in. The selection only exists while the workflow
//! is open; it is dropped on cancel and handed off on proceed.

use crate::availability::AvailabilityMap;
use crate::calendar::date_key;
use crate::policy::SchedulePolicy;
use chrono::{Datelike, NaiveDate, Weekday};
use log::debug;
use std::collections::BTreeSet;

/// How days are being picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Toggle individual days.
    Single,
    /// Pick a start day, then an end day; the inclusive range fills in.
    Interval,
}

/// Progress through an interval pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalPhase {
    /// No interval pick in progress (single mode, or interval complete).
    None,
    SelectingStart,
    SelectingEnd,
}

/// Checks applied before a day may join the selection.
pub struct SelectionGuard<'a> {
    pub today: NaiveDate,
    pub availability: &'a AvailabilityMap,
    pub policy: &'a SchedulePolicy,
}

impl SelectionGuard<'_> {
    fn is_past(&self, day: NaiveDate) -> bool {
        day < self.today || (self.policy.today_is_past && day == self.today)
    }

    fn is_published(&self, day: NaiveDate) -> bool {
        self.availability.is_published(&date_key(day))
    }

    fn is_weekend(&self, day: NaiveDate) -> bool {
        matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// The transient set of days a psychologist has marked for new
/// availability.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySelection {
    mode: SelectionMode,
    phase: IntervalPhase,
    anchor: Option<NaiveDate>,
    days: BTreeSet<NaiveDate>,
}

impl DaySelection {
    /// A fresh selection session, starting in single mode.
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::Single,
            phase: IntervalPhase::None,
            anchor: None,
            days: BTreeSet::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn phase(&self) -> IntervalPhase {
        self.phase
    }

    /// Swap between single and interval mode. Always clears the current
    /// pick; entering interval mode arms the start phase.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            SelectionMode::Single => SelectionMode::Interval,
            SelectionMode::Interval => SelectionMode::Single,
        };
        self.phase = match self.mode {
            SelectionMode::Interval => IntervalPhase::SelectingStart,
            SelectionMode::Single => IntervalPhase::None,
        };
        self.days.clear();
        self.anchor = None;
    }

    /// Apply a day click to the selection.
    ///
    /// Days that are past or already published never join; in interval mode
    /// the filled range additionally drops weekends. All rejections are
    /// silent no-ops, matching the calendar's clickability rules.
    pub fn select(&mut self, day: NaiveDate, guard: &SelectionGuard<'_>) {
        if guard.is_past(day) {
            debug!("ignoring selection of past day {}", day);
            return;
        }
        if guard.is_published(day) {
            debug!("ignoring selection of already published day {}", day);
            return;
        }

        match self.mode {
            SelectionMode::Single => {
                if !self.days.remove(&day) {
                    self.days.insert(day);
                }
            }
            SelectionMode::Interval => match self.phase {
                IntervalPhase::SelectingStart => {
                    self.anchor = Some(day);
                    self.days.clear();
                    self.days.insert(day);
                    self.phase = IntervalPhase::SelectingEnd;
                }
                IntervalPhase::SelectingEnd => {
                    let anchor = match self.anchor {
                        Some(anchor) => anchor,
                        None => return,
                    };
                    let (from, to) = if anchor <= day { (anchor, day) } else { (day, anchor) };

                    self.days.clear();
                    let mut date = from;
                    while date <= to {
                        let skip_weekend =
                            guard.is_weekend(date) && !guard.policy.weekends_selectable;
                        if !skip_weekend && !guard.is_published(date) {
                            self.days.insert(date);
                        }
                        date = match date.succ_opt() {
                            Some(next) => next,
                            None => break,
                        };
                    }
                    // Interval complete; a fresh mode toggle starts another
                    self.phase = IntervalPhase::None;
                }
                IntervalPhase::None => {}
            },
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// The selected days in ascending order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.days.iter().copied().collect()
    }

    /// Consume the selection, handing the day set to the time-assignment
    /// step.
    pub fn into_days(self) -> Vec<NaiveDate> {
        self.days.into_iter().collect()
    }

    /// The helper text shown next to the selection controls.
    pub fn instruction(&self) -> String {
        match (self.mode, self.phase) {
            (SelectionMode::Interval, IntervalPhase::SelectingStart) => {
                "Select the start day".to_string()
            }
            (SelectionMode::Interval, IntervalPhase::SelectingEnd) => {
                "Select the end day".to_string()
            }
            _ => format!(
                "{} day{} selected",
                self.days.len(),
                if self.days.len() == 1 { "" } else { "s" }
            ),
        }
    }
}

impl Default for DaySelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn guard<'a>(
        today: NaiveDate,
        availability: &'a AvailabilityMap,
        policy: &'a SchedulePolicy,
    ) -> SelectionGuard<'a> {
        SelectionGuard {
            today,
            availability,
            policy,
        }
    }

    #[test]
    fn test_single_mode_toggles_membership() {
        let availability = AvailabilityMap::new();
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 1), &availability, &policy);

        let mut selection = DaySelection::new();
        let monday = date(2025, 8, 11);

        selection.select(monday, &guard);
        assert!(selection.contains(monday));

        selection.select(monday, &guard);
        assert!(!selection.contains(monday));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_past_days_are_silently_rejected() {
        let availability = AvailabilityMap::new();
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 8), &availability, &policy);

        let mut selection = DaySelection::new();
        selection.select(date(2025, 8, 1), &guard);
        assert!(selection.is_empty());

        // Today itself is never past
        selection.select(date(2025, 8, 8), &guard);
        assert!(selection.contains(date(2025, 8, 8)));
    }

    #[test]
    fn test_published_days_are_silently_rejected() {
        let mut availability = AvailabilityMap::new();
        availability.insert("2025-08-11".to_string(), ["09:00".to_string()]);
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 1), &availability, &policy);

        let mut selection = DaySelection::new();
        selection.select(date(2025, 8, 11), &guard);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_blocked_day_is_still_selectable() {
        // An explicitly blocked day has an entry but no open times, so it
        // may be re-selected for new availability.
        let mut availability = AvailabilityMap::new();
        availability.block("2025-08-11");
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 1), &availability, &policy);

        let mut selection = DaySelection::new();
        selection.select(date(2025, 8, 11), &guard);
        assert!(selection.contains(date(2025, 8, 11)));
    }

    #[test]
    fn test_toggle_mode_clears_selection() {
        let availability = AvailabilityMap::new();
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 1), &availability, &policy);

        let mut selection = DaySelection::new();
        selection.select(date(2025, 8, 11), &guard);
        assert_eq!(selection.len(), 1);

        selection.toggle_mode();
        assert_eq!(selection.mode(), SelectionMode::Interval);
        assert_eq!(selection.phase(), IntervalPhase::SelectingStart);
        assert!(selection.is_empty());

        selection.toggle_mode();
        assert_eq!(selection.mode(), SelectionMode::Single);
        assert_eq!(selection.phase(), IntervalPhase::None);
    }

    #[test]
    fn test_interval_fills_range_excluding_weekends_and_published() {
        let mut availability = AvailabilityMap::new();
        // Wednesday Aug 13 already has published times
        availability.insert("2025-08-13".to_string(), ["09:00".to_string()]);
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 1), &availability, &policy);

        let mut selection = DaySelection::new();
        selection.toggle_mode();

        // Friday Aug 8 through Thursday Aug 14, spanning a weekend
        selection.select(date(2025, 8, 8), &guard);
        assert_eq!(selection.phase(), IntervalPhase::SelectingEnd);
        assert_eq!(selection.days(), vec![date(2025, 8, 8)]);

        selection.select(date(2025, 8, 14), &guard);
        assert_eq!(selection.phase(), IntervalPhase::None);
        assert_eq!(
            selection.days(),
            vec![
                date(2025, 8, 8),  // Fri
                date(2025, 8, 11), // Mon
                date(2025, 8, 12), // Tue
                date(2025, 8, 14), // Thu
            ]
        );
    }

    #[test]
    fn test_interval_accepts_reversed_endpoints() {
        let availability = AvailabilityMap::new();
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 1), &availability, &policy);

        let mut selection = DaySelection::new();
        selection.toggle_mode();
        selection.select(date(2025, 8, 14), &guard);
        selection.select(date(2025, 8, 11), &guard);

        assert_eq!(
            selection.days(),
            vec![
                date(2025, 8, 11),
                date(2025, 8, 12),
                date(2025, 8, 13),
                date(2025, 8, 14),
            ]
        );
    }

    #[test]
    fn test_completed_interval_ignores_further_clicks() {
        let availability = AvailabilityMap::new();
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 1), &availability, &policy);

        let mut selection = DaySelection::new();
        selection.toggle_mode();
        selection.select(date(2025, 8, 11), &guard);
        selection.select(date(2025, 8, 12), &guard);
        let picked = selection.days();

        selection.select(date(2025, 8, 20), &guard);
        assert_eq!(selection.days(), picked);
    }

    #[test]
    fn test_instruction_text() {
        let availability = AvailabilityMap::new();
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 1), &availability, &policy);

        let mut selection = DaySelection::new();
        assert_eq!(selection.instruction(), "0 days selected");

        selection.select(date(2025, 8, 11), &guard);
        assert_eq!(selection.instruction(), "1 day selected");

        selection.toggle_mode();
        assert_eq!(selection.instruction(), "Select the start day");

        selection.select(date(2025, 8, 11), &guard);
        assert_eq!(selection.instruction(), "Select the end day");

        selection.select(date(2025, 8, 12), &guard);
        assert_eq!(selection.instruction(), "2 days selected");
    }

    #[test]
    fn test_into_days_is_ascending() {
        let availability = AvailabilityMap::new();
        let policy = SchedulePolicy::default();
        let guard = guard(date(2025, 8, 1), &availability, &policy);

        let mut selection = DaySelection::new();
        selection.select(date(2025, 8, 14), &guard);
        selection.select(date(2025, 8, 11), &guard);

        assert_eq!(
            selection.into_days(),
            vec![date(2025, 8, 11), date(2025, 8, 14)]
        );
    }
}
