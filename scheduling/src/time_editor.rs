//! Time-slot assignment for a set of selected days.
//!
//! After day selection, each day carries its own set of chosen `HH:MM`
//! start times. Toggling can target one day or broadcast across all of
//! them; committing produces the per-day diff handed to persistence.

use crate::availability::AvailabilityMap;
use crate::calendar::date_key;
use crate::policy::SchedulePolicy;
use chrono::NaiveDate;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Which day the next toggle applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveDay {
    /// Broadcast toggles to every selected day.
    All,
    /// Toggle only the named day (a `YYYY-MM-DD` key).
    Day(String),
}

/// Working state of the "assign times to selected days" step.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityEditor {
    times: BTreeMap<String, BTreeSet<String>>,
    active: ActiveDay,
}

impl AvailabilityEditor {
    /// Seed the editor for the given days.
    ///
    /// Each day seeds from its own existing availability entry when one is
    /// present (editing a published or blocked day), otherwise with the
    /// full standard catalog pre-selected. With a single day the active
    /// filter is that day; with several it starts on "all".
    pub fn new(days: &[NaiveDate], existing: &AvailabilityMap, policy: &SchedulePolicy) -> Self {
        let mut times = BTreeMap::new();
        for day in days {
            let key = date_key(*day);
            let seed: BTreeSet<String> = match existing.entry(&key) {
                Some(entry) => entry.clone(),
                None => policy.standard_slots.iter().cloned().collect(),
            };
            times.insert(key, seed);
        }

        let active = if days.len() == 1 {
            ActiveDay::Day(date_key(days[0]))
        } else {
            ActiveDay::All
        };

        Self { times, active }
    }

    pub fn active(&self) -> &ActiveDay {
        &self.active
    }

    /// Change which day the next toggle applies to. No effect on the time
    /// sets themselves.
    pub fn set_active(&mut self, active: ActiveDay) {
        self.active = active;
    }

    /// The day keys under edit, ascending.
    pub fn day_keys(&self) -> Vec<String> {
        self.times.keys().cloned().collect()
    }

    /// Chosen times for one day, ascending.
    pub fn times_for(&self, key: &str) -> Vec<String> {
        self.times
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `time` reads as selected under the current filter. In "all"
    /// mode the first day acts as the reference.
    pub fn is_selected(&self, time: &str) -> bool {
        self.reference_set()
            .map(|set| set.contains(time))
            .unwrap_or(false)
    }

    fn reference_set(&self) -> Option<&BTreeSet<String>> {
        match &self.active {
            ActiveDay::All => self.times.values().next(),
            ActiveDay::Day(key) => self.times.get(key),
        }
    }

    /// Toggle a time slot under the current filter.
    ///
    /// Removal keeps every day's set non-empty: deselecting the last
    /// remaining time of a day is a no-op. The guard holds on the broadcast
    /// path too — a broadcast removal that would empty any day's set is
    /// rejected whole, so "blocked" (an empty set) can only ever be
    /// produced by the explicit block-day action.
    pub fn toggle(&mut self, time: &str) {
        match self.active.clone() {
            ActiveDay::All => {
                let removing = self.is_selected(time);
                if removing {
                    let would_empty_a_day = self
                        .times
                        .values()
                        .any(|set| set.contains(time) && set.len() == 1);
                    if would_empty_a_day {
                        debug!("not removing {}: it is some day's last slot", time);
                        return;
                    }
                    for set in self.times.values_mut() {
                        set.remove(time);
                    }
                } else {
                    for set in self.times.values_mut() {
                        set.insert(time.to_string());
                    }
                }
            }
            ActiveDay::Day(key) => {
                let set = match self.times.get_mut(&key) {
                    Some(set) => set,
                    None => return,
                };
                if set.contains(time) {
                    if set.len() == 1 {
                        debug!("not removing {}: last slot of {}", time, key);
                        return;
                    }
                    set.remove(time);
                } else {
                    set.insert(time.to_string());
                }
            }
        }
    }

    /// Emit the final per-day time lists, ascending within each day.
    pub fn commit(&self) -> BTreeMap<String, Vec<String>> {
        self.times
            .iter()
            .map(|(key, set)| (key.clone(), set.iter().cloned().collect()))
            .collect()
    }
}
