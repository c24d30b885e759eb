//! Published availability, keyed by calendar date.
//!
//! A day *present* in the map with an empty time set means "explicitly
//! blocked" — every open slot was withdrawn. A day *absent* from the map was
//! never published. The distinction drives both rendering and the block-day
//! workflow, so it is preserved through every operation here.

use crate::calendar::{date_key, event_time, local_date_of};
use chrono::NaiveDate;
use log::warn;
use shared::{AvailabilitySlot, SlotStatus};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Published availability: `YYYY-MM-DD` key to the ascending set of `HH:MM`
/// start times still open for booking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityMap {
    days: BTreeMap<String, BTreeSet<String>>,
}

impl AvailabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw entry for a day: `None` when never published, `Some(empty)`
    /// when explicitly blocked.
    pub fn entry(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.days.get(key)
    }

    /// Open times for a day, ascending. Empty for blocked or unpublished
    /// days.
    pub fn times(&self, key: &str) -> Vec<String> {
        self.days
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// True when the day has at least one open time.
    pub fn is_published(&self, key: &str) -> bool {
        self.days.get(key).map(|set| !set.is_empty()).unwrap_or(false)
    }

    /// True when the day has an entry but no open times.
    pub fn is_blocked(&self, key: &str) -> bool {
        self.days.get(key).map(|set| set.is_empty()).unwrap_or(false)
    }

    /// Replace a day's times wholesale.
    pub fn insert(&mut self, key: String, times: impl IntoIterator<Item = String>) {
        self.days.insert(key, times.into_iter().collect());
    }

    /// Explicitly block a day: its entry becomes the empty set, distinct
    /// from removing the entry.
    pub fn block(&mut self, key: &str) {
        self.days.insert(key.to_string(), BTreeSet::new());
    }

    /// Merge a committed editor diff into the map.
    pub fn apply_diff(&mut self, diff: &BTreeMap<String, Vec<String>>) {
        for (key, times) in diff {
            self.insert(key.clone(), times.iter().cloned());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.days.iter()
    }

    /// Build the map from the raw slot list returned by the API, along with
    /// the slot index needed to address individual slots later.
    ///
    /// Only `available` slots contribute open times. Booked and blocked
    /// slots still mark the day as published-at-some-point, so a fully
    /// booked or blocked day keeps its (empty) entry instead of reverting
    /// to "never published". Slots with unparseable instants are skipped.
    pub fn from_slots(slots: &[AvailabilitySlot]) -> (Self, SlotIndex) {
        let mut map = AvailabilityMap::new();
        let mut index = SlotIndex::default();

        for slot in slots {
            let (date, time) = match (local_date_of(&slot.start), event_time(&slot.start)) {
                (Some(date), Some(time)) => (date, time),
                _ => {
                    warn!(
                        "skipping availability slot {} with unparseable start {:?}",
                        slot.id, slot.start
                    );
                    continue;
                }
            };

            let key = date_key(date);
            let entry = map.days.entry(key.clone()).or_default();
            if slot.status == SlotStatus::Available {
                entry.insert(time.clone());
            }

            index.by_day.entry(key).or_default().push(SlotRef {
                id: slot.id.clone(),
                time,
                status: slot.status,
            });
        }

        (map, index)
    }
}

/// Address of one published slot, kept so the engine can issue per-slot
/// delete calls when times are deselected or a day is blocked.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRef {
    pub id: String,
    /// `HH:MM` start time within its day.
    pub time: String,
    pub status: SlotStatus,
}

/// Per-day index of published slots, parallel to [`AvailabilityMap`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotIndex {
    by_day: HashMap<String, Vec<SlotRef>>,
}

impl SlotIndex {
    /// All known slots for a day.
    pub fn slots_for(&self, key: &str) -> &[SlotRef] {
        self.by_day.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All known slots for a calendar date.
    pub fn slots_for_date(&self, date: NaiveDate) -> &[SlotRef] {
        self.by_day
            .get(&date_key(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The open slot starting at `time` on the day `key`, if any.
    pub fn available_slot(&self, key: &str, time: &str) -> Option<&SlotRef> {
        self.slots_for(key)
            .iter()
            .find(|slot| slot.time == time && slot.status == SlotStatus::Available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: &str, start: &str, status: SlotStatus) -> AvailabilitySlot {
        AvailabilitySlot {
            id: id.to_string(),
            psychologist_id: "psych_1".to_string(),
            start: start.to_string(),
            end: start.to_string(),
            status,
        }
    }

    #[test]
    fn test_from_slots_groups_by_day() {
        let slots = vec![
            slot("s1", "2025-08-04T09:00:00-03:00", SlotStatus::Available),
            slot("s2", "2025-08-04T10:00:00-03:00", SlotStatus::Available),
            slot("s3", "2025-08-06T08:00:00-03:00", SlotStatus::Available),
        ];

        let (map, index) = AvailabilityMap::from_slots(&slots);
        assert_eq!(map.times("2025-08-04"), vec!["09:00", "10:00"]);
        assert_eq!(map.times("2025-08-06"), vec!["08:00"]);
        assert_eq!(index.slots_for("2025-08-04").len(), 2);
    }

    #[test]
    fn test_booked_slots_do_not_show_as_open() {
        let slots = vec![
            slot("s1", "2025-08-04T09:00:00-03:00", SlotStatus::Booked),
            slot("s2", "2025-08-04T10:00:00-03:00", SlotStatus::Available),
        ];

        let (map, index) = AvailabilityMap::from_slots(&slots);
        assert_eq!(map.times("2025-08-04"), vec!["10:00"]);
        assert!(index.available_slot("2025-08-04", "09:00").is_none());
        assert!(index.available_slot("2025-08-04", "10:00").is_some());
    }

    #[test]
    fn test_fully_booked_day_keeps_empty_entry() {
        let slots = vec![slot("s1", "2025-08-04T09:00:00-03:00", SlotStatus::Booked)];

        let (map, _) = AvailabilityMap::from_slots(&slots);
        assert!(!map.is_published("2025-08-04"));
        assert!(map.is_blocked("2025-08-04"));
        // Absent day is neither published nor blocked
        assert!(!map.is_published("2025-08-05"));
        assert!(!map.is_blocked("2025-08-05"));
    }

    #[test]
    fn test_from_slots_skips_unparseable_starts() {
        let slots = vec![
            slot("s1", "whenever", SlotStatus::Available),
            slot("s2", "2025-08-04T09:00:00-03:00", SlotStatus::Available),
        ];

        let (map, index) = AvailabilityMap::from_slots(&slots);
        assert_eq!(map.times("2025-08-04"), vec!["09:00"]);
        assert_eq!(index.slots_for("2025-08-04").len(), 1);
    }

    #[test]
    fn test_block_is_distinct_from_absent() {
        let mut map = AvailabilityMap::new();
        map.insert("2025-08-06".to_string(), ["09:00".to_string(), "10:00".to_string()]);
        assert!(map.is_published("2025-08-06"));

        map.block("2025-08-06");
        assert!(!map.is_published("2025-08-06"));
        assert!(map.is_blocked("2025-08-06"));
        assert_eq!(map.entry("2025-08-06").map(|s| s.len()), Some(0));
        assert!(map.entry("2025-08-07").is_none());
    }

    #[test]
    fn test_apply_diff_keeps_times_sorted() {
        let mut map = AvailabilityMap::new();
        let mut diff = BTreeMap::new();
        diff.insert(
            "2025-08-04".to_string(),
            vec!["14:00".to_string(), "09:00".to_string()],
        );
        map.apply_diff(&diff);
        assert_eq!(map.times("2025-08-04"), vec!["09:00", "14:00"]);
    }
}
