//! Orchestration of the persistence boundary.
//!
//! The editor and the block-day action produce *intentions* (a per-day time
//! diff, a day to clear). This service expands those into the individual
//! slot calls the API expects: one create per new day x time, one delete per
//! withdrawn slot. Failures propagate to the caller, which keeps its
//! transient editing state so the user can retry.

use crate::availability::{AvailabilityMap, SlotIndex};
use crate::calendar::{date_key, group_appointments_by_date, parse_date_key, EventsByDate};
use crate::policy::SchedulePolicy;
use crate::ports::{AppointmentGateway, AvailabilityGateway};
use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate, NaiveTime};
use log::{info, warn};
use shared::{
    Appointment, AppointmentStatus, NewAppointment, NewAvailabilitySlot, Role, SlotStatus,
};
use std::collections::BTreeMap;

/// What a publish pass actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishOutcome {
    pub created: usize,
    pub removed: usize,
}

/// Schedule operations against a gateway implementation.
pub struct ScheduleService<G> {
    gateway: G,
    policy: SchedulePolicy,
}

impl<G> ScheduleService<G>
where
    G: AppointmentGateway + AvailabilityGateway,
{
    pub fn new(gateway: G, policy: SchedulePolicy) -> Self {
        Self { gateway, policy }
    }

    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// Fetch and group a subject's appointments by calendar date.
    pub async fn load_appointments(&self, subject_id: &str, role: Role) -> Result<EventsByDate> {
        let appointments = self.gateway.fetch_appointments(subject_id, role).await?;
        Ok(group_appointments_by_date(&appointments))
    }

    /// Fetch a psychologist's published slots as an availability map plus
    /// the index needed for later per-slot deletes.
    pub async fn load_availability(
        &self,
        psychologist_id: &str,
    ) -> Result<(AvailabilityMap, SlotIndex)> {
        let slots = self.gateway.fetch_slots(psychologist_id).await?;
        Ok(AvailabilityMap::from_slots(&slots))
    }

    /// Persist a committed editor diff.
    ///
    /// Per day: times with no corresponding open slot are created (one call
    /// each), open slots whose time was deselected are deleted. Times that
    /// are already open, or occupied by a booking, are left alone.
    pub async fn publish_availability(
        &self,
        psychologist_id: &str,
        diff: &BTreeMap<String, Vec<String>>,
        index: &SlotIndex,
    ) -> Result<PublishOutcome> {
        let mut outcome = PublishOutcome::default();

        for (key, times) in diff {
            let date = match parse_date_key(key) {
                Some(date) => date,
                None => {
                    warn!("skipping diff entry with malformed day key {:?}", key);
                    continue;
                }
            };

            let slots = index.slots_for(key);

            for time in times {
                let occupied = slots
                    .iter()
                    .any(|slot| slot.time == *time && slot.status != SlotStatus::Blocked);
                if occupied {
                    continue;
                }
                let (start, end) = match self.slot_instants(date, time) {
                    Some(instants) => instants,
                    None => {
                        warn!("skipping malformed time {:?} on {}", time, key);
                        continue;
                    }
                };
                self.gateway
                    .create_slot(&NewAvailabilitySlot {
                        psychologist_id: psychologist_id.to_string(),
                        start,
                        end,
                    })
                    .await?;
                outcome.created += 1;
            }

            for slot in slots {
                if slot.status == SlotStatus::Available && !times.contains(&slot.time) {
                    self.gateway.delete_slot(&slot.id).await?;
                    outcome.removed += 1;
                }
            }
        }

        info!(
            "published availability: {} slot(s) created, {} removed",
            outcome.created, outcome.removed
        );
        Ok(outcome)
    }

    /// Clear every unbooked slot of a day. Booked slots, and the
    /// appointments behind them, are untouched. Returns how many slots were
    /// withdrawn.
    pub async fn block_day(&self, day: NaiveDate, index: &SlotIndex) -> Result<usize> {
        let mut removed = 0;
        for slot in index.slots_for_date(day) {
            if slot.status != SlotStatus::Booked {
                self.gateway.delete_slot(&slot.id).await?;
                removed += 1;
            }
        }
        info!("blocked {}: withdrew {} slot(s)", date_key(day), removed);
        Ok(removed)
    }

    /// Request a new appointment on behalf of a student.
    pub async fn request_appointment(&self, new: &NewAppointment) -> Result<Appointment> {
        let mut missing = Vec::new();
        if new.student_id.trim().is_empty() {
            missing.push("student id");
        }
        if new.psychologist_id.trim().is_empty() {
            missing.push("psychologist id");
        }
        if new.slot_id.trim().is_empty() {
            missing.push("slot id");
        }
        if !missing.is_empty() {
            bail!("missing required fields: {}", missing.join(", "));
        }

        self.gateway.create_appointment(new).await
    }

    /// Confirm or cancel an appointment. Other statuses are owned by the
    /// server.
    pub async fn decide_appointment(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        if !status.is_decision() {
            bail!("appointments can only be moved to confirmed or cancelled from here");
        }
        self.gateway
            .update_appointment_status(appointment_id, status)
            .await
    }

    fn slot_instants(&self, date: NaiveDate, time: &str) -> Option<(String, String)> {
        let start_time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
        let start = date.and_time(start_time);
        let end = start + Duration::minutes(self.policy.slot_minutes);
        let fmt = "%Y-%m-%dT%H:%M:%S";
        Some((start.format(fmt).to_string(), end.format(fmt).to_string()))
    }
}
