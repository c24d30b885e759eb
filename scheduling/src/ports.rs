//! Boundary interfaces to the persistence layer and user directory.
//!
//! The engine never talks HTTP itself; the frontend's API client implements
//! these traits, and tests substitute in-memory fakes. Trait futures are
//! `?Send` so implementations can run on wasm.

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    Appointment, AppointmentStatus, AvailabilitySlot, NewAppointment, NewAvailabilitySlot,
    Participant, Role,
};
use std::collections::HashMap;
use thiserror::Error;

/// Failure talking to the API, classified the way the UI reports it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("{message}")]
    Status { code: u16, message: String },
}

impl ApiError {
    /// Classify a non-2xx response, falling back to standard messages when
    /// the body carries none.
    pub fn from_status(code: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty()).unwrap_or_else(|| {
            match code {
                400 => "Invalid data sent to the server.",
                401 => "Authentication required.",
                403 => "You do not have permission for this action.",
                404 => "Resource not found.",
                500 => "Internal server error.",
                _ => "Unexpected server error.",
            }
            .to_string()
        });
        ApiError::Status { code, message }
    }
}

/// Appointment operations the engine consumes.
#[async_trait(?Send)]
pub trait AppointmentGateway {
    /// All appointments for a student or psychologist.
    async fn fetch_appointments(&self, subject_id: &str, role: Role) -> Result<Vec<Appointment>>;

    /// Request a new appointment against a published slot.
    async fn create_appointment(&self, new: &NewAppointment) -> Result<Appointment>;

    /// Confirm or cancel an appointment.
    async fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment>;
}

/// Availability-slot operations the engine consumes.
#[async_trait(?Send)]
pub trait AvailabilityGateway {
    /// Every slot published by a psychologist.
    async fn fetch_slots(&self, psychologist_id: &str) -> Result<Vec<AvailabilitySlot>>;

    /// Publish one new slot.
    async fn create_slot(&self, new: &NewAvailabilitySlot) -> Result<()>;

    /// Withdraw one slot.
    async fn delete_slot(&self, slot_id: &str) -> Result<()>;
}

/// Pre-loaded lookup of user ids to display data, so event labelling stays
/// synchronous during render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantDirectory {
    by_id: HashMap<String, Participant>,
}

impl ParticipantDirectory {
    pub fn from_participants(participants: Vec<Participant>) -> Self {
        Self {
            by_id: participants
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
        }
    }

    pub fn resolve(&self, user_id: &str) -> Option<&Participant> {
        self.by_id.get(user_id)
    }

    /// Display name for a user, with the placeholder shown while a
    /// participant is unknown to the directory.
    pub fn display_name(&self, user_id: &str) -> String {
        self.resolve(user_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "...".to_string())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_resolution() {
        let directory = ParticipantDirectory::from_participants(vec![Participant {
            id: "u1".to_string(),
            name: "Ana Souza".to_string(),
            avatar_url: Some("https://example.test/ana.png".to_string()),
        }]);

        assert_eq!(directory.display_name("u1"), "Ana Souza");
        assert_eq!(directory.display_name("unknown"), "...");
        assert!(directory.resolve("u1").unwrap().avatar_url.is_some());
    }

    #[test]
    fn test_api_error_status_fallback_messages() {
        let err = ApiError::from_status(404, None);
        assert_eq!(err.to_string(), "Resource not found.");

        let err = ApiError::from_status(400, Some("  ".to_string()));
        assert_eq!(err.to_string(), "Invalid data sent to the server.");

        let err = ApiError::from_status(500, Some("database offline".to_string()));
        assert_eq!(err.to_string(), "database offline");
    }
}
