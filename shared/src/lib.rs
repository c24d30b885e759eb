use serde::{Deserialize, Serialize};

/// Role of the authenticated user. Determines which side of an appointment
/// is "the other party" and which calendar interactions are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Psychologist,
}

/// Lifecycle status of an appointment as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    PendingApproval,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Human-facing status label shown on event chips and the day detail
    /// panel. The product copy is Portuguese.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::PendingApproval => "Pendente",
            AppointmentStatus::Confirmed => "Confirmada",
            AppointmentStatus::Cancelled => "Cancelada",
            AppointmentStatus::Completed => "Realizada",
        }
    }

    /// Statuses a psychologist may move an appointment into from the UI.
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Confirmed | AppointmentStatus::Cancelled
        )
    }
}

/// An appointment between a student and a psychologist.
///
/// Instants are RFC 3339 timestamps kept as strings at the DTO layer; the
/// scheduling engine parses them when grouping by calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub student_id: String,
    pub psychologist_id: String,
    /// ID of the availability slot this appointment was booked against.
    pub slot_id: String,
    /// Start instant (RFC 3339)
    pub start: String,
    /// End instant (RFC 3339)
    pub end: String,
    pub status: AppointmentStatus,
    /// Instant the request was made (RFC 3339)
    pub requested_at: String,
}

impl Appointment {
    /// ID of the participant on the other side of this appointment,
    /// relative to the viewer's role.
    pub fn counterpart_id(&self, role: Role) -> &str {
        match role {
            Role::Student => &self.psychologist_id,
            Role::Psychologist => &self.student_id,
        }
    }
}

/// Payload for requesting a new appointment against a published slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub student_id: String,
    pub psychologist_id: String,
    pub slot_id: String,
}

/// Status of a published availability slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Open for booking.
    Available,
    /// A student appointment occupies this slot.
    Booked,
    /// Explicitly withdrawn by the psychologist.
    Blocked,
}

/// A single published availability window, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub id: String,
    pub psychologist_id: String,
    /// Start instant (RFC 3339)
    pub start: String,
    /// End instant (RFC 3339)
    pub end: String,
    pub status: SlotStatus,
}

/// Payload for publishing one new availability slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAvailabilitySlot {
    pub psychologist_id: String,
    /// Start instant (RFC 3339)
    pub start: String,
    /// End instant (RFC 3339)
    pub end: String,
}

/// Directory entry used to label the other participant of an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}
