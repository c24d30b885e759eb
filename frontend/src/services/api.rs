use anyhow::Result;
use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use scheduling::ports::{ApiError, AppointmentGateway, AvailabilityGateway};
use serde::Serialize;
use shared::{
    Appointment, AppointmentStatus, AvailabilitySlot, NewAppointment, NewAvailabilitySlot,
    Participant, Role,
};

/// REST client for the appointment platform's API.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// The pre-loaded user directory used to label appointments.
    pub async fn fetch_participants(&self) -> Result<Vec<Participant>> {
        let response = Request::get(&format!("{}/users", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = check(response).await?;
        decode(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Surface non-2xx responses as classified API errors.
async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let code = response.status();
    let body = response.text().await.ok();
    Err(ApiError::from_status(code, body))
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()).into())
}

#[async_trait(?Send)]
impl AppointmentGateway for ApiClient {
    async fn fetch_appointments(&self, subject_id: &str, role: Role) -> Result<Vec<Appointment>> {
        let url = match role {
            Role::Psychologist => format!(
                "{}/appointments/psychologist?psychologistId={}",
                self.base_url, subject_id
            ),
            Role::Student => format!(
                "{}/appointments/student?studentId={}",
                self.base_url, subject_id
            ),
        };
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        // A subject with no appointments yet comes back as 404
        if response.status() == 404 {
            return Ok(Vec::new());
        }
        let response = check(response).await?;
        decode(response).await
    }

    async fn create_appointment(&self, new: &NewAppointment) -> Result<Appointment> {
        let response = Request::post(&format!("{}/appointments", self.base_url))
            .json(new)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = check(response).await?;
        decode(response).await
    }

    async fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        #[derive(Serialize)]
        struct StatusUpdate {
            status: AppointmentStatus,
        }

        let url = format!("{}/appointments/{}/status", self.base_url, appointment_id);
        let response = Request::patch(&url)
            .json(&StatusUpdate { status })
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = check(response).await?;
        decode(response).await
    }
}

#[async_trait(?Send)]
impl AvailabilityGateway for ApiClient {
    async fn fetch_slots(&self, psychologist_id: &str) -> Result<Vec<AvailabilitySlot>> {
        let url = format!("{}/slots?psychologistId={}", self.base_url, psychologist_id);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = check(response).await?;
        decode(response).await
    }

    async fn create_slot(&self, new: &NewAvailabilitySlot) -> Result<()> {
        let response = Request::post(&format!("{}/slots", self.base_url))
            .json(new)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(response).await?;
        Ok(())
    }

    async fn delete_slot(&self, slot_id: &str) -> Result<()> {
        let url = format!("{}/slots/{}", self.base_url, slot_id);
        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(response).await?;
        Ok(())
    }
}
