use super::{format_id, format_timestamp};
use crate::models::{Appointment, AppointmentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /appointments`.
///
/// There is no `status` field: any status the client sends is dropped and
/// the appointment is always created as scheduled.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub date_time: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date_time: String,
    pub status: AppointmentStatus,
    pub description: String,
    pub created_at: String,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: format_id(appointment.id),
            patient_id: appointment.patient_id.to_hex(),
            doctor_id: appointment.doctor_id.to_hex(),
            date_time: format_timestamp(appointment.date_time),
            status: appointment.status,
            description: appointment.description,
            created_at: format_timestamp(appointment.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_status_is_not_decoded() {
        let request: CreateAppointmentRequest = serde_json::from_value(json!({
            "patientId": "p1",
            "doctorId": "d1",
            "dateTime": "2024-01-01T00:00:00Z",
            "description": "checkup",
            "status": "Completed"
        }))
        .unwrap();

        assert_eq!(request.patient_id, "p1");
        assert_eq!(request.date_time.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn missing_reference_fails_to_decode() {
        let result = serde_json::from_value::<CreateAppointmentRequest>(json!({
            "doctorId": "d1",
            "dateTime": "2024-01-01T00:00:00Z",
            "description": "checkup"
        }));
        assert!(result.is_err());
    }
}
