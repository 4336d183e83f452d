use super::{format_id, format_timestamp};
use crate::models::Patient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /patients`. Client-sent `id` or `createdAt` are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub gender: String,
    pub blood_group: String,
    pub contact_no: String,
}

impl CreatePatientRequest {
    pub fn into_patient(self, created_at: DateTime<Utc>) -> Patient {
        Patient {
            id: None,
            name: self.name,
            email: self.email,
            age: self.age,
            gender: self.gender,
            blood_group: self.blood_group,
            contact_no: self.contact_no,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub gender: String,
    pub blood_group: String,
    pub contact_no: String,
    pub created_at: String,
}

impl From<Patient> for PatientResponse {
    fn from(patient: Patient) -> Self {
        Self {
            id: format_id(patient.id),
            name: patient.name,
            email: patient.email,
            age: patient.age,
            gender: patient.gender,
            blood_group: patient.blood_group,
            contact_no: patient.contact_no,
            created_at: format_timestamp(patient.created_at),
        }
    }
}
