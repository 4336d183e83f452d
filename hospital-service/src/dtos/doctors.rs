use super::{format_id, format_timestamp};
use crate::models::Doctor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub department: String,
    pub contact_no: String,
}

impl CreateDoctorRequest {
    pub fn into_doctor(self, created_at: DateTime<Utc>) -> Doctor {
        Doctor {
            id: None,
            name: self.name,
            email: self.email,
            specialization: self.specialization,
            department: self.department,
            contact_no: self.contact_no,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub department: String,
    pub contact_no: String,
    pub created_at: String,
}

impl From<Doctor> for DoctorResponse {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: format_id(doctor.id),
            name: doctor.name,
            email: doctor.email,
            specialization: doctor.specialization,
            department: doctor.department,
            contact_no: doctor.contact_no,
            created_at: format_timestamp(doctor.created_at),
        }
    }
}
