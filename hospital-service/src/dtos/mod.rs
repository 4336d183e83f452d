pub mod appointments;
pub mod departments;
pub mod doctors;
pub mod patients;
pub mod users;

pub use appointments::{AppointmentResponse, CreateAppointmentRequest};
pub use departments::{CreateDepartmentRequest, DepartmentResponse};
pub use doctors::{CreateDoctorRequest, DoctorResponse};
pub use patients::{CreatePatientRequest, PatientResponse};
pub use users::{CreateUserRequest, UserResponse};

use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::oid::ObjectId;

pub(crate) fn format_id(id: Option<ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}

pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
