pub mod appointment;
pub mod department;
pub mod doctor;
pub mod patient;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use department::Department;
pub use doctor::Doctor;
pub use patient::Patient;
pub use user::User;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};

/// A persisted record type and the collection it lives in.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;

    /// Fields carrying a store-enforced uniqueness constraint.
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Option<ObjectId>;

    fn set_id(&mut self, id: ObjectId);
}

/// Current time truncated to the millisecond precision of a stored datetime,
/// so a freshly created record matches the same record read back later.
pub fn timestamp_now() -> DateTime<Utc> {
    mongodb::bson::DateTime::now().to_chrono()
}

/// Truncate a client-supplied instant to what a stored datetime can hold.
pub fn stored_precision(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    mongodb::bson::DateTime::from_chrono(timestamp).to_chrono()
}
