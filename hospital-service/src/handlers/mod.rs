pub mod appointments;
pub mod departments;
pub mod doctors;
pub mod extract;
pub mod health;
pub mod patients;
pub mod users;

pub use appointments::create_appointment;
pub use departments::create_department;
pub use doctors::create_doctor;
pub use extract::JsonBody;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use patients::{create_patient, list_patients};
pub use users::{create_user, list_users};

use crate::models::Entity;
use crate::services::metrics::record_entity_created;
use crate::services::{OpScope, Repository};
use service_core::error::AppError;

/// Fallback for a known path reached with the wrong verb.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Insert `record` and return it with the store-assigned identifier attached.
pub(crate) async fn persist<T: Entity>(
    repository: &dyn Repository<T>,
    scope: &OpScope,
    mut record: T,
) -> Result<T, AppError> {
    let id = repository.insert(scope, &record).await.map_err(|e| {
        tracing::warn!(collection = T::COLLECTION, "Insert failed: {}", e);
        e
    })?;

    record.set_id(id);
    record_entity_created(T::COLLECTION);
    Ok(record)
}
