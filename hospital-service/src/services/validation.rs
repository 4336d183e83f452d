//! Referential checks run before an appointment is persisted.
//!
//! This is an existence check, not a foreign key: nothing stops a referenced
//! record from disappearing after the check. No delete operation exists, so
//! that window is currently unreachable.

use super::store::{EntityStore, Filter, OpScope, Repository, StoreError};
use crate::dtos::CreateAppointmentRequest;
use crate::models::Entity;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Patient,
    Doctor,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Patient => "patient",
            ReferenceKind::Doctor => "doctor",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("{0} not found")]
    NotFound(ReferenceKind),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ReferenceError> for AppError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::NotFound(_) => AppError::BadRequest(anyhow::Error::new(err)),
            ReferenceError::Store(store_err) => store_err.into(),
        }
    }
}

/// Identifiers of the records an appointment points at, confirmed to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedReferences {
    pub patient_id: ObjectId,
    pub doctor_id: ObjectId,
}

/// Confirm the patient, then the doctor, referenced by `candidate` exist.
///
/// Both lookups share the caller's scope and run one after the other.
pub async fn validate_appointment(
    store: &EntityStore,
    scope: &OpScope,
    candidate: &CreateAppointmentRequest,
) -> Result<ResolvedReferences, ReferenceError> {
    let patient_id = resolve(
        store.patients.as_ref(),
        scope,
        ReferenceKind::Patient,
        &candidate.patient_id,
    )
    .await?;

    let doctor_id = resolve(
        store.doctors.as_ref(),
        scope,
        ReferenceKind::Doctor,
        &candidate.doctor_id,
    )
    .await?;

    Ok(ResolvedReferences {
        patient_id,
        doctor_id,
    })
}

async fn resolve<T: Entity>(
    repository: &dyn Repository<T>,
    scope: &OpScope,
    kind: ReferenceKind,
    reference: &str,
) -> Result<ObjectId, ReferenceError> {
    // A malformed identifier cannot name any stored record.
    let id = ObjectId::parse_str(reference).map_err(|_| ReferenceError::NotFound(kind))?;

    match repository.find_one(scope, Filter::Id(id)).await {
        Ok(_) => Ok(id),
        Err(StoreError::NotFound) => Err(ReferenceError::NotFound(kind)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{timestamp_now, Doctor, Patient};
    use chrono::Utc;
    use std::time::Duration;

    fn scope() -> OpScope {
        OpScope::new(Duration::from_secs(5))
    }

    async fn seed(store: &EntityStore) -> (ObjectId, ObjectId) {
        let patient = Patient {
            id: None,
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            age: 30,
            gender: "F".to_string(),
            blood_group: "O+".to_string(),
            contact_no: "123".to_string(),
            created_at: timestamp_now(),
        };
        let doctor = Doctor {
            id: None,
            name: "House".to_string(),
            email: "house@x.com".to_string(),
            specialization: "Diagnostics".to_string(),
            department: "Internal Medicine".to_string(),
            contact_no: "456".to_string(),
            created_at: timestamp_now(),
        };

        let patient_id = store.patients.insert(&scope(), &patient).await.unwrap();
        let doctor_id = store.doctors.insert(&scope(), &doctor).await.unwrap();
        (patient_id, doctor_id)
    }

    fn candidate(patient_id: &str, doctor_id: &str) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            patient_id: patient_id.to_string(),
            doctor_id: doctor_id.to_string(),
            date_time: Utc::now(),
            description: "checkup".to_string(),
        }
    }

    #[tokio::test]
    async fn resolves_existing_references() {
        let store = EntityStore::in_memory();
        let (patient_id, doctor_id) = seed(&store).await;

        let resolved = validate_appointment(
            &store,
            &scope(),
            &candidate(&patient_id.to_hex(), &doctor_id.to_hex()),
        )
        .await
        .unwrap();

        assert_eq!(resolved.patient_id, patient_id);
        assert_eq!(resolved.doctor_id, doctor_id);
    }

    #[tokio::test]
    async fn unknown_patient_is_reported_first() {
        let store = EntityStore::in_memory();
        seed(&store).await;

        let err = validate_appointment(
            &store,
            &scope(),
            &candidate(&ObjectId::new().to_hex(), &ObjectId::new().to_hex()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ReferenceError::NotFound(ReferenceKind::Patient)));
        assert_eq!(err.to_string(), "patient not found");
    }

    #[tokio::test]
    async fn unknown_doctor_is_reported() {
        let store = EntityStore::in_memory();
        let (patient_id, _) = seed(&store).await;

        let err = validate_appointment(
            &store,
            &scope(),
            &candidate(&patient_id.to_hex(), "d-unknown"),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "doctor not found");
    }

    #[tokio::test]
    async fn patient_id_of_a_doctor_does_not_resolve() {
        let store = EntityStore::in_memory();
        let (_, doctor_id) = seed(&store).await;

        let err = validate_appointment(
            &store,
            &scope(),
            &candidate(&doctor_id.to_hex(), &doctor_id.to_hex()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ReferenceError::NotFound(ReferenceKind::Patient)));
    }

    #[test]
    fn missing_reference_maps_to_bad_request() {
        let err = AppError::from(ReferenceError::NotFound(ReferenceKind::Doctor));
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = AppError::from(ReferenceError::Store(StoreError::Unavailable(
            "timed out".to_string(),
        )));
        assert!(matches!(err, AppError::Unavailable(_)));
    }
}
