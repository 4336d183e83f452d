use super::{persist, JsonBody};
use crate::dtos::{CreatePatientRequest, PatientResponse};
use crate::models::timestamp_now;
use crate::services::Filter;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

#[tracing::instrument(skip_all)]
pub async fn create_patient(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreatePatientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let scope = state.op_scope();
    let patient = persist(
        state.store.patients.as_ref(),
        &scope,
        request.into_patient(timestamp_now()),
    )
    .await?;

    let response = PatientResponse::from(patient);
    tracing::info!(patient_id = %response.id, "Patient created");
    Ok((StatusCode::CREATED, Json(response)))
}

#[tracing::instrument(skip_all)]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientResponse>>, AppError> {
    let patients = state
        .store
        .patients
        .find(&state.op_scope(), Filter::All)
        .await?;

    tracing::debug!(count = patients.len(), "Listed patients");
    Ok(Json(patients.into_iter().map(PatientResponse::from).collect()))
}
