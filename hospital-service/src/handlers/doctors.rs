use super::{persist, JsonBody};
use crate::dtos::{CreateDoctorRequest, DoctorResponse};
use crate::models::timestamp_now;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

#[tracing::instrument(skip_all)]
pub async fn create_doctor(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateDoctorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let doctor = persist(
        state.store.doctors.as_ref(),
        &state.op_scope(),
        request.into_doctor(timestamp_now()),
    )
    .await?;

    let response = DoctorResponse::from(doctor);
    tracing::info!(doctor_id = %response.id, "Doctor created");
    Ok((StatusCode::CREATED, Json(response)))
}
