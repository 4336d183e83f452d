use super::{persist, JsonBody};
use crate::dtos::{AppointmentResponse, CreateAppointmentRequest};
use crate::models::{stored_precision, timestamp_now, Appointment};
use crate::services::metrics::record_appointment_rejected;
use crate::services::{validate_appointment, ReferenceError};
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

/// Create an appointment once both referenced records are known to exist.
///
/// Validation and the insert share one request scope. Nothing is written
/// when either reference fails to resolve.
#[tracing::instrument(skip_all)]
pub async fn create_appointment(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let scope = state.op_scope();

    let references = validate_appointment(&state.store, &scope, &request)
        .await
        .map_err(|e| {
            if let ReferenceError::NotFound(kind) = &e {
                record_appointment_rejected(kind.as_str());
                tracing::info!(reference = %kind, "Appointment rejected: {}", e);
            }
            AppError::from(e)
        })?;

    let appointment = Appointment::scheduled(
        references.patient_id,
        references.doctor_id,
        stored_precision(request.date_time),
        request.description,
        timestamp_now(),
    );
    let appointment = persist(state.store.appointments.as_ref(), &scope, appointment).await?;

    let response = AppointmentResponse::from(appointment);
    tracing::info!(
        appointment_id = %response.id,
        patient_id = %response.patient_id,
        doctor_id = %response.doctor_id,
        "Appointment scheduled"
    );
    Ok((StatusCode::CREATED, Json(response)))
}
