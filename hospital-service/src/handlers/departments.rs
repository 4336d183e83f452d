use super::{persist, JsonBody};
use crate::dtos::{CreateDepartmentRequest, DepartmentResponse};
use crate::models::timestamp_now;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

#[tracing::instrument(skip_all)]
pub async fn create_department(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateDepartmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let department = persist(
        state.store.departments.as_ref(),
        &state.op_scope(),
        request.into_department(timestamp_now()),
    )
    .await?;

    let response = DepartmentResponse::from(department);
    tracing::info!(department_id = %response.id, "Department created");
    Ok((StatusCode::CREATED, Json(response)))
}
