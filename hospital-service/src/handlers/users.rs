use super::{persist, JsonBody};
use crate::dtos::{CreateUserRequest, UserResponse};
use crate::models::timestamp_now;
use crate::services::Filter;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = persist(
        state.store.users.as_ref(),
        &state.op_scope(),
        request.into_user(timestamp_now()),
    )
    .await?;

    let response = UserResponse::from(user);
    tracing::info!(user_id = %response.id, "User created");
    Ok((StatusCode::CREATED, Json(response)))
}

#[tracing::instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.store.users.find(&state.op_scope(), Filter::All).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
