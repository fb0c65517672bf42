use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::validation::{reject_body, CreateTeacherInput};

const FAILED: &str = "Creating teacher failed, please try again.";

/**
 * POST / - create a teacher for an existing user
 *
 * Expected Input:
 * ```json
 * { "name": "Jane Doe", "phone": "5551234567", "email": "jane@x.com", "creator": "<user id>" }
 * ```
 *
 * The teacher insert and the push onto `creator.teacher` commit together or not at all.
 */
pub async fn post(
    State(state): State<AppState>,
    payload: Result<Json<CreateTeacherInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload.map_err(reject_body)?;
    let new_teacher = input.validate(&state.rules)?;

    let creator = state
        .store
        .find_user(new_teacher.creator)
        .await
        .map_err(|e| ApiError::database(e, FAILED))?
        .ok_or_else(|| ApiError::not_found("Could not find user for provided id."))?;

    let teacher = new_teacher.into_teacher();
    state
        .store
        .insert_teacher_for(&teacher, &creator)
        .await
        .map_err(|e| ApiError::database(e, FAILED))?;

    tracing::info!(teacher = %teacher.id, user = %creator.id, "Created teacher");
    Ok((StatusCode::CREATED, Json(json!({ "teacher": teacher }))))
}
