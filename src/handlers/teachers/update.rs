use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::validation::{reject_body, UpdateTeacherInput};

use super::parse_id;

const FAILED: &str = "Something went wrong, could not update teacher.";

/// PATCH /:tid - overwrite name and phone. Email and creator are never touched.
pub async fn patch(
    State(state): State<AppState>,
    Path(tid): Path<String>,
    payload: Result<Json<UpdateTeacherInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    // Validate before any lookup so a rejected body never mutates anything
    let Json(input) = payload.map_err(reject_body)?;
    let changes = input.validate(&state.rules)?;

    let not_found = || ApiError::not_found("Could not find teacher for the provided id.");
    let id = parse_id(&tid).ok_or_else(not_found)?;

    let mut teacher = state
        .store
        .find_teacher(id)
        .await
        .map_err(|e| ApiError::database(e, FAILED))?
        .ok_or_else(not_found)?;

    teacher.apply(changes);

    state
        .store
        .save_teacher(&teacher)
        .await
        .map_err(|e| ApiError::database(e, FAILED))?;

    tracing::info!(teacher = %teacher.id, "Updated teacher");
    Ok(Json(json!({ "teacher": teacher })))
}
