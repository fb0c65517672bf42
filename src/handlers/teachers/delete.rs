use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::DatabaseError;
use crate::error::ApiError;

use super::parse_id;

const FAILED: &str = "Something went wrong, could not delete teacher.";

/// DELETE /:tid - remove the teacher and pull it from its creator's list in one transaction
pub async fn delete(State(state): State<AppState>, Path(tid): Path<String>) -> Result<Json<Value>, ApiError> {
    let not_found = || ApiError::not_found("Could not find teacher for this id.");

    let id = parse_id(&tid).ok_or_else(not_found)?;

    let populated = state
        .store
        .find_teacher_with_creator(id)
        .await
        .map_err(|e| ApiError::database(e, FAILED))?
        .ok_or_else(not_found)?;

    let teacher = populated.teacher;
    let creator = populated.creator.ok_or_else(|| {
        ApiError::database(
            DatabaseError::NotFound(format!("creator {} of teacher {}", teacher.creator, teacher.id)),
            FAILED,
        )
    })?;

    state
        .store
        .remove_teacher_from(&teacher, &creator)
        .await
        .map_err(|e| ApiError::database(e, FAILED))?;

    tracing::info!(teacher = %teacher.id, user = %creator.id, "Deleted teacher");
    Ok(Json(json!({ "message": "Deleted teacher." })))
}
