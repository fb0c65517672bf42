use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

use super::parse_id;

/// GET /:tid - single teacher by id
pub async fn get(State(state): State<AppState>, Path(tid): Path<String>) -> Result<Json<Value>, ApiError> {
    let not_found = || ApiError::not_found("Could not find teacher for the provided id.");

    let id = parse_id(&tid).ok_or_else(not_found)?;

    let teacher = state
        .store
        .find_teacher(id)
        .await
        .map_err(|e| ApiError::database(e, "Something went wrong, could not find a teacher."))?
        .ok_or_else(not_found)?;

    Ok(Json(json!({ "teacher": teacher })))
}
