use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

use super::parse_id;

/// GET /user/:uid - every teacher the user created, in the order they were added
pub async fn get(State(state): State<AppState>, Path(uid): Path<String>) -> Result<Json<Value>, ApiError> {
    let not_found = || ApiError::not_found("Could not find teachers for the provided user id.");

    let id = parse_id(&uid).ok_or_else(not_found)?;

    let populated = state
        .store
        .find_user_with_teachers(id)
        .await
        .map_err(|e| ApiError::database(e, "Fetching teacher failed, please try again later."))?
        .ok_or_else(not_found)?;

    if populated.teachers.is_empty() {
        return Err(not_found());
    }

    Ok(Json(json!({ "teacher": populated.teachers })))
}
