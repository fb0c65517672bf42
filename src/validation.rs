// Request body validation for the teacher endpoints
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::ValidationConfig;
use crate::database::models::{NewTeacher, TeacherChanges};
use crate::error::{ApiError, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub phone_min_length: usize,
}

impl From<&ValidationConfig> for ValidationRules {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            phone_min_length: config.phone_min_length,
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self { phone_min_length: 10 }
    }
}

/// POST body. Fields are optional so a missing one is reported as a 422, not a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTeacherInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub creator: Option<String>,
}

/// PATCH body
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeacherInput {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl CreateTeacherInput {
    pub fn validate(self, rules: &ValidationRules) -> Result<NewTeacher, ApiError> {
        let mut errors = FieldErrors::new();

        let name = required(&mut errors, "name", self.name);
        let phone = valid_phone(&mut errors, rules, self.phone);
        let email = required(&mut errors, "email", self.email);
        let creator = required(&mut errors, "creator", self.creator).and_then(|raw| {
            match Uuid::parse_str(&raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.insert("creator".to_string(), "must be a valid user id".to_string());
                    None
                }
            }
        });

        match (name, phone, email, creator) {
            (Some(name), Some(phone), Some(email), Some(creator)) if errors.is_empty() => Ok(NewTeacher {
                name,
                phone,
                email,
                creator,
            }),
            _ => Err(ApiError::unprocessable(errors)),
        }
    }
}

impl UpdateTeacherInput {
    pub fn validate(self, rules: &ValidationRules) -> Result<TeacherChanges, ApiError> {
        let mut errors = FieldErrors::new();

        let name = required(&mut errors, "name", self.name);
        let phone = valid_phone(&mut errors, rules, self.phone);

        match (name, phone) {
            (Some(name), Some(phone)) if errors.is_empty() => Ok(TeacherChanges { name, phone }),
            _ => Err(ApiError::unprocessable(errors)),
        }
    }
}

/// Unreadable JSON is bad input, same as a missing field
pub fn reject_body(rejection: JsonRejection) -> ApiError {
    let mut errors = FieldErrors::new();
    errors.insert("body".to_string(), rejection.body_text());
    ApiError::unprocessable(errors)
}

fn required(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.insert(field.to_string(), "is required".to_string());
            None
        }
    }
}

fn valid_phone(errors: &mut FieldErrors, rules: &ValidationRules, value: Option<String>) -> Option<String> {
    let phone = required(errors, "phone", value)?;
    if phone.chars().count() < rules.phone_min_length {
        errors.insert(
            "phone".to_string(),
            format!("must be at least {} characters", rules.phone_min_length),
        );
        return None;
    }
    Some(phone)
}
