use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for registration. Fields are optional at the parse stage
/// so a missing field surfaces as a validation message, not a parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
}

impl CreateUserRequest {
    /// Field-level checks only; uniqueness is checked against the store.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(&self.first_name) {
            errors.push("firstName is required".to_string());
        }
        if is_blank(&self.last_name) {
            errors.push("lastName is required".to_string());
        }
        if is_blank(&self.email_address) {
            errors.push("emailAddress is required".to_string());
        } else if !is_valid_email(self.email_address.as_deref().unwrap_or_default()) {
            errors.push("emailAddress must be a valid email address".to_string());
        }
        if is_blank(&self.password) {
            errors.push("password is required".to_string());
        }
        errors
    }

    /// The email to register with, once its own checks passed.
    pub fn valid_email(&self) -> Option<&str> {
        let email = self.email_address.as_deref()?.trim();
        (is_valid_email(email)).then_some(email)
    }
}
