use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{password::hash_password, AuthUser},
    error::{is_unique_violation, ApiError},
    state::AppState,
};

use super::dto::{CreateUserRequest, UserProfile};
use super::repo::User;

const EMAIL_TAKEN: &str = "emailAddress must be unique";

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(get_user).post(create_user))
}

/// A racing registration can slip past the pre-insert lookup and trip the
/// unique index instead; both paths report the same uniqueness message,
/// and either way only the first row persists.
fn map_insert_error(e: sqlx::Error) -> ApiError {
    if is_unique_violation(&e) {
        ApiError::Validation(vec![EMAIL_TAKEN.to_string()])
    } else {
        ApiError::Db(e)
    }
}

/// GET /api/users — the authenticated user's own profile, nothing else.
#[instrument(skip(user))]
pub async fn get_user(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(UserProfile {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email_address: user.email,
    })
}

/// POST /api/users — register. The response never carries the created
/// representation or the hash, only a Location pointing at the root.
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, [(header::HeaderName, &'static str); 1]), ApiError> {
    let mut errors = payload.validate();

    if let Some(email) = payload.valid_email() {
        if User::find_by_email(&state.db, email).await?.is_some() {
            warn!(email = %email, "email already registered");
            errors.push(EMAIL_TAKEN.to_string());
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // validate() guarantees the fields are present past this point
    let first_name = payload.first_name.as_deref().unwrap_or_default().trim();
    let last_name = payload.last_name.as_deref().unwrap_or_default().trim();
    let email = payload.email_address.as_deref().unwrap_or_default().trim();
    let password = payload.password.as_deref().unwrap_or_default();

    let hash = hash_password(password)?;

    let user = User::create(&state.db, first_name, last_name, email, &hash)
        .await
        .map_err(map_insert_error)?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
