use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::{is_foreign_key_violation, ApiError},
    state::AppState,
    users::repo::User,
};

use super::dto::{CourseSummary, CreateCourseRequest, UpdateCourseRequest};
use super::repo::Course;

const COURSE_NOT_FOUND: &str = "Course Not Found";
const NOT_OWNER: &str = "You are not the owner of this course";
const USER_MISSING: &str = "userId must reference an existing user";

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// Path id for /courses/:id. A segment that does not parse as a course id
/// cannot name a course, so it gets the same JSON not-found outcome
/// instead of the framework's plain-text rejection.
pub struct CourseId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CourseId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound(COURSE_NOT_FOUND))?;
        Ok(CourseId(id))
    }
}

fn ensure_owner(course: &Course, user_id: Uuid) -> Result<(), ApiError> {
    if course.user_id != user_id {
        warn!(course_id = %course.id, user_id = %user_id, "ownership check failed");
        return Err(ApiError::Forbidden(NOT_OWNER));
    }
    Ok(())
}

/// The referenced user can disappear between the existence check and the
/// insert; the constraint failure reads the same as the up-front message.
fn map_insert_error(e: sqlx::Error) -> ApiError {
    if is_foreign_key_violation(&e) {
        ApiError::Validation(vec![USER_MISSING.to_string()])
    } else {
        ApiError::Db(e)
    }
}

/// GET /api/courses — every course, unauthenticated.
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseSummary>>, ApiError> {
    let courses = Course::list(&state.db).await?;
    Ok(Json(courses.into_iter().map(CourseSummary::from).collect()))
}

/// GET /api/courses/:id — a missing record is an explicit 404.
#[instrument(skip(state, id))]
pub async fn get_course(
    State(state): State<AppState>,
    CourseId(id): CourseId,
) -> Result<Json<CourseSummary>, ApiError> {
    let course = Course::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound(COURSE_NOT_FOUND))?;
    Ok(Json(CourseSummary::from(course)))
}

/// POST /api/courses — persists with the supplied owning-user reference.
#[instrument(skip(state, user, payload))]
pub async fn create_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), ApiError> {
    let mut errors = payload.validate();

    if let Some(user_id) = payload.user_id {
        if !User::exists(&state.db, user_id).await? {
            errors.push(USER_MISSING.to_string());
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let title = payload.title.as_deref().unwrap_or_default().trim();
    let description = payload.description.as_deref().unwrap_or_default().trim();
    let user_id = payload.user_id.unwrap_or(user.id);

    let course = Course::create(
        &state.db,
        title,
        description,
        payload.estimated_time.as_deref(),
        payload.materials_needed.as_deref(),
        user_id,
    )
    .await
    .map_err(map_insert_error)?;

    info!(course_id = %course.id, user_id = %course.user_id, "course created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/courses/{}", course.id))],
    ))
}

/// PUT /api/courses/:id — owner only, full replace, 204.
#[instrument(skip(state, user, id, payload))]
pub async fn update_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    CourseId(id): CourseId,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<StatusCode, ApiError> {
    let course = Course::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound(COURSE_NOT_FOUND))?;

    ensure_owner(&course, user.id)?;

    let errors = payload.validate();
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Course::update(
        &state.db,
        id,
        payload.title.as_deref().unwrap_or_default().trim(),
        payload.description.as_deref().unwrap_or_default().trim(),
        payload.estimated_time.as_deref(),
        payload.materials_needed.as_deref(),
    )
    .await?;

    info!(course_id = %id, "course updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/courses/:id — owner only, 204.
#[instrument(skip(state, user, id))]
pub async fn delete_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    CourseId(id): CourseId,
) -> Result<StatusCode, ApiError> {
    let course = Course::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound(COURSE_NOT_FOUND))?;

    ensure_owner(&course, user.id)?;

    Course::delete(&state.db, id).await?;

    info!(course_id = %id, "course deleted");
    Ok(StatusCode::NO_CONTENT)
}
