use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::Course;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Option<Uuid>,
}

/// PUT body. The owning user is not part of it; ownership is immutable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Uuid,
}

impl From<Course> for CourseSummary {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            estimated_time: c.estimated_time,
            materials_needed: c.materials_needed,
            user_id: c.user_id,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(&self.title) {
            errors.push("title is required".to_string());
        }
        if is_blank(&self.description) {
            errors.push("description is required".to_string());
        }
        if self.user_id.is_none() {
            errors.push("userId is required".to_string());
        }
        errors
    }
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(&self.title) {
            errors.push("title is required".to_string());
        }
        if is_blank(&self.description) {
            errors.push("description is required".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn create_reports_missing_fields_in_order() {
        let payload = CreateCourseRequest {
            title: Some("".into()),
            description: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(
            payload.validate(),
            vec!["title is required", "userId is required"]
        );
    }

    #[test]
    fn create_with_all_fields_is_clean() {
        let payload = CreateCourseRequest {
            title: Some("Rust in Motion".into()),
            description: Some("Ownership and borrowing".into()),
            estimated_time: Some("12 hours".into()),
            materials_needed: None,
            user_id: Some(Uuid::new_v4()),
        };
        assert!(payload.validate().is_empty());
    }

    #[test]
    fn update_requires_title_and_description() {
        assert_eq!(
            UpdateCourseRequest::default().validate(),
            vec!["title is required", "description is required"]
        );
    }

    #[test]
    fn summary_serializes_camel_case() {
        let course = Course {
            id: Uuid::nil(),
            title: "Build a Basic Bookcase".into(),
            description: "High-end furniture projects".into(),
            estimated_time: Some("12 hours".into()),
            materials_needed: None,
            user_id: Uuid::nil(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&CourseSummary::from(course)).unwrap();
        assert!(json.contains("\"estimatedTime\":\"12 hours\""));
        assert!(json.contains("\"materialsNeeded\":null"));
        assert!(json.contains("\"userId\""));
        assert!(!json.contains("created_at"));
    }
}
