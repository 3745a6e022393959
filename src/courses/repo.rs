use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Course record in the database. `user_id` is the owning user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
}

impl Course {
    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Course>> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, estimated_time, materials_needed, user_id, created_at
            FROM courses
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Course>> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, estimated_time, materials_needed, user_id, created_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        title: &str,
        description: &str,
        estimated_time: Option<&str>,
        materials_needed: Option<&str>,
        user_id: Uuid,
    ) -> sqlx::Result<Course> {
        sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (title, description, estimated_time, materials_needed, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, estimated_time, materials_needed, user_id, created_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(estimated_time)
        .bind(materials_needed)
        .bind(user_id)
        .fetch_one(db)
        .await
    }

    /// Full replace of the mutable fields. Ownership does not change.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        title: &str,
        description: &str,
        estimated_time: Option<&str>,
        materials_needed: Option<&str>,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            UPDATE courses
            SET title = $2, description = $3, estimated_time = $4, materials_needed = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(estimated_time)
        .bind(materials_needed)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<()> {
        sqlx::query(r#"DELETE FROM courses WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
