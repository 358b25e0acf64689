//! Authors repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm},
};

const AUTHOR_COLUMNS: &str = "id, full_name, birth_date, email, phone_number";

impl Repository {
    /// List all authors in id order
    pub async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors ORDER BY id",
            AUTHOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn authors_get(&self, id: i32) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE id = $1",
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn authors_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn authors_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create an author
    pub async fn authors_create(&self, data: &AuthorForm) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            r#"
            INSERT INTO authors (full_name, birth_date, email, phone_number)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(&data.full_name)
        .bind(data.birth_date)
        .bind(&data.email)
        .bind(&data.phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    /// Replace an author's fields; `None` when no row has this id
    pub async fn authors_update(&self, id: i32, data: &AuthorForm) -> AppResult<Option<Author>> {
        sqlx::query_as::<_, Author>(&format!(
            r#"
            UPDATE authors
            SET full_name = $1, birth_date = $2, email = $3, phone_number = $4
            WHERE id = $5
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(&data.full_name)
        .bind(data.birth_date)
        .bind(&data.email)
        .bind(&data.phone_number)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    /// Delete an author (their publications cascade)
    pub async fn authors_delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
