//! Categories repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Category, CategoryForm},
};

impl Repository {
    /// List all categories in id order
    pub async fn categories_list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get category by ID
    pub async fn categories_get(&self, id: i32) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn categories_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn categories_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a category
    pub async fn categories_create(&self, data: &CategoryForm) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("INSERT INTO categories (name) VALUES ($1) RETURNING id, name")
            .bind(&data.name)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_write)
    }

    /// Replace a category's fields; `None` when no row has this id
    pub async fn categories_update(&self, id: i32, data: &CategoryForm) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("UPDATE categories SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(&data.name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_write)
    }

    /// Delete a category (its books and their publications cascade)
    pub async fn categories_delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
