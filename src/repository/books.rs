//! Books repository

use sqlx::{postgres::PgRow, Row};

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookForm, Category},
};

const BOOK_COLUMNS: &str = "id, name, description, price, category_id";

/// Map a `books b JOIN categories c` row into a book with its category
fn book_with_category(row: &PgRow) -> Result<Book, sqlx::Error> {
    let category_id: i32 = row.try_get("category_id")?;
    Ok(Book {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        category_id,
        category: Some(Category {
            id: category_id,
            name: row.try_get("category_name")?,
        }),
    })
}

impl Repository {
    /// List all books in id order, optionally resolving their category
    pub async fn books_list(&self, with_category: bool) -> AppResult<Vec<Book>> {
        if !with_category {
            let rows = sqlx::query_as::<_, Book>(&format!(
                "SELECT {} FROM books ORDER BY id",
                BOOK_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await?;
            return Ok(rows);
        }

        let rows = sqlx::query(
            r#"
            SELECT b.id, b.name, b.description, b.price, b.category_id,
                   c.name AS category_name
            FROM books b
            JOIN categories c ON c.id = b.category_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let books = rows
            .iter()
            .map(book_with_category)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }

    /// Get book by ID with its category
    pub async fn books_get(&self, id: i32) -> AppResult<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT b.id, b.name, b.description, b.price, b.category_id,
                   c.name AS category_name
            FROM books b
            JOIN categories c ON c.id = b.category_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(book_with_category).transpose()?)
    }

    pub async fn books_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn books_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a book
    pub async fn books_create(&self, data: &BookForm) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (name, description, price, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    /// Replace a book's fields; `None` when no row has this id
    pub async fn books_update(&self, id: i32, data: &BookForm) -> AppResult<Option<Book>> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET name = $1, description = $2, price = $3, category_id = $4
            WHERE id = $5
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    /// Delete a book (its publications cascade)
    pub async fn books_delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
