//! Publications repository

use sqlx::{postgres::PgRow, Row};

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, Publication, PublicationForm},
    query::Relations,
};

const PUBLICATION_COLUMNS: &str = "id, book_id, author_id, published_date";

/// Build the select statement resolving the requested relations
fn select_publications(relations: Relations, filter: &str) -> String {
    let mut columns = vec!["p.id", "p.book_id", "p.author_id", "p.published_date"];
    let mut joins = Vec::new();

    if relations.book {
        columns.extend([
            "b.name AS book_name",
            "b.description AS book_description",
            "b.price AS book_price",
            "b.category_id AS book_category_id",
        ]);
        joins.push("JOIN books b ON b.id = p.book_id");
    }
    if relations.author {
        columns.extend([
            "a.full_name AS author_full_name",
            "a.birth_date AS author_birth_date",
            "a.email AS author_email",
            "a.phone_number AS author_phone_number",
        ]);
        joins.push("JOIN authors a ON a.id = p.author_id");
    }

    format!(
        "SELECT {} FROM publications p {} {} ORDER BY p.id",
        columns.join(", "),
        joins.join(" "),
        filter
    )
}

fn publication_from_row(row: &PgRow, relations: Relations) -> Result<Publication, sqlx::Error> {
    let book_id: i32 = row.try_get("book_id")?;
    let author_id: i32 = row.try_get("author_id")?;

    let book = if relations.book {
        Some(Book {
            id: book_id,
            name: row.try_get("book_name")?,
            description: row.try_get("book_description")?,
            price: row.try_get("book_price")?,
            category_id: row.try_get("book_category_id")?,
            category: None,
        })
    } else {
        None
    };

    let author = if relations.author {
        Some(Author {
            id: author_id,
            full_name: row.try_get("author_full_name")?,
            birth_date: row.try_get("author_birth_date")?,
            email: row.try_get("author_email")?,
            phone_number: row.try_get("author_phone_number")?,
        })
    } else {
        None
    };

    Ok(Publication {
        id: row.try_get("id")?,
        book_id,
        author_id,
        published_date: row.try_get("published_date")?,
        book,
        author,
    })
}

impl Repository {
    /// List all publications in id order, resolving the requested relations
    pub async fn publications_list(&self, relations: Relations) -> AppResult<Vec<Publication>> {
        let rows = sqlx::query(&select_publications(relations, ""))
            .fetch_all(&self.pool)
            .await?;

        let publications = rows
            .iter()
            .map(|row| publication_from_row(row, relations))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(publications)
    }

    /// Get publication by ID with its book and author
    pub async fn publications_get(&self, id: i32) -> AppResult<Option<Publication>> {
        let relations = Relations::BOOK | Relations::AUTHOR;
        let row = sqlx::query(&select_publications(relations, "WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row
            .as_ref()
            .map(|row| publication_from_row(row, relations))
            .transpose()?)
    }

    pub async fn publications_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM publications WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn publications_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publications")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a publication
    pub async fn publications_create(&self, data: &PublicationForm) -> AppResult<Publication> {
        sqlx::query_as::<_, Publication>(&format!(
            r#"
            INSERT INTO publications (book_id, author_id, published_date)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            PUBLICATION_COLUMNS
        ))
        .bind(data.book_id)
        .bind(data.author_id)
        .bind(data.published_date)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    /// Replace a publication's fields; `None` when no row has this id
    pub async fn publications_update(
        &self,
        id: i32,
        data: &PublicationForm,
    ) -> AppResult<Option<Publication>> {
        sqlx::query_as::<_, Publication>(&format!(
            r#"
            UPDATE publications
            SET book_id = $1, author_id = $2, published_date = $3
            WHERE id = $4
            RETURNING {}
            "#,
            PUBLICATION_COLUMNS
        ))
        .bind(data.book_id)
        .bind(data.author_id)
        .bind(data.published_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn publications_delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM publications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_joins_only_requested_relations() {
        let sql = select_publications(Relations::NONE, "");
        assert!(!sql.contains("JOIN"));

        let sql = select_publications(Relations::AUTHOR, "");
        assert!(sql.contains("JOIN authors a"));
        assert!(!sql.contains("JOIN books b"));

        let sql = select_publications(Relations::BOOK | Relations::AUTHOR, "WHERE p.id = $1");
        assert!(sql.contains("JOIN books b"));
        assert!(sql.contains("JOIN authors a"));
        assert!(sql.contains("WHERE p.id = $1 ORDER BY p.id"));
    }
}
