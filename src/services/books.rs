//! Books service

use std::sync::Arc;

use rust_decimal::Decimal;

use super::{check_same_id, missing_after_update, require_text, validate_form};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookForm, BookListParams, SelectOption},
    query::{browse_books, BookField, CategorySelector, ListQuery, Page, Relations},
    repository::CatalogRepository,
};

/// `NUMERIC(18, 2)`: two decimals, sixteen integer digits
const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000_000_000;

#[derive(Clone)]
pub struct BooksService {
    repository: Arc<dyn CatalogRepository>,
}

impl BooksService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Sorted page of books with their category, optionally scoped to one
    /// category and searched on the book name.
    pub async fn list(&self, params: &BookListParams) -> AppResult<Page<Book>> {
        let selector = CategorySelector::parse(params.category.as_deref())?;
        let query = ListQuery::<BookField>::from_params(&params.list_params());
        let rows = self.repository.book_list(query.relations()).await?;
        Ok(browse_books(rows, selector, &query))
    }

    /// Book with its category
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository
            .book_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        self.check(form).await?;
        let created = self.repository.book_create(form).await?;
        tracing::info!(
            "Created book {} ({}) in category {}",
            created.id,
            created.name,
            created.category_id
        );
        self.get(created.id).await
    }

    /// Replace all fields of an existing book
    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        check_same_id("Book", id, form.id)?;
        self.check(form).await?;
        match self.repository.book_update(id, form).await? {
            Some(_) => {
                tracing::info!("Updated book {}", id);
                self.get(id).await
            }
            None => missing_after_update("Book", id, self.repository.book_exists(id).await),
        }
    }

    /// Delete a book and its publications; a missing id is a no-op
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.book_delete(id).await? {
            tracing::info!("Deleted book {}", id);
        } else {
            tracing::debug!("Book {} already absent, nothing to delete", id);
        }
        Ok(())
    }

    /// Dropdown entries (id, name)
    pub async fn options(&self) -> AppResult<Vec<SelectOption>> {
        let rows = self.repository.book_list(Relations::NONE).await?;
        Ok(rows.into_iter().map(|b| SelectOption::new(b.id, b.name)).collect())
    }

    async fn check(&self, form: &BookForm) -> AppResult<()> {
        validate_form(form)?;
        require_text(&form.name, "Name", form)?;
        if form.price < Decimal::ZERO {
            return Err(AppError::invalid("Price must not be negative", form));
        }
        if form.price.normalize().scale() > PRICE_SCALE {
            return Err(AppError::invalid(
                format!("Price must have at most {} decimal places", PRICE_SCALE),
                form,
            ));
        }
        if form.price >= Decimal::from(PRICE_LIMIT) {
            return Err(AppError::invalid(
                format!("Price must be below {}", PRICE_LIMIT),
                form,
            ));
        }
        if !self.repository.category_exists(form.category_id).await? {
            tracing::debug!("Book rejected: category {} does not exist", form.category_id);
            return Err(AppError::invalid(
                format!("Category {} does not exist", form.category_id),
                form,
            ));
        }
        Ok(())
    }
}
