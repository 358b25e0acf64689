//! Authors service

use std::sync::Arc;

use super::{check_same_id, is_phone_number, missing_after_update, require_text, validate_form};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, ListParams, SelectOption},
    query::{AuthorField, ListQuery, Page},
    repository::CatalogRepository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Arc<dyn CatalogRepository>,
}

impl AuthorsService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Sorted page of authors, searched on full name and email
    pub async fn list(&self, params: &ListParams) -> AppResult<Page<Author>> {
        let query = ListQuery::<AuthorField>::from_params(params);
        let rows = self.repository.author_list().await?;
        Ok(query.apply(rows))
    }

    pub async fn get(&self, id: i32) -> AppResult<Author> {
        self.repository
            .author_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<Author> {
        self.check(form)?;
        let created = self.repository.author_create(form).await?;
        tracing::info!("Created author {} ({})", created.id, created.full_name);
        Ok(created)
    }

    /// Replace all fields of an existing author
    pub async fn update(&self, id: i32, form: &AuthorForm) -> AppResult<Author> {
        check_same_id("Author", id, form.id)?;
        self.check(form)?;
        match self.repository.author_update(id, form).await? {
            Some(updated) => {
                tracing::info!("Updated author {}", id);
                Ok(updated)
            }
            None => missing_after_update("Author", id, self.repository.author_exists(id).await),
        }
    }

    /// Delete an author and their publications; a missing id is a no-op
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.author_delete(id).await? {
            tracing::info!("Deleted author {}", id);
        } else {
            tracing::debug!("Author {} already absent, nothing to delete", id);
        }
        Ok(())
    }

    /// Dropdown entries (id, full name)
    pub async fn options(&self) -> AppResult<Vec<SelectOption>> {
        let rows = self.repository.author_list().await?;
        Ok(rows
            .into_iter()
            .map(|a| SelectOption::new(a.id, a.full_name))
            .collect())
    }

    fn check(&self, form: &AuthorForm) -> AppResult<()> {
        validate_form(form)?;
        require_text(&form.full_name, "Full name", form)?;
        if !is_phone_number(&form.phone_number) {
            return Err(AppError::invalid(
                format!("'{}' is not a valid phone number", form.phone_number),
                form,
            ));
        }
        Ok(())
    }
}
