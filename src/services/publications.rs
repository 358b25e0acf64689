//! Publications service

use std::sync::Arc;

use super::{check_same_id, missing_after_update, validate_form};
use crate::{
    error::{AppError, AppResult},
    models::{ListParams, Publication, PublicationForm},
    query::{ListQuery, Page, PublicationField},
    repository::CatalogRepository,
};

#[derive(Clone)]
pub struct PublicationsService {
    repository: Arc<dyn CatalogRepository>,
}

impl PublicationsService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Sorted page of publications with book and author resolved, searched
    /// on the book name and the author's full name.
    pub async fn list(&self, params: &ListParams) -> AppResult<Page<Publication>> {
        let query = ListQuery::<PublicationField>::from_params(params);
        let rows = self.repository.publication_list(query.relations()).await?;
        Ok(query.apply(rows))
    }

    /// Publication with its book and author
    pub async fn get(&self, id: i32) -> AppResult<Publication> {
        self.repository
            .publication_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Publication {} not found", id)))
    }

    pub async fn create(&self, form: &PublicationForm) -> AppResult<Publication> {
        self.check(form).await?;
        let created = self.repository.publication_create(form).await?;
        tracing::info!(
            "Created publication {} (book {}, author {})",
            created.id,
            created.book_id,
            created.author_id
        );
        self.get(created.id).await
    }

    /// Replace all fields of an existing publication
    pub async fn update(&self, id: i32, form: &PublicationForm) -> AppResult<Publication> {
        check_same_id("Publication", id, form.id)?;
        self.check(form).await?;
        match self.repository.publication_update(id, form).await? {
            Some(_) => {
                tracing::info!("Updated publication {}", id);
                self.get(id).await
            }
            None => missing_after_update(
                "Publication",
                id,
                self.repository.publication_exists(id).await,
            ),
        }
    }

    /// Delete a publication; a missing id is a no-op
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.publication_delete(id).await? {
            tracing::info!("Deleted publication {}", id);
        } else {
            tracing::debug!("Publication {} already absent, nothing to delete", id);
        }
        Ok(())
    }

    async fn check(&self, form: &PublicationForm) -> AppResult<()> {
        validate_form(form)?;
        if !self.repository.book_exists(form.book_id).await? {
            return Err(AppError::invalid(
                format!("Book {} does not exist", form.book_id),
                form,
            ));
        }
        if !self.repository.author_exists(form.author_id).await? {
            return Err(AppError::invalid(
                format!("Author {} does not exist", form.author_id),
                form,
            ));
        }
        Ok(())
    }
}
