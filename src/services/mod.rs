//! Business logic services

pub mod authors;
pub mod books;
pub mod categories;
pub mod publications;
pub mod seed;

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    repository::CatalogRepository,
};

/// Digits, spaces, dashes and parentheses, with an optional leading `+`.
/// Overall length is bounded by the form validation.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]+$").expect("valid phone regex"));

const PHONE_MIN_DIGITS: usize = 5;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub categories: categories::CategoriesService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub publications: publications::PublicationsService,
    repository: Arc<dyn CatalogRepository>,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self {
            categories: categories::CategoriesService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            publications: publications::PublicationsService::new(repository.clone()),
            repository,
        }
    }

    /// Check the store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Run derive-based validation, returning the form with the error
fn validate_form<T: Validate + Serialize>(form: &T) -> AppResult<()> {
    form.validate()
        .map_err(|errors| AppError::invalid(errors.to_string(), form))
}

/// Reject values that are only whitespace
fn require_text<T: Serialize>(value: &str, field: &str, form: &T) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid(format!("{} is required", field), form));
    }
    Ok(())
}

/// Checked as submitted; the stored value is exactly the validated one
fn is_phone_number(value: &str) -> bool {
    PHONE_RE.is_match(value) && value.chars().filter(char::is_ascii_digit).count() >= PHONE_MIN_DIGITS
}

/// The path id must match the submitted record's own id, when it carries one
fn check_same_id(entity: &str, id: i32, form_id: Option<i32>) -> AppResult<()> {
    match form_id {
        Some(form_id) if form_id != id => {
            tracing::debug!("{} update rejected: path id {} != record id {}", entity, id, form_id);
            Err(AppError::NotFound(format!("{} {} not found", entity, id)))
        }
        _ => Ok(()),
    }
}

/// Settle an update that matched no row using a fresh existence check: if
/// the row is gone (deleted by another writer) it is a not-found, otherwise
/// the write failed for some other reason and is reported as a conflict.
fn missing_after_update<T>(entity: &str, id: i32, still_exists: AppResult<bool>) -> AppResult<T> {
    if still_exists? {
        return Err(AppError::Conflict(format!(
            "{} {} could not be updated",
            entity, id
        )));
    }
    tracing::warn!("{} {} was deleted before the update was applied", entity, id);
    Err(AppError::NotFound(format!("{} {} not found", entity, id)))
}
