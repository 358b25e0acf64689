//! Categories service

use std::sync::Arc;

use super::{check_same_id, missing_after_update, require_text, validate_form};
use crate::{
    error::{AppError, AppResult},
    models::{Category, CategoryForm, ListParams, SelectOption},
    query::{CategoryField, ListQuery, Page},
    repository::CatalogRepository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Arc<dyn CatalogRepository>,
}

impl CategoriesService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Sorted, filtered page of categories
    pub async fn list(&self, params: &ListParams) -> AppResult<Page<Category>> {
        let query = ListQuery::<CategoryField>::from_params(params);
        let rows = self.repository.category_list().await?;
        Ok(query.apply(rows))
    }

    pub async fn get(&self, id: i32) -> AppResult<Category> {
        self.repository
            .category_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create(&self, form: &CategoryForm) -> AppResult<Category> {
        self.check(form)?;
        let created = self.repository.category_create(form).await?;
        tracing::info!("Created category {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Replace all fields of an existing category
    pub async fn update(&self, id: i32, form: &CategoryForm) -> AppResult<Category> {
        check_same_id("Category", id, form.id)?;
        self.check(form)?;
        match self.repository.category_update(id, form).await? {
            Some(updated) => {
                tracing::info!("Updated category {}", id);
                Ok(updated)
            }
            None => missing_after_update("Category", id, self.repository.category_exists(id).await),
        }
    }

    /// Delete a category; deleting a missing id is a no-op
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.category_delete(id).await? {
            tracing::info!("Deleted category {}", id);
        } else {
            tracing::debug!("Category {} already absent, nothing to delete", id);
        }
        Ok(())
    }

    /// Dropdown entries (id, name) in source order
    pub async fn options(&self) -> AppResult<Vec<SelectOption>> {
        let rows = self.repository.category_list().await?;
        Ok(rows.into_iter().map(|c| SelectOption::new(c.id, c.name)).collect())
    }

    fn check(&self, form: &CategoryForm) -> AppResult<()> {
        validate_form(form)?;
        require_text(&form.name, "Name", form)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::MockCatalogRepository;

    fn service(mock: MockCatalogRepository) -> CategoriesService {
        CategoriesService::new(Arc::new(mock))
    }

    fn form(id: Option<i32>, name: &str) -> CategoryForm {
        CategoryForm { id, name: name.to_string() }
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_get().with(eq(9)).returning(|_| Ok(None));

        let err = service(mock).get(9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_without_writing() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_create().never();

        let err = service(mock).create(&form(None, "   ")).await.unwrap_err();
        match err {
            AppError::InvalidEntity { submitted, .. } => assert_eq!(submitted["name"], "   "),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_name() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_create().never();

        let err = service(mock).create(&form(None, &"x".repeat(256))).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidEntity { .. }));
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id_is_not_found_and_writes_nothing() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_update().never();
        mock.expect_category_exists().never();

        let err = service(mock).update(1, &form(Some(2), "Poetry")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_of_concurrently_deleted_row_is_not_found() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_update().returning(|_, _| Ok(None));
        mock.expect_category_exists().with(eq(1)).times(1).returning(|_| Ok(false));

        let err = service(mock).update(1, &form(Some(1), "Poetry")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_failure_on_existing_row_is_conflict() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_update().returning(|_, _| Ok(None));
        mock.expect_category_exists().returning(|_| Ok(true));

        let err = service(mock).update(1, &form(None, "Poetry")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_a_no_op() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_delete().with(eq(5)).returning(|_| Ok(false));

        assert!(service(mock).delete(5).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_sorts_and_searches() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_list().returning(|| {
            Ok(vec![
                Category { id: 1, name: "Science".into() },
                Category { id: 2, name: "Fiction".into() },
                Category { id: 3, name: "History".into() },
            ])
        });

        let params = ListParams {
            sort: Some("name_asc".into()),
            search: Some("i".into()),
            ..Default::default()
        };
        let page = service(mock).list(&params).await.unwrap();
        let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Fiction", "History", "Science"]);
        assert_eq!(page.sort_links["name"], "name_desc");
    }

    #[tokio::test]
    async fn test_options_keep_source_order() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_list().returning(|| {
            Ok(vec![
                Category { id: 2, name: "Fiction".into() },
                Category { id: 1, name: "Science".into() },
            ])
        });

        let options = service(mock).options().await.unwrap();
        assert_eq!(
            options,
            vec![SelectOption::new(2, "Fiction"), SelectOption::new(1, "Science")]
        );
    }
}
