//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod categories;
pub mod publications;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        Author, AuthorForm, Book, BookForm, Category, CategoryForm, Publication, PublicationForm,
    },
    query::Relations,
};

/// Typed access to the four catalog tables.
///
/// Lookups return `None` for a missing id; updates return `None` when no row
/// matched; deletes report whether a row was removed. Rows are listed in id
/// order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Round trip to the store
    async fn ping(&self) -> AppResult<()>;

    async fn category_list(&self) -> AppResult<Vec<Category>>;
    async fn category_get(&self, id: i32) -> AppResult<Option<Category>>;
    async fn category_exists(&self, id: i32) -> AppResult<bool>;
    async fn category_count(&self) -> AppResult<i64>;
    async fn category_create(&self, data: &CategoryForm) -> AppResult<Category>;
    async fn category_update(&self, id: i32, data: &CategoryForm) -> AppResult<Option<Category>>;
    async fn category_delete(&self, id: i32) -> AppResult<bool>;

    async fn author_list(&self) -> AppResult<Vec<Author>>;
    async fn author_get(&self, id: i32) -> AppResult<Option<Author>>;
    async fn author_exists(&self, id: i32) -> AppResult<bool>;
    async fn author_count(&self) -> AppResult<i64>;
    async fn author_create(&self, data: &AuthorForm) -> AppResult<Author>;
    async fn author_update(&self, id: i32, data: &AuthorForm) -> AppResult<Option<Author>>;
    async fn author_delete(&self, id: i32) -> AppResult<bool>;

    /// Books, with their category resolved when `relations.category` is set
    async fn book_list(&self, relations: Relations) -> AppResult<Vec<Book>>;
    /// Book with its category resolved
    async fn book_get(&self, id: i32) -> AppResult<Option<Book>>;
    async fn book_exists(&self, id: i32) -> AppResult<bool>;
    async fn book_count(&self) -> AppResult<i64>;
    async fn book_create(&self, data: &BookForm) -> AppResult<Book>;
    async fn book_update(&self, id: i32, data: &BookForm) -> AppResult<Option<Book>>;
    async fn book_delete(&self, id: i32) -> AppResult<bool>;

    /// Publications, with book and/or author resolved per `relations`
    async fn publication_list(&self, relations: Relations) -> AppResult<Vec<Publication>>;
    /// Publication with its book and author resolved
    async fn publication_get(&self, id: i32) -> AppResult<Option<Publication>>;
    async fn publication_exists(&self, id: i32) -> AppResult<bool>;
    async fn publication_count(&self) -> AppResult<i64>;
    async fn publication_create(&self, data: &PublicationForm) -> AppResult<Publication>;
    async fn publication_update(
        &self,
        id: i32,
        data: &PublicationForm,
    ) -> AppResult<Option<Publication>>;
    async fn publication_delete(&self, id: i32) -> AppResult<bool>;
}

/// PostgreSQL repository holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Apply pending migrations (forward only)
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn category_list(&self) -> AppResult<Vec<Category>> {
        self.categories_list().await
    }

    async fn category_get(&self, id: i32) -> AppResult<Option<Category>> {
        self.categories_get(id).await
    }

    async fn category_exists(&self, id: i32) -> AppResult<bool> {
        self.categories_exists(id).await
    }

    async fn category_count(&self) -> AppResult<i64> {
        self.categories_count().await
    }

    async fn category_create(&self, data: &CategoryForm) -> AppResult<Category> {
        self.categories_create(data).await
    }

    async fn category_update(&self, id: i32, data: &CategoryForm) -> AppResult<Option<Category>> {
        self.categories_update(id, data).await
    }

    async fn category_delete(&self, id: i32) -> AppResult<bool> {
        self.categories_delete(id).await
    }

    async fn author_list(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }

    async fn author_get(&self, id: i32) -> AppResult<Option<Author>> {
        self.authors_get(id).await
    }

    async fn author_exists(&self, id: i32) -> AppResult<bool> {
        self.authors_exists(id).await
    }

    async fn author_count(&self) -> AppResult<i64> {
        self.authors_count().await
    }

    async fn author_create(&self, data: &AuthorForm) -> AppResult<Author> {
        self.authors_create(data).await
    }

    async fn author_update(&self, id: i32, data: &AuthorForm) -> AppResult<Option<Author>> {
        self.authors_update(id, data).await
    }

    async fn author_delete(&self, id: i32) -> AppResult<bool> {
        self.authors_delete(id).await
    }

    async fn book_list(&self, relations: Relations) -> AppResult<Vec<Book>> {
        self.books_list(relations.category).await
    }

    async fn book_get(&self, id: i32) -> AppResult<Option<Book>> {
        self.books_get(id).await
    }

    async fn book_exists(&self, id: i32) -> AppResult<bool> {
        self.books_exists(id).await
    }

    async fn book_count(&self) -> AppResult<i64> {
        self.books_count().await
    }

    async fn book_create(&self, data: &BookForm) -> AppResult<Book> {
        self.books_create(data).await
    }

    async fn book_update(&self, id: i32, data: &BookForm) -> AppResult<Option<Book>> {
        self.books_update(id, data).await
    }

    async fn book_delete(&self, id: i32) -> AppResult<bool> {
        self.books_delete(id).await
    }

    async fn publication_list(&self, relations: Relations) -> AppResult<Vec<Publication>> {
        self.publications_list(relations).await
    }

    async fn publication_get(&self, id: i32) -> AppResult<Option<Publication>> {
        self.publications_get(id).await
    }

    async fn publication_exists(&self, id: i32) -> AppResult<bool> {
        self.publications_exists(id).await
    }

    async fn publication_count(&self) -> AppResult<i64> {
        self.publications_count().await
    }

    async fn publication_create(&self, data: &PublicationForm) -> AppResult<Publication> {
        self.publications_create(data).await
    }

    async fn publication_update(
        &self,
        id: i32,
        data: &PublicationForm,
    ) -> AppResult<Option<Publication>> {
        self.publications_update(id, data).await
    }

    async fn publication_delete(&self, id: i32) -> AppResult<bool> {
        self.publications_delete(id).await
    }
}
