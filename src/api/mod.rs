//! API handlers for the catalog REST endpoints

pub mod authors;
pub mod books;
pub mod categories;
pub mod health;
pub mod openapi;
pub mod publications;

use axum::{routing::get, Router};
use indexmap::IndexMap;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{
    models::{Author, Book, Category, Publication},
    query::Page,
    AppState,
};

/// Paginated, sorted list response
#[derive(Serialize, ToSchema)]
#[aliases(
    CategoryList = ListResponse<Category>,
    AuthorList = ListResponse<Author>,
    BookList = ListResponse<Book>,
    PublicationList = ListResponse<Publication>
)]
pub struct ListResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Rows of the requested page
    pub items: Vec<T>,
    /// Number of rows matching the search, before pagination
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Rows per page (absent when the whole list is returned)
    pub per_page: Option<i64>,
    /// Effective sort token
    pub sort: String,
    /// Sort token each column header links to
    #[schema(value_type = Object)]
    pub sort_links: IndexMap<String, String>,
}

impl<T> From<Page<T>> for ListResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    fn from(page: Page<T>) -> Self {
        Self {
            items: page.items,
            total: page.total as i64,
            page: page.page,
            per_page: page.per_page,
            sort: page.sort,
            sort_links: page.sort_links,
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/categories/options", get(categories::category_options))
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Authors
        .route(
            "/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route("/authors/options", get(authors::author_options))
        .route(
            "/authors/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        // Books
        .route(
            "/books",
            get(books::list_books).post(books::create_book),
        )
        .route("/books/options", get(books::book_options))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Publications
        .route(
            "/publications",
            get(publications::list_publications).post(publications::create_publication),
        )
        .route(
            "/publications/:id",
            get(publications::get_publication)
                .put(publications::update_publication)
                .delete(publications::delete_publication),
        )
        .with_state(state);

    // OpenAPI documentation
    let docs = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(docs)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .layer(cors)
}
