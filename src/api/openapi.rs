//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, categories, health, publications};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "1.0.0",
        description = "Book catalog REST API: categories, books, authors and publications",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Categories
        categories::list_categories,
        categories::category_options,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Authors
        authors::list_authors,
        authors::author_options,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Books
        books::list_books,
        books::book_options,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Publications
        publications::list_publications,
        publications::get_publication,
        publications::create_publication,
        publications::update_publication,
        publications::delete_publication,
    ),
    components(
        schemas(
            crate::models::Category,
            crate::models::CategoryForm,
            crate::models::Author,
            crate::models::AuthorForm,
            crate::models::Book,
            crate::models::BookForm,
            crate::models::Publication,
            crate::models::PublicationForm,
            crate::models::SelectOption,
            crate::models::ListParams,
            crate::models::BookListParams,
            super::CategoryList,
            super::AuthorList,
            super::BookList,
            super::PublicationList,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categories", description = "Book categories"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book catalog"),
        (name = "publications", description = "Book/author publication records")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_resource_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/categories",
            "/categories/{id}",
            "/authors/options",
            "/books",
            "/books/{id}",
            "/publications/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{} missing", path);
        }
    }
}
