//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Book, BookForm, BookListParams, SelectOption},
};

use super::{BookList, ListResponse};

/// Browse books, optionally scoped to one category
///
/// A search term matching no book returns the unfiltered list.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookListParams),
    responses(
        (status = 200, description = "List of books with their category", body = BookList),
        (status = 400, description = "Malformed category selector", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(params): Query<BookListParams>,
) -> AppResult<Json<ListResponse<Book>>> {
    let page = state.services.books.list(&params).await?;
    Ok(Json(page.into()))
}

/// Book dropdown entries
#[utoipa::path(
    get,
    path = "/books/options",
    tag = "books",
    responses(
        (status = 200, description = "Book options", body = Vec<SelectOption>)
    )
)]
pub async fn book_options(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<SelectOption>>> {
    Ok(Json(state.services.books.options().await?))
}

/// Get book by ID, with its category
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.services.books.get(id).await?))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 422, description = "Invalid input or unknown category", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(form): Json<BookForm>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookForm,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
        (status = 422, description = "Invalid input or unknown category", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<BookForm>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.services.books.update(id, &form).await?))
}

/// Delete a book together with its publications
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted (or already absent)")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
