//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Author, AuthorForm, ListParams, SelectOption},
};

use super::{AuthorList, ListResponse};

/// List authors with search, sorting and pagination
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(ListParams),
    responses(
        (status = 200, description = "List of authors", body = AuthorList)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse<Author>>> {
    let page = state.services.authors.list(&params).await?;
    Ok(Json(page.into()))
}

/// Author dropdown entries
#[utoipa::path(
    get,
    path = "/authors/options",
    tag = "authors",
    responses(
        (status = 200, description = "Author options", body = Vec<SelectOption>)
    )
)]
pub async fn author_options(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<SelectOption>>> {
    Ok(Json(state.services.authors.options().await?))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.services.authors.get(id).await?))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = AuthorForm,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(form): Json<AuthorForm>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = state.services.authors.create(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = AuthorForm,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.services.authors.update(id, &form).await?))
}

/// Delete an author together with their publications
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted (or already absent)")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
