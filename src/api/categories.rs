//! Category endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Category, CategoryForm, ListParams, SelectOption},
};

use super::{CategoryList, ListResponse};

/// List categories with search, sorting and pagination
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    params(ListParams),
    responses(
        (status = 200, description = "List of categories", body = CategoryList)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse<Category>>> {
    let page = state.services.categories.list(&params).await?;
    Ok(Json(page.into()))
}

/// Category dropdown entries
#[utoipa::path(
    get,
    path = "/categories/options",
    tag = "categories",
    responses(
        (status = 200, description = "Category options", body = Vec<SelectOption>)
    )
)]
pub async fn category_options(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<SelectOption>>> {
    Ok(Json(state.services.categories.options().await?))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.services.categories.get(id).await?))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CategoryForm,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    Json(form): Json<CategoryForm>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let created = state.services.categories.create(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = CategoryForm,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<CategoryForm>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.services.categories.update(id, &form).await?))
}

/// Delete a category together with its books
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted (or already absent)")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
