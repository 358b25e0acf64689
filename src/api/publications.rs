//! Publication endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{ListParams, Publication, PublicationForm},
};

use super::{ListResponse, PublicationList};

/// List publications with their book and author
#[utoipa::path(
    get,
    path = "/publications",
    tag = "publications",
    params(ListParams),
    responses(
        (status = 200, description = "List of publications", body = PublicationList)
    )
)]
pub async fn list_publications(
    State(state): State<crate::AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse<Publication>>> {
    let page = state.services.publications.list(&params).await?;
    Ok(Json(page.into()))
}

/// Get publication by ID, with its book and author
#[utoipa::path(
    get,
    path = "/publications/{id}",
    tag = "publications",
    params(
        ("id" = i32, Path, description = "Publication ID")
    ),
    responses(
        (status = 200, description = "Publication details", body = Publication),
        (status = 404, description = "Publication not found", body = ErrorResponse)
    )
)]
pub async fn get_publication(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Publication>> {
    Ok(Json(state.services.publications.get(id).await?))
}

/// Record a new publication
#[utoipa::path(
    post,
    path = "/publications",
    tag = "publications",
    request_body = PublicationForm,
    responses(
        (status = 201, description = "Publication created", body = Publication),
        (status = 422, description = "Unknown book or author", body = ErrorResponse)
    )
)]
pub async fn create_publication(
    State(state): State<crate::AppState>,
    Json(form): Json<PublicationForm>,
) -> AppResult<(StatusCode, Json<Publication>)> {
    let created = state.services.publications.create(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing publication
#[utoipa::path(
    put,
    path = "/publications/{id}",
    tag = "publications",
    params(
        ("id" = i32, Path, description = "Publication ID")
    ),
    request_body = PublicationForm,
    responses(
        (status = 200, description = "Publication updated", body = Publication),
        (status = 404, description = "Publication not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
        (status = 422, description = "Unknown book or author", body = ErrorResponse)
    )
)]
pub async fn update_publication(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<PublicationForm>,
) -> AppResult<Json<Publication>> {
    Ok(Json(state.services.publications.update(id, &form).await?))
}

/// Delete a publication
#[utoipa::path(
    delete,
    path = "/publications/{id}",
    tag = "publications",
    params(
        ("id" = i32, Path, description = "Publication ID")
    ),
    responses(
        (status = 204, description = "Publication deleted (or already absent)")
    )
)]
pub async fn delete_publication(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.publications.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
