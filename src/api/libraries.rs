//! Library API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::BooksInLibraryResponse,
        library::{
            CreateLibrary, Library, LibraryListResponse, LibraryQuery, LibraryStats, UpdateLibrary,
        },
    },
};

use super::MappingStatusQuery;

/// List libraries with filters and pagination
#[utoipa::path(
    get,
    path = "/libraries",
    tag = "libraries",
    params(LibraryQuery),
    responses(
        (status = 200, description = "Paginated library list", body = LibraryListResponse)
    )
)]
pub async fn list_libraries(
    State(state): State<crate::AppState>,
    Query(query): Query<LibraryQuery>,
) -> AppResult<Json<LibraryListResponse>> {
    let libraries = state.services.libraries.list(&query).await?;
    Ok(Json(libraries))
}

/// Get library by ID
#[utoipa::path(
    get,
    path = "/libraries/{id}",
    tag = "libraries",
    params(("id" = i32, Path, description = "Library ID")),
    responses(
        (status = 200, description = "Library details", body = Library),
        (status = 404, description = "Library not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_library(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Library>> {
    let library = state.services.libraries.get_by_id(id).await?;
    Ok(Json(library))
}

/// Create a library
#[utoipa::path(
    post,
    path = "/libraries",
    tag = "libraries",
    request_body = CreateLibrary,
    responses(
        (status = 201, description = "Library created", body = Library),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_library(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateLibrary>,
) -> AppResult<(StatusCode, Json<Library>)> {
    let library = state.services.libraries.create(&data).await?;
    Ok((StatusCode::CREATED, Json(library)))
}

/// Update a library
#[utoipa::path(
    put,
    path = "/libraries/{id}",
    tag = "libraries",
    params(("id" = i32, Path, description = "Library ID")),
    request_body = UpdateLibrary,
    responses(
        (status = 200, description = "Library updated", body = Library),
        (status = 404, description = "Library not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_library(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLibrary>,
) -> AppResult<Json<Library>> {
    let library = state.services.libraries.update(id, &data).await?;
    Ok(Json(library))
}

/// Delete a library (its mappings cascade)
#[utoipa::path(
    delete,
    path = "/libraries/{id}",
    tag = "libraries",
    params(("id" = i32, Path, description = "Library ID")),
    responses(
        (status = 204, description = "Library deleted"),
        (status = 404, description = "Library not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_library(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.libraries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Books held by a library
#[utoipa::path(
    get,
    path = "/libraries/{id}/books",
    tag = "libraries",
    params(
        ("id" = i32, Path, description = "Library ID"),
        MappingStatusQuery
    ),
    responses(
        (status = 200, description = "Books in the library", body = BooksInLibraryResponse),
        (status = 404, description = "Library not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_library_books(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<MappingStatusQuery>,
) -> AppResult<Json<BooksInLibraryResponse>> {
    let books = state.services.libraries.books(id, query.status).await?;
    Ok(Json(books))
}

/// Recompute the library's book count from its Active mappings
#[utoipa::path(
    post,
    path = "/libraries/{id}/recount",
    tag = "libraries",
    params(("id" = i32, Path, description = "Library ID")),
    responses(
        (status = 200, description = "Count recomputed", body = Library),
        (status = 404, description = "Library not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn recount_library(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Library>> {
    let library = state.services.libraries.recount(id).await?;
    Ok(Json(library))
}

/// Aggregate library statistics
#[utoipa::path(
    get,
    path = "/libraries/stats",
    tag = "libraries",
    responses(
        (status = 200, description = "Library statistics", body = LibraryStats)
    )
)]
pub async fn get_library_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<LibraryStats>> {
    let stats = state.services.libraries.stats().await?;
    Ok(Json(stats))
}
