//! Library-book mapping API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::library_book::{
        CreateLibraryBook, LibraryBook, LibraryBookFull, LibraryBookListResponse, LibraryBookQuery,
        UpdateLibraryBook,
    },
};

/// List mappings with filters and pagination
#[utoipa::path(
    get,
    path = "/library-books",
    tag = "library-books",
    params(LibraryBookQuery),
    responses(
        (status = 200, description = "Paginated mapping list", body = LibraryBookListResponse)
    )
)]
pub async fn list_library_books(
    State(state): State<crate::AppState>,
    Query(query): Query<LibraryBookQuery>,
) -> AppResult<Json<LibraryBookListResponse>> {
    let mappings = state.services.library_books.list(&query).await?;
    Ok(Json(mappings))
}

/// Get mapping by ID
#[utoipa::path(
    get,
    path = "/library-books/{id}",
    tag = "library-books",
    params(("id" = i32, Path, description = "Mapping ID")),
    responses(
        (status = 200, description = "Mapping details", body = LibraryBook),
        (status = 404, description = "Mapping not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_library_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LibraryBook>> {
    let mapping = state.services.library_books.get_by_id(id).await?;
    Ok(Json(mapping))
}

/// Get mapping with nested library and book records
#[utoipa::path(
    get,
    path = "/library-books/{id}/details",
    tag = "library-books",
    params(("id" = i32, Path, description = "Mapping ID")),
    responses(
        (status = 200, description = "Mapping with parents", body = LibraryBookFull),
        (status = 404, description = "Mapping not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_library_book_details(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LibraryBookFull>> {
    let details = state.services.library_books.get_details(id).await?;
    Ok(Json(details))
}

/// Create a mapping
#[utoipa::path(
    post,
    path = "/library-books",
    tag = "library-books",
    request_body = CreateLibraryBook,
    responses(
        (status = 201, description = "Mapping created", body = LibraryBook),
        (status = 400, description = "Validation failure or missing parent", body = crate::error::ErrorResponse),
        (status = 409, description = "Pair already mapped", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_library_book(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateLibraryBook>,
) -> AppResult<(StatusCode, Json<LibraryBook>)> {
    let mapping = state.services.library_books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(mapping)))
}

/// Update a mapping
#[utoipa::path(
    put,
    path = "/library-books/{id}",
    tag = "library-books",
    params(("id" = i32, Path, description = "Mapping ID")),
    request_body = UpdateLibraryBook,
    responses(
        (status = 200, description = "Mapping updated", body = LibraryBook),
        (status = 400, description = "Validation failure or missing parent", body = crate::error::ErrorResponse),
        (status = 404, description = "Mapping not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Pair already mapped", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_library_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLibraryBook>,
) -> AppResult<Json<LibraryBook>> {
    let mapping = state.services.library_books.update(id, &data).await?;
    Ok(Json(mapping))
}

/// Delete a mapping (library count is adjusted)
#[utoipa::path(
    delete,
    path = "/library-books/{id}",
    tag = "library-books",
    params(("id" = i32, Path, description = "Mapping ID")),
    responses(
        (status = 204, description = "Mapping deleted"),
        (status = 404, description = "Mapping not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_library_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.library_books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
