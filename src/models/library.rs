//! Library model and request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::EntityStatus;

/// Library record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Library {
    pub id: i32,
    pub name: String,
    /// Department the library belongs to
    pub dept: Option<String>,
    /// Number of books held (count of Active mappings)
    pub count: i32,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create library request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLibrary {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "dept must be at most 100 characters"))]
    pub dept: Option<String>,
    #[validate(range(min = 0, message = "count must not be negative"))]
    pub count: Option<i32>,
    pub status: Option<EntityStatus>,
}

/// Update library request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLibrary {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "dept must be at most 100 characters"))]
    pub dept: Option<String>,
    #[validate(range(min = 0, message = "count must not be negative"))]
    pub count: Option<i32>,
    pub status: Option<EntityStatus>,
}

/// Query parameters for listing libraries
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LibraryQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Page size (max 100)
    pub size: Option<i64>,
    /// Case-insensitive match over name and dept
    pub search: Option<String>,
    pub status: Option<EntityStatus>,
    pub dept: Option<String>,
}

impl LibraryQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.size()
    }
}

/// Paginated library list
#[derive(Debug, Serialize, ToSchema)]
pub struct LibraryListResponse {
    pub libraries: Vec<Library>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
}

impl LibraryListResponse {
    pub fn new(libraries: Vec<Library>, total: i64, page: i64, size: i64) -> Self {
        Self {
            libraries,
            total,
            page,
            size,
            pages: super::total_pages(total, size),
        }
    }
}

/// Aggregate library counters
#[derive(Debug, Serialize, ToSchema)]
pub struct LibraryStats {
    pub total_libraries: i64,
    pub active_libraries: i64,
    pub inactive_libraries: i64,
}

/// A library holding a given book, with the mapping it came from
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct LibraryForBook {
    pub mapping_id: i32,
    pub mapping_status: EntityStatus,
    pub id: i32,
    pub name: String,
    pub dept: Option<String>,
    pub count: i32,
    pub status: EntityStatus,
}

/// Response for `GET /books/{id}/libraries`
#[derive(Debug, Serialize, ToSchema)]
pub struct LibrariesForBookResponse {
    pub book_id: i32,
    pub libraries: Vec<LibraryForBook>,
}
