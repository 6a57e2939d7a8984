//! Library-book mapping model and request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{book::Book, enums::EntityStatus, library::Library};

/// Library-book mapping record (join table row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LibraryBook {
    pub id: i32,
    pub lib_id: i32,
    pub book_id: i32,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create mapping request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLibraryBook {
    #[validate(range(min = 1, message = "lib_id must be positive"))]
    pub lib_id: i32,
    #[validate(range(min = 1, message = "book_id must be positive"))]
    pub book_id: i32,
    pub status: Option<EntityStatus>,
}

/// Update mapping request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLibraryBook {
    #[validate(range(min = 1, message = "lib_id must be positive"))]
    pub lib_id: Option<i32>,
    #[validate(range(min = 1, message = "book_id must be positive"))]
    pub book_id: Option<i32>,
    pub status: Option<EntityStatus>,
}

/// Query parameters for listing mappings
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LibraryBookQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Page size (max 100)
    pub size: Option<i64>,
    pub lib_id: Option<i32>,
    pub book_id: Option<i32>,
    pub status: Option<EntityStatus>,
}

impl LibraryBookQuery {
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

/// Mapping row joined with parent names
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct LibraryBookDetails {
    pub id: i32,
    pub lib_id: i32,
    pub book_id: i32,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub library_name: String,
    pub book_title: String,
    pub book_author: String,
}

/// Paginated mapping list
#[derive(Debug, Serialize, ToSchema)]
pub struct LibraryBookListResponse {
    pub mappings: Vec<LibraryBookDetails>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
}

impl LibraryBookListResponse {
    pub fn new(mappings: Vec<LibraryBookDetails>, total: i64, page: i64, size: i64) -> Self {
        Self {
            mappings,
            total,
            page,
            size,
            pages: super::total_pages(total, size),
        }
    }
}

/// Mapping with fully nested parent records
#[derive(Debug, Serialize, ToSchema)]
pub struct LibraryBookFull {
    pub id: i32,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub library: Library,
    pub book: Book,
}
