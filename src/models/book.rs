//! Book model and request/response types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::enums::EntityStatus;

/// Book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    /// Price, NUMERIC(10,2) in the database
    pub price: Decimal,
    /// International Standard Book Number (unique)
    pub isbn: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// ISBN check: after stripping hyphens and spaces the value must be
/// all digits, 10 or 13 of them.
pub fn validate_isbn(isbn: &str) -> Result<(), ValidationError> {
    let cleaned: String = isbn.chars().filter(|c| *c != '-' && *c != ' ').collect();

    if !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("isbn")
            .with_message("ISBN must contain only digits, hyphens, and spaces".into()));
    }
    if cleaned.len() != 10 && cleaned.len() != 13 {
        return Err(
            ValidationError::new("isbn").with_message("ISBN must be 10 or 13 digits long".into())
        );
    }
    Ok(())
}

pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("price").with_message("price must be positive".into()));
    }
    Ok(())
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "author must be 1-255 characters"))]
    pub author: String,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
    #[validate(custom(function = validate_price))]
    pub price: Decimal,
    #[validate(
        length(min = 10, max = 20, message = "isbn must be 10-20 characters"),
        custom(function = validate_isbn)
    )]
    pub isbn: String,
}

/// Update book request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255, message = "author must be 1-255 characters"))]
    pub author: Option<String>,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
    #[validate(custom(function = validate_price))]
    pub price: Option<Decimal>,
    #[validate(
        length(min = 10, max = 20, message = "isbn must be 10-20 characters"),
        custom(function = validate_isbn)
    )]
    pub isbn: Option<String>,
}

/// Query parameters for listing books
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Page size (max 100)
    pub size: Option<i64>,
    /// Case-insensitive match over title, author and category
    pub search: Option<String>,
    pub category: Option<String>,
    /// Case-insensitive partial match on author
    pub author: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl BookQuery {
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

/// Paginated book list
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
}

impl BookListResponse {
    pub fn new(books: Vec<Book>, total: i64, page: i64, size: i64) -> Self {
        Self {
            books,
            total,
            page,
            size,
            pages: super::total_pages(total, size),
        }
    }
}

/// A book held by a given library, with the mapping it came from
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct BookInLibrary {
    pub mapping_id: i32,
    pub mapping_status: EntityStatus,
    pub id: i32,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub isbn: String,
}

/// Response for `GET /libraries/{id}/books`
#[derive(Debug, Serialize, ToSchema)]
pub struct BooksInLibraryResponse {
    pub library_id: i32,
    pub books: Vec<BookInLibrary>,
}

#[cfg(test)]
mod tests {
    use super::validate_isbn;

    #[test]
    fn test_isbn_ten_digits() {
        assert!(validate_isbn("0306406152").is_ok());
    }

    #[test]
    fn test_isbn_thirteen_digits_with_hyphens() {
        assert!(validate_isbn("978-0-306-40615-7").is_ok());
    }

    #[test]
    fn test_isbn_with_spaces() {
        assert!(validate_isbn("978 0306406157").is_ok());
    }

    #[test]
    fn test_isbn_bad_length() {
        assert!(validate_isbn("12345").is_err());
        assert!(validate_isbn("123456789012").is_err());
    }

    #[test]
    fn test_isbn_non_digit() {
        assert!(validate_isbn("97803064061XY").is_err());
    }
}
