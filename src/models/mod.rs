//! Data models for Libris

pub mod book;
pub mod enums;
pub mod library;
pub mod library_book;

// Re-export commonly used types
pub use book::{Book, BookListResponse, BookQuery, CreateBook, UpdateBook};
pub use enums::EntityStatus;
pub use library::{CreateLibrary, Library, LibraryListResponse, LibraryQuery, UpdateLibrary};
pub use library_book::{
    CreateLibraryBook, LibraryBook, LibraryBookDetails, LibraryBookListResponse, LibraryBookQuery,
    UpdateLibraryBook,
};

/// Number of pages needed to hold `total` rows at `size` rows per page
pub fn total_pages(total: i64, size: i64) -> i64 {
    (total + size - 1) / size
}

#[cfg(test)]
mod tests {
    use super::total_pages;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(99, 10), 10);
        assert_eq!(total_pages(100, 10), 10);
    }
}
