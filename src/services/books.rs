//! Book service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookListResponse, BookQuery, CreateBook, UpdateBook},
        library::LibrariesForBookResponse,
        EntityStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &BookQuery) -> AppResult<BookListResponse> {
        let (books, total) = self.repository.books.list(query).await?;
        Ok(BookListResponse::new(
            books,
            total,
            query.page(),
            query.size(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        self.repository.books.get_by_isbn(isbn).await
    }

    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;

        if self.repository.books.isbn_exists(&data.isbn, None).await? {
            return Err(AppError::Conflict(format!(
                "Book with ISBN {} already exists",
                data.isbn
            )));
        }

        self.repository.books.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        data.validate()?;

        if let Some(ref isbn) = data.isbn {
            if self.repository.books.isbn_exists(isbn, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "Book with ISBN {} already exists",
                    isbn
                )));
            }
        }

        self.repository.books.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    pub async fn categories(&self) -> AppResult<Vec<String>> {
        self.repository.books.categories().await
    }

    pub async fn authors(&self) -> AppResult<Vec<String>> {
        self.repository.books.authors().await
    }

    /// Libraries holding a book, optionally filtered by mapping status
    pub async fn libraries(
        &self,
        book_id: i32,
        status: Option<EntityStatus>,
    ) -> AppResult<LibrariesForBookResponse> {
        // Verify book exists
        self.repository.books.get_by_id(book_id).await?;
        let libraries = self
            .repository
            .library_books
            .libraries_for_book(book_id, status)
            .await?;
        Ok(LibrariesForBookResponse {
            book_id,
            libraries,
        })
    }
}
