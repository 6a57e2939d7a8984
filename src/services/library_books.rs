//! Library-book mapping service.
//!
//! The one piece of cross-entity logic in the system lives here: mappings are
//! created only after existence checks on both parents, duplicate pairs are
//! rejected, and the library book counter follows every mapping write.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::library_book::{
        CreateLibraryBook, LibraryBook, LibraryBookFull, LibraryBookListResponse, LibraryBookQuery,
        UpdateLibraryBook,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LibraryBooksService {
    repository: Repository,
}

impl LibraryBooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &LibraryBookQuery) -> AppResult<LibraryBookListResponse> {
        let (mappings, total) = self.repository.library_books.list(query).await?;
        Ok(LibraryBookListResponse::new(
            mappings,
            total,
            query.page(),
            query.size(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<LibraryBook> {
        self.repository.library_books.get_by_id(id).await
    }

    pub async fn get_details(&self, id: i32) -> AppResult<LibraryBookFull> {
        self.repository.library_books.get_details(id).await
    }

    pub async fn create(&self, data: &CreateLibraryBook) -> AppResult<LibraryBook> {
        data.validate()?;

        // Both parents must exist before a mapping may reference them.
        // A missing parent is a client error, same as a FK violation.
        if !self.repository.libraries.exists(data.lib_id).await? {
            return Err(AppError::BadRequest(format!(
                "Library {} does not exist",
                data.lib_id
            )));
        }
        if !self.repository.books.exists(data.book_id).await? {
            return Err(AppError::BadRequest(format!(
                "Book {} does not exist",
                data.book_id
            )));
        }

        if self
            .repository
            .library_books
            .pair_exists(data.lib_id, data.book_id, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Library {} already has book {}",
                data.lib_id, data.book_id
            )));
        }

        let mapping = self.repository.library_books.create(data).await?;
        tracing::debug!(
            mapping_id = mapping.id,
            lib_id = mapping.lib_id,
            book_id = mapping.book_id,
            "created library-book mapping"
        );
        Ok(mapping)
    }

    pub async fn update(&self, id: i32, data: &UpdateLibraryBook) -> AppResult<LibraryBook> {
        data.validate()?;

        let existing = self.repository.library_books.get_by_id(id).await?;
        let lib_id = data.lib_id.unwrap_or(existing.lib_id);
        let book_id = data.book_id.unwrap_or(existing.book_id);

        if lib_id != existing.lib_id && !self.repository.libraries.exists(lib_id).await? {
            return Err(AppError::BadRequest(format!(
                "Library {} does not exist",
                lib_id
            )));
        }
        if book_id != existing.book_id && !self.repository.books.exists(book_id).await? {
            return Err(AppError::BadRequest(format!(
                "Book {} does not exist",
                book_id
            )));
        }

        if (lib_id, book_id) != (existing.lib_id, existing.book_id)
            && self
                .repository
                .library_books
                .pair_exists(lib_id, book_id, Some(id))
                .await?
        {
            return Err(AppError::Conflict(format!(
                "Library {} already has book {}",
                lib_id, book_id
            )));
        }

        self.repository.library_books.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.library_books.delete(id).await
    }
}
