//! Library service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::BooksInLibraryResponse,
        library::{
            CreateLibrary, Library, LibraryListResponse, LibraryQuery, LibraryStats, UpdateLibrary,
        },
        EntityStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LibrariesService {
    repository: Repository,
}

impl LibrariesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &LibraryQuery) -> AppResult<LibraryListResponse> {
        let (libraries, total) = self.repository.libraries.list(query).await?;
        Ok(LibraryListResponse::new(
            libraries,
            total,
            query.page(),
            query.size(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Library> {
        self.repository.libraries.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateLibrary) -> AppResult<Library> {
        data.validate()?;
        self.repository.libraries.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateLibrary) -> AppResult<Library> {
        data.validate()?;
        self.repository.libraries.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.libraries.delete(id).await
    }

    /// Repair operation: recompute `count` from Active mappings
    pub async fn recount(&self, id: i32) -> AppResult<Library> {
        let library = self.repository.libraries.recount(id).await?;
        tracing::debug!(library_id = id, count = library.count, "recomputed book count");
        Ok(library)
    }

    pub async fn stats(&self) -> AppResult<LibraryStats> {
        self.repository.libraries.stats().await
    }

    /// Books held by a library, optionally filtered by mapping status
    pub async fn books(
        &self,
        library_id: i32,
        status: Option<EntityStatus>,
    ) -> AppResult<BooksInLibraryResponse> {
        // Verify library exists
        self.repository.libraries.get_by_id(library_id).await?;
        let books = self
            .repository
            .library_books
            .books_in_library(library_id, status)
            .await?;
        Ok(BooksInLibraryResponse { library_id, books })
    }
}
