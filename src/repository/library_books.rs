//! Library-book mappings repository.
//!
//! The library `count` column tracks the number of Active mappings that
//! reference it. Every write here adjusts the counter inside the same
//! transaction as the mapping row, so the two cannot drift.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookInLibrary,
        library::LibraryForBook,
        library_book::{
            CreateLibraryBook, LibraryBook, LibraryBookDetails, LibraryBookFull, LibraryBookQuery,
            UpdateLibraryBook,
        },
        EntityStatus,
    },
};

#[derive(Clone)]
pub struct LibraryBooksRepository {
    pool: Pool<Postgres>,
}

impl LibraryBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List mappings with parent names, filters and pagination
    pub async fn list(
        &self,
        query: &LibraryBookQuery,
    ) -> AppResult<(Vec<LibraryBookDetails>, i64)> {
        let mut conditions: Vec<String> = Vec::new();

        if query.lib_id.is_some() {
            conditions.push(format!("lb.lib_id = ${}", conditions.len() + 1));
        }
        if query.book_id.is_some() {
            conditions.push(format!("lb.book_id = ${}", conditions.len() + 1));
        }
        if query.status.is_some() {
            conditions.push(format!("lb.status = ${}", conditions.len() + 1));
        }

        let where_clause = if conditions.is_empty() {
            "TRUE".to_string()
        } else {
            conditions.join(" AND ")
        };

        let count_sql = format!(
            "SELECT COUNT(*) FROM library_books lb WHERE {}",
            where_clause
        );
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(lib_id) = query.lib_id {
            count_query = count_query.bind(lib_id);
        }
        if let Some(book_id) = query.book_id {
            count_query = count_query.bind(book_id);
        }
        if let Some(status) = query.status {
            count_query = count_query.bind(status);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let select_sql = format!(
            r#"
            SELECT lb.id, lb.lib_id, lb.book_id, lb.status, lb.created_at, lb.updated_at,
                   l.name AS library_name, b.title AS book_title, b.author AS book_author
            FROM library_books lb
            JOIN libraries l ON l.id = lb.lib_id
            JOIN books b ON b.id = lb.book_id
            WHERE {}
            ORDER BY lb.id
            LIMIT {} OFFSET {}
            "#,
            where_clause,
            query.size(),
            query.offset()
        );
        let mut select_query = sqlx::query_as::<_, LibraryBookDetails>(&select_sql);
        if let Some(lib_id) = query.lib_id {
            select_query = select_query.bind(lib_id);
        }
        if let Some(book_id) = query.book_id {
            select_query = select_query.bind(book_id);
        }
        if let Some(status) = query.status {
            select_query = select_query.bind(status);
        }
        let mappings = select_query.fetch_all(&self.pool).await?;

        Ok((mappings, total))
    }

    /// Get mapping by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<LibraryBook> {
        sqlx::query_as::<_, LibraryBook>("SELECT * FROM library_books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Library-book mapping {} not found", id)))
    }

    /// Get mapping with fully nested library and book records
    pub async fn get_details(&self, id: i32) -> AppResult<LibraryBookFull> {
        let mapping = self.get_by_id(id).await?;

        let library = sqlx::query_as::<_, crate::models::Library>(
            "SELECT * FROM libraries WHERE id = $1",
        )
        .bind(mapping.lib_id)
        .fetch_one(&self.pool)
        .await?;

        let book = sqlx::query_as::<_, crate::models::Book>("SELECT * FROM books WHERE id = $1")
            .bind(mapping.book_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(LibraryBookFull {
            id: mapping.id,
            status: mapping.status,
            created_at: mapping.created_at,
            updated_at: mapping.updated_at,
            library,
            book,
        })
    }

    /// Check if a (lib_id, book_id) pair is already mapped
    pub async fn pair_exists(
        &self,
        lib_id: i32,
        book_id: i32,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM library_books WHERE lib_id = $1 AND book_id = $2 AND id != $3)",
            )
            .bind(lib_id)
            .bind(book_id)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM library_books WHERE lib_id = $1 AND book_id = $2)",
            )
            .bind(lib_id)
            .bind(book_id)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(exists)
    }

    /// Create a mapping; the library count is incremented in the same
    /// transaction when the new mapping is Active.
    pub async fn create(&self, data: &CreateLibraryBook) -> AppResult<LibraryBook> {
        let status = data.status.unwrap_or_default();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, LibraryBook>(
            r#"
            INSERT INTO library_books (lib_id, book_id, status)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(data.lib_id)
        .bind(data.book_id)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        if status == EntityStatus::Active {
            sqlx::query("UPDATE libraries SET count = count + 1, updated_at = $2 WHERE id = $1")
                .bind(data.lib_id)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Update a mapping; counts of every affected library are recomputed in
    /// the same transaction.
    pub async fn update(&self, id: i32, data: &UpdateLibraryBook) -> AppResult<LibraryBook> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, LibraryBook>(
            "SELECT * FROM library_books WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Library-book mapping {} not found", id)))?;

        let row = sqlx::query_as::<_, LibraryBook>(
            r#"
            UPDATE library_books SET
                lib_id = COALESCE($1, lib_id),
                book_id = COALESCE($2, book_id),
                status = COALESCE($3, status),
                updated_at = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(data.lib_id)
        .bind(data.book_id)
        .bind(data.status)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let mut affected = vec![existing.lib_id];
        if row.lib_id != existing.lib_id {
            affected.push(row.lib_id);
        }
        self.recount_in_tx(&mut tx, &affected).await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete a mapping; the library count is decremented (floored at 0) in
    /// the same transaction when the deleted mapping was Active.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted: Option<(i32, EntityStatus)> = sqlx::query_as(
            "DELETE FROM library_books WHERE id = $1 RETURNING lib_id, status",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((lib_id, status)) = deleted else {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!(
                "Library-book mapping {} not found",
                id
            )));
        };

        if status == EntityStatus::Active {
            sqlx::query(
                "UPDATE libraries SET count = GREATEST(count - 1, 0), updated_at = $2 WHERE id = $1",
            )
            .bind(lib_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Books held by a library, optionally filtered by mapping status
    pub async fn books_in_library(
        &self,
        lib_id: i32,
        status: Option<EntityStatus>,
    ) -> AppResult<Vec<BookInLibrary>> {
        let books = sqlx::query_as::<_, BookInLibrary>(
            r#"
            SELECT lb.id AS mapping_id, lb.status AS mapping_status,
                   b.id, b.title, b.author, b.category, b.price, b.isbn
            FROM library_books lb
            JOIN books b ON b.id = lb.book_id
            WHERE lb.lib_id = $1 AND ($2::entity_status IS NULL OR lb.status = $2)
            ORDER BY b.title
            "#,
        )
        .bind(lib_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Libraries holding a book, optionally filtered by mapping status
    pub async fn libraries_for_book(
        &self,
        book_id: i32,
        status: Option<EntityStatus>,
    ) -> AppResult<Vec<LibraryForBook>> {
        let libraries = sqlx::query_as::<_, LibraryForBook>(
            r#"
            SELECT lb.id AS mapping_id, lb.status AS mapping_status,
                   l.id, l.name, l.dept, l.count, l.status
            FROM library_books lb
            JOIN libraries l ON l.id = lb.lib_id
            WHERE lb.book_id = $1 AND ($2::entity_status IS NULL OR lb.status = $2)
            ORDER BY l.name
            "#,
        )
        .bind(book_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(libraries)
    }

    /// Recompute counts for the given libraries from their Active mappings
    async fn recount_in_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        library_ids: &[i32],
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE libraries SET
                count = (
                    SELECT COUNT(*) FROM library_books lb
                    WHERE lb.lib_id = libraries.id AND lb.status = 'Active'
                ),
                updated_at = $2
            WHERE id = ANY($1)
            "#,
        )
        .bind(library_ids)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
